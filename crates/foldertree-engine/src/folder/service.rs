//! Folder sidebar state: canonical list, collapse state, and drag hooks.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use foldertree_core::config::AppConfig;
use foldertree_core::config::persistence::PersistenceConfig;
use foldertree_core::config::tree::TreeConfig;
use foldertree_core::error::{AppError, ErrorKind};
use foldertree_core::result::AppResult;
use foldertree_core::traits::FolderStore;
use foldertree_core::types::FolderId;
use foldertree_entity::folder::{FlattenedItem, FolderNode, FolderTree, Projection};

use super::collapse::{collapsed_ids, remove_children_of};
use super::policy::{RejectReason, check_drop};
use super::projection::project;
use super::reorder::apply_move;
use super::tree::{BuildReport, build_tree, descendant_ids, flatten_records};
use crate::drag::{DragEnd, DragSession, PointerMove, PointerPosition, PointerRelease};

/// What a drop did to the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    /// The folder moved. `persisted` is false when the store failed and the
    /// local change was kept anyway.
    Moved {
        id: FolderId,
        parent: Option<FolderId>,
        previous_parent: Option<FolderId>,
        persisted: bool,
    },
    /// Dropped where it already was.
    Unchanged { id: FolderId },
    /// The drop broke a lock, sentinel, or subtree rule.
    Rejected { id: FolderId, reason: RejectReason },
    /// Cancelled, or released outside the list.
    Cancelled,
}

/// What releasing the pointer amounted to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "release", rename_all = "snake_case")]
pub enum ReleaseOutcome {
    Idle,
    Click { id: FolderId },
    Drop { outcome: DropOutcome },
}

/// Owns the folder list of one media library and drives drags over it.
///
/// All state changes are synchronous except the store write issued by
/// [`FolderTreeService::on_drag_end`], which happens after the local list
/// was already updated.
#[derive(Debug)]
pub struct FolderTreeService {
    /// Persistence collaborator.
    store: Arc<dyn FolderStore<FolderNode>>,
    /// Drag geometry.
    tree_config: TreeConfig,
    /// Retry and rollback policy for parent updates.
    persistence: PersistenceConfig,
    /// Canonical pre-order list.
    items: Vec<FlattenedItem>,
    /// Recovery report of the last load.
    report: BuildReport,
    session: DragSession,
    projection: Option<Projection>,
    rejection: Option<RejectReason>,
}

impl FolderTreeService {
    /// Creates an empty service.
    pub fn new(store: Arc<dyn FolderStore<FolderNode>>, config: &AppConfig) -> Self {
        Self {
            store,
            tree_config: config.tree.clone(),
            persistence: config.persistence.clone(),
            items: Vec::new(),
            report: BuildReport::default(),
            session: DragSession::new(config.tree.activation_distance_px),
            projection: None,
            rejection: None,
        }
    }

    /// Creates a service and loads the folders from the store.
    pub async fn load(
        store: Arc<dyn FolderStore<FolderNode>>,
        config: &AppConfig,
    ) -> AppResult<Self> {
        let mut service = Self::new(store, config);
        service.reload().await?;
        Ok(service)
    }

    /// Re-fetches every folder from the store, discarding any drag.
    pub async fn reload(&mut self) -> AppResult<&BuildReport> {
        let records = self.store.load_folders().await.map_err(|e| {
            AppError::with_source(
                e.kind,
                format!("Failed to load folders from {}", self.store.provider_type()),
                e,
            )
        })?;
        Ok(self.set_folders(records))
    }

    /// Replaces the folder list with `records`, discarding any drag.
    pub fn set_folders(&mut self, records: Vec<FolderNode>) -> &BuildReport {
        let (records, pseudo): (Vec<FolderNode>, Vec<FolderNode>) =
            records.into_iter().partition(|record| !record.id.is_sentinel());
        if !pseudo.is_empty() {
            debug!(count = pseudo.len(), "Pseudo-folders left out of the tree");
        }

        let (items, report) = flatten_records(&records);
        self.items = items;
        self.report = report;
        self.session.cancel();
        self.projection = None;
        self.rejection = None;

        info!(
            folders = self.items.len(),
            orphans = self.report.orphans.len(),
            cycles = self.report.cycles.len(),
            "Folder tree loaded"
        );
        &self.report
    }

    /// Canonical pre-order list, collapsed folders included.
    pub fn canonical(&self) -> &[FlattenedItem] {
        &self.items
    }

    /// Recovery report of the last load.
    pub fn build_report(&self) -> &BuildReport {
        &self.report
    }

    /// The folders as a nested forest.
    pub fn tree(&self) -> FolderTree {
        let records: Vec<FolderNode> = self.items.iter().map(|item| item.folder.clone()).collect();
        FolderTree::from_roots(build_tree(&records))
    }

    pub fn get(&self, id: FolderId) -> Option<&FlattenedItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Rows to render: collapsed subtrees and the dragged folder's
    /// descendants removed.
    pub fn visible_order(&self) -> Vec<FlattenedItem> {
        self.visible_while_dragging(self.session.active_id())
    }

    fn visible_while_dragging(&self, active_id: Option<FolderId>) -> Vec<FlattenedItem> {
        let mut hidden = collapsed_ids(&self.items);
        hidden.extend(active_id);
        remove_children_of(&self.items, &hidden)
    }

    /// Flips the expanded state of a folder, returning the new state.
    pub fn toggle_open(&mut self, id: FolderId) -> AppResult<bool> {
        let item = self.item_mut(id)?;
        item.folder.is_open = !item.folder.is_open;
        let is_open = item.folder.is_open;
        self.refresh_projection();
        Ok(is_open)
    }

    pub fn set_open(&mut self, id: FolderId, is_open: bool) -> AppResult<()> {
        self.item_mut(id)?.folder.is_open = is_open;
        self.refresh_projection();
        Ok(())
    }

    pub fn expand_all(&mut self) {
        self.items.iter_mut().for_each(|item| item.folder.is_open = true);
        self.refresh_projection();
    }

    pub fn collapse_all(&mut self) {
        self.items.iter_mut().for_each(|item| item.folder.is_open = false);
        self.refresh_projection();
    }

    /// Folders from the root down to `id`, inclusive.
    pub fn breadcrumbs(&self, id: FolderId) -> AppResult<Vec<FolderNode>> {
        let by_id: HashMap<FolderId, &FlattenedItem> =
            self.items.iter().map(|item| (item.id(), item)).collect();

        let mut trail = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let item = by_id
                .get(&current)
                .ok_or_else(|| AppError::not_found(format!("Folder {current} not found")))?;
            trail.push(item.folder.clone());
            cursor = item.parent_id;
            if trail.len() > self.items.len() {
                return Err(AppError::internal("Parent chain does not terminate"));
            }
        }
        trail.reverse();
        Ok(trail)
    }

    /// Every folder that a cascading delete of `id` would remove, `id` excluded.
    pub fn descendant_ids(&self, id: FolderId) -> Vec<FolderId> {
        descendant_ids(&self.items, id)
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// The live drop preview, if the current position is a valid drop.
    pub fn projection(&self) -> Option<Projection> {
        self.projection
    }

    /// Why the current position is not a valid drop, if it is not.
    pub fn rejection(&self) -> Option<RejectReason> {
        self.rejection
    }

    /// Pointer pressed on a folder row. Returns false for rows that can
    /// never be dragged.
    pub fn pointer_down(&mut self, id: FolderId, position: PointerPosition) -> bool {
        if !self.is_draggable(id) {
            return false;
        }
        self.session.pointer_down(id, position)
    }

    /// Pointer moved anywhere. Activates a pending drag once it travelled
    /// far enough and keeps the projection current.
    pub fn pointer_move(&mut self, position: PointerPosition) -> PointerMove {
        let moved = self.session.pointer_move(position);
        if matches!(moved, PointerMove::Activated(_) | PointerMove::Dragged { .. }) {
            self.refresh_projection();
        }
        moved
    }

    /// Pointer released: a click before activation, a drop after.
    pub async fn pointer_up(&mut self) -> AppResult<ReleaseOutcome> {
        if self.session.is_dragging() {
            let outcome = self.on_drag_end().await?;
            return Ok(ReleaseOutcome::Drop { outcome });
        }
        match self.session.pointer_up() {
            PointerRelease::Click(id) => Ok(ReleaseOutcome::Click { id }),
            _ => Ok(ReleaseOutcome::Idle),
        }
    }

    /// Starts dragging `id` without an activation distance.
    pub fn on_drag_start(&mut self, id: FolderId) -> bool {
        if !self.is_draggable(id) || !self.session.start(id) {
            return false;
        }
        debug!(folder_id = %id, "Drag started");
        self.refresh_projection();
        true
    }

    /// The row under the pointer changed. `None` is outside the list.
    pub fn on_drag_over(&mut self, over_id: Option<FolderId>) {
        if self.session.over(over_id) {
            self.refresh_projection();
        }
    }

    /// Horizontal travel since the drag began, in pixels.
    pub fn on_drag_move(&mut self, offset_x: f64) {
        if self.session.moved(offset_x) {
            self.refresh_projection();
        }
    }

    pub fn on_drag_cancel(&mut self) -> DropOutcome {
        self.session.cancel();
        self.projection = None;
        self.rejection = None;
        DropOutcome::Cancelled
    }

    /// Ends the drag and commits the drop, if it is valid.
    ///
    /// The local list is updated first, then the new parent is written to
    /// the store. If every attempt fails, the local change is reverted when
    /// `persistence.revert_on_failure` is set and the error is returned;
    /// otherwise the change is kept and reported as not persisted.
    pub async fn on_drag_end(&mut self) -> AppResult<DropOutcome> {
        self.projection = None;
        self.rejection = None;

        let commit = match self.session.end() {
            DragEnd::Commit(commit) => commit,
            DragEnd::Cancelled => return Ok(DropOutcome::Cancelled),
        };

        let visible = self.visible_while_dragging(Some(commit.active_id));
        let Some(projection) = project(
            &visible,
            commit.active_id,
            commit.over_id,
            commit.offset_x,
            self.tree_config.indent_width_px,
        ) else {
            return Ok(DropOutcome::Cancelled);
        };

        if let Err(reason) = check_drop(&self.items, commit.active_id, &projection) {
            info!(folder_id = %commit.active_id, %reason, "Drop rejected");
            return Ok(DropOutcome::Rejected {
                id: commit.active_id,
                reason,
            });
        }

        let result = apply_move(&self.items, commit.active_id, commit.over_id, &projection)?;
        if !result.changed {
            return Ok(DropOutcome::Unchanged { id: result.id });
        }

        let snapshot = std::mem::replace(&mut self.items, result.items);
        info!(
            folder_id = %result.id,
            parent = ?result.parent,
            previous_parent = ?result.previous_parent,
            "Folder moved"
        );

        match self.persist_parent(result.id, result.parent).await {
            Ok(()) => {
                self.persist_order().await;
                Ok(DropOutcome::Moved {
                    id: result.id,
                    parent: result.parent,
                    previous_parent: result.previous_parent,
                    persisted: true,
                })
            }
            Err(e) if self.persistence.revert_on_failure => {
                warn!(folder_id = %result.id, error = %e, "Reverting folder move");
                self.items = snapshot;
                Err(e)
            }
            Err(e) => {
                error!(folder_id = %result.id, error = %e, "Folder move kept but not persisted");
                Ok(DropOutcome::Moved {
                    id: result.id,
                    parent: result.parent,
                    previous_parent: result.previous_parent,
                    persisted: false,
                })
            }
        }
    }

    async fn persist_parent(&self, id: FolderId, parent: Option<FolderId>) -> AppResult<()> {
        let attempts = self.persistence.max_attempts.max(1);
        let backoff = Duration::from_millis(self.persistence.retry_backoff_ms);

        let mut attempt = 1;
        loop {
            match self.store.update_parent(id, parent).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < attempts => {
                    warn!(folder_id = %id, attempt, error = %e, "Parent update failed, retrying");
                    attempt += 1;
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => {
                    return Err(AppError::with_source(
                        ErrorKind::Persistence,
                        format!("Failed to persist parent of folder {id} after {attempts} attempt(s)"),
                        e,
                    ));
                }
            }
        }
    }

    async fn persist_order(&self) {
        let order: Vec<FolderId> = self.items.iter().map(FlattenedItem::id).collect();
        if let Err(e) = self.store.save_order(&order).await {
            warn!(error = %e, "Failed to persist folder order");
        }
    }

    fn is_draggable(&self, id: FolderId) -> bool {
        if id.is_sentinel() {
            debug!(folder_id = %id, "Pseudo-folders cannot be dragged");
            return false;
        }
        if self.get(id).is_none() {
            debug!(folder_id = %id, "Unknown folder cannot be dragged");
            return false;
        }
        true
    }

    fn item_mut(&mut self, id: FolderId) -> AppResult<&mut FlattenedItem> {
        self.items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    fn refresh_projection(&mut self) {
        self.projection = None;
        self.rejection = None;

        let (Some(active_id), Some(over_id)) = (self.session.active_id(), self.session.over_id())
        else {
            return;
        };

        let visible = self.visible_order();
        let Some(projection) = project(
            &visible,
            active_id,
            over_id,
            self.session.offset_x(),
            self.tree_config.indent_width_px,
        ) else {
            return;
        };

        match check_drop(&self.items, active_id, &projection) {
            Ok(()) => self.projection = Some(projection),
            Err(reason) => {
                debug!(folder_id = %active_id, %reason, "Projection rejected");
                self.rejection = Some(reason);
            }
        }
    }
}
