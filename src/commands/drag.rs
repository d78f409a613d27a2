//! Drag simulation commands.

use clap::Args;
use serde::Serialize;

use foldertree_core::config::AppConfig;
use foldertree_core::error::AppError;
use foldertree_core::types::FolderId;
use foldertree_engine::{DropOutcome, FolderTreeService, RejectReason};
use foldertree_entity::folder::Projection;

use crate::output::{self, OutputFormat};

/// A drag described by its end state
#[derive(Debug, Args)]
pub struct DragArgs {
    /// Folder being dragged
    #[arg(short, long)]
    pub active: FolderId,
    /// Row under the pointer on release (defaults to the dragged row)
    #[arg(short, long)]
    pub over: Option<FolderId>,
    /// Horizontal pointer travel in pixels; negative is leftwards
    #[arg(short = 'x', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub offset: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Preview {
    active_id: FolderId,
    projection: Option<Projection>,
    rejected: Option<RejectReason>,
}

/// Start the drag and move it to the release position.
fn simulate(service: &mut FolderTreeService, args: &DragArgs) -> Result<(), AppError> {
    if !service.on_drag_start(args.active) {
        return Err(AppError::validation(format!(
            "Folder {} cannot be dragged",
            args.active
        )));
    }
    service.on_drag_over(Some(args.over.unwrap_or(args.active)));
    service.on_drag_move(args.offset);
    Ok(())
}

/// Preview the drop without saving
pub async fn project(
    args: &DragArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut service = super::open_service(config).await?;
    simulate(&mut service, args)?;

    let preview = Preview {
        active_id: args.active,
        projection: service.projection(),
        rejected: service.rejection(),
    };
    service.on_drag_cancel();

    if format == OutputFormat::Json {
        output::print_item(&preview, format);
        return Ok(());
    }

    match (preview.projection, preview.rejected) {
        (Some(projection), _) => {
            output::print_kv("Depth", &projection.depth.to_string());
            output::print_kv(
                "Parent",
                &projection
                    .parent_id
                    .map_or_else(|| "(root)".to_string(), |id| id.to_string()),
            );
            output::print_kv(
                "Allowed depths",
                &format!("{}..={}", projection.min_depth, projection.max_depth),
            );
        }
        (None, Some(reason)) => output::print_warning(&format!("Drop not allowed: {reason}")),
        (None, None) => output::print_warning("Release position is not a folder row"),
    }
    Ok(())
}

/// Drop the folder and save its new parent
pub async fn apply(
    args: &DragArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut service = super::open_service(config).await?;
    simulate(&mut service, args)?;
    let outcome = service.on_drag_end().await?;

    if format == OutputFormat::Json {
        output::print_item(&outcome, format);
        return Ok(());
    }

    match outcome {
        DropOutcome::Moved {
            id,
            parent,
            persisted,
            ..
        } => {
            let target = parent.map_or_else(|| "the root".to_string(), |p| format!("folder {p}"));
            if persisted {
                output::print_success(&format!("Moved folder {id} under {target}"));
            } else {
                output::print_warning(&format!(
                    "Moved folder {id} under {target}, but the change was not saved"
                ));
            }
        }
        DropOutcome::Unchanged { id } => {
            output::print_success(&format!("Folder {id} is already there"));
        }
        DropOutcome::Rejected { reason, .. } => {
            output::print_warning(&format!("Drop not allowed: {reason}"));
        }
        DropOutcome::Cancelled => output::print_warning("Drop cancelled"),
    }
    Ok(())
}
