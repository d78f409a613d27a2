//! Read-only folder tree commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use foldertree_core::config::AppConfig;
use foldertree_core::error::AppError;
use foldertree_core::types::FolderId;
use foldertree_entity::folder::FlattenedItem;

use crate::output::{self, OutputFormat};

/// Arguments for the `tree` command
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Show collapsed folders too
    #[arg(short, long)]
    pub all: bool,
}

/// Arguments for the `list` command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only rows the sidebar would render
    #[arg(short, long)]
    pub visible: bool,
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    id: i64,
    name: String,
    depth: usize,
    parent: String,
    locked: bool,
    open: bool,
    media: u64,
}

impl From<&FlattenedItem> for FolderRow {
    fn from(item: &FlattenedItem) -> Self {
        Self {
            id: item.id().get(),
            name: item.folder.name.clone(),
            depth: item.depth,
            parent: item
                .parent_id
                .map_or_else(|| "-".to_string(), |id| id.to_string()),
            locked: item.is_locked(),
            open: item.is_open(),
            media: item.folder.attachment_count,
        }
    }
}

#[derive(Debug, Serialize)]
struct CheckReport {
    folders: usize,
    orphans: Vec<FolderId>,
    cycles: Vec<FolderId>,
    duplicates: Vec<FolderId>,
}

/// Print the sidebar tree
pub async fn tree(args: &TreeArgs, config: &AppConfig) -> Result<(), AppError> {
    let mut service = super::open_service(config).await?;
    if args.all {
        service.expand_all();
    }

    let rows = service.visible_order();
    if rows.is_empty() {
        println!("No folders.");
        return Ok(());
    }
    for item in &rows {
        let marker = if service.descendant_ids(item.id()).is_empty() {
            " "
        } else if item.is_open() {
            "▾"
        } else {
            "▸"
        };
        let lock = if item.is_locked() { " [locked]" } else { "" };
        println!(
            "{}{} {} (#{}){}",
            "  ".repeat(item.depth),
            marker,
            item.folder.name,
            item.id(),
            lock
        );
    }
    Ok(())
}

/// List folders in pre-order
pub async fn list(args: &ListArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let service = super::open_service(config).await?;
    let rows: Vec<FolderRow> = if args.visible {
        service.visible_order().iter().map(FolderRow::from).collect()
    } else {
        service.canonical().iter().map(FolderRow::from).collect()
    };
    output::print_list(&rows, format);
    Ok(())
}

/// Report what loading the records had to repair
pub async fn check(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let service = super::open_service(config).await?;
    let report = service.build_report();
    let summary = CheckReport {
        folders: service.canonical().len(),
        orphans: report.orphans.clone(),
        cycles: report.cycles.clone(),
        duplicates: report.duplicates.clone(),
    };

    if format == OutputFormat::Json {
        output::print_item(&summary, format);
        return Ok(());
    }

    output::print_kv("Folders", &summary.folders.to_string());
    output::print_kv("Orphans", &summary.orphans.len().to_string());
    output::print_kv("Cycles", &summary.cycles.len().to_string());
    output::print_kv("Duplicates", &summary.duplicates.len().to_string());
    if report.is_clean() {
        output::print_success("Folder records form a valid tree");
    } else {
        for id in &summary.orphans {
            output::print_warning(&format!("Folder {id} has a missing parent, shown at root"));
        }
        for id in &summary.cycles {
            output::print_warning(&format!("Folder {id} is on a parent cycle, shown at root"));
        }
        for id in &summary.duplicates {
            output::print_warning(&format!("Folder id {id} appears more than once"));
        }
    }
    Ok(())
}
