//! CLI command definitions and dispatch.

pub mod drag;
pub mod tree;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use foldertree_core::config::AppConfig;
use foldertree_core::error::AppError;
use foldertree_engine::FolderTreeService;
use foldertree_store::JsonFileStore;

use crate::output::OutputFormat;

/// Inspect and rearrange a media library's folder tree.
#[derive(Debug, Parser)]
#[command(name = "folder-tree", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "FOLDERTREE_CONFIG", default_value = "config/default.toml")]
    pub config: String,

    /// Folder records file, overriding `storage.folders_file`
    #[arg(long)]
    pub file: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the folder tree as the sidebar shows it
    Tree(tree::TreeArgs),
    /// List folders in pre-order with depth and parent
    List(tree::ListArgs),
    /// Report orphaned, cyclic, and duplicated folder records
    Check,
    /// Preview where a dragged folder would land
    Project(drag::DragArgs),
    /// Drag a folder and save the result
    Move(drag::DragArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let config = self.with_overrides(config);
        match &self.command {
            Commands::Tree(args) => tree::tree(args, &config).await,
            Commands::List(args) => tree::list(args, &config, self.format).await,
            Commands::Check => tree::check(&config, self.format).await,
            Commands::Project(args) => drag::project(args, &config, self.format).await,
            Commands::Move(args) => drag::apply(args, &config, self.format).await,
        }
    }

    fn with_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(file) = &self.file {
            config.storage.folders_file = file.clone();
        }
        config
    }
}

/// Helper: load the folder tree from the configured JSON file
pub async fn open_service(config: &AppConfig) -> Result<FolderTreeService, AppError> {
    let store = Arc::new(JsonFileStore::from_config(&config.storage));
    FolderTreeService::load(store, config).await
}
