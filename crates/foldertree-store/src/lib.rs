//! # foldertree-store
//!
//! [`FolderStore`](foldertree_core::traits::FolderStore) implementations:
//! an in-memory store for tests and embedding, and a JSON file store used
//! by the command-line tool.

pub mod providers;

pub use providers::{JsonFileStore, MemoryFolderStore};
