//! Core traits defined in `foldertree-core` and implemented by other crates.

pub mod store;

pub use store::FolderStore;
