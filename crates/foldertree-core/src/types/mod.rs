//! Core type definitions used across the folder tree workspace.

pub mod id;

pub use id::FolderId;
