//! # foldertree-entity
//!
//! Value types shared by the folder tree engine, the stores, and the
//! command-line tool. Every struct derives `Debug`, `Clone`, `Serialize`
//! and `Deserialize`; field names follow the REST payloads of the media
//! library (`attachmentCount`, `isOpen`).

pub mod folder;

pub use folder::{FlattenedItem, FolderMeta, FolderNode, FolderTree, Projection, TreeNode};
