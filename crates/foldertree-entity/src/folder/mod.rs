//! Folder domain entities.

pub mod flat;
pub mod model;
pub mod projection;
pub mod tree;

pub use flat::FlattenedItem;
pub use model::{FolderMeta, FolderNode};
pub use projection::Projection;
pub use tree::{FolderTree, TreeNode};
