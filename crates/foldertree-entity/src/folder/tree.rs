//! Folder tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use super::model::FolderNode;

/// A node in a folder tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// The folder record.
    #[serde(flatten)]
    pub folder: FolderNode,
    /// Child folder nodes, in sibling order.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a leaf node.
    pub fn leaf(folder: FolderNode) -> Self {
        Self {
            folder,
            children: Vec::new(),
        }
    }

    /// Append a child node.
    pub fn child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }
}

/// A complete folder forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderTree {
    /// The root node(s) of the tree.
    pub roots: Vec<TreeNode>,
    /// Total number of folders in the tree.
    pub total_folders: u64,
}

impl FolderTree {
    /// Create an empty folder tree.
    pub fn empty() -> Self {
        Self {
            roots: Vec::new(),
            total_folders: 0,
        }
    }

    /// Wrap a forest, counting its nodes.
    pub fn from_roots(roots: Vec<TreeNode>) -> Self {
        let total_folders = roots.iter().map(TreeNode::size).sum::<usize>() as u64;
        Self {
            roots,
            total_folders,
        }
    }
}
