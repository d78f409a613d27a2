//! Conversion between flat folder records and the nested tree.
//!
//! The canonical in-memory form is a flat `Vec` in pre-order with
//! `id`/`parent` links. Nested [`TreeNode`]s are derived on demand and
//! never hold references into each other.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use foldertree_core::types::FolderId;
use foldertree_entity::folder::{FlattenedItem, FolderNode, TreeNode};

/// Recovery actions taken while building a tree from untrusted records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Records whose parent id matched no record. Promoted to roots.
    pub orphans: Vec<FolderId>,
    /// Records on a parent cycle, promoted to roots to break it.
    pub cycles: Vec<FolderId>,
    /// Repeated ids. Only the first record with a given id is kept.
    pub duplicates: Vec<FolderId>,
}

impl BuildReport {
    /// Whether the input was a well-formed forest.
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty() && self.cycles.is_empty() && self.duplicates.is_empty()
    }
}

/// Flatten a forest into pre-order rows, starting at depth 0 with no parent.
pub fn flatten_tree(roots: &[TreeNode]) -> Vec<FlattenedItem> {
    flatten_subtree(roots, None, 0)
}

/// Flatten `nodes` as the children of `parent_id` sitting at `depth`.
///
/// Each row's parent is taken from its position in the tree, not from the
/// record, so the output always satisfies the depth invariant.
pub fn flatten_subtree(
    nodes: &[TreeNode],
    parent_id: Option<FolderId>,
    depth: usize,
) -> Vec<FlattenedItem> {
    let mut out = Vec::with_capacity(nodes.iter().map(TreeNode::size).sum());
    flatten_into(nodes, parent_id, depth, &mut out);
    out
}

fn flatten_into(
    nodes: &[TreeNode],
    parent_id: Option<FolderId>,
    depth: usize,
    out: &mut Vec<FlattenedItem>,
) {
    for node in nodes {
        let mut folder = node.folder.clone();
        folder.parent = parent_id;
        out.push(FlattenedItem::new(folder, depth));
        flatten_into(&node.children, Some(node.folder.id), depth + 1, out);
    }
}

/// Build a forest from records carrying `parent` links.
///
/// Children keep the relative order in which they appear in `records`.
/// A record whose parent does not exist is treated as a root.
pub fn build_tree(records: &[FolderNode]) -> Vec<TreeNode> {
    build_tree_with_report(records).0
}

/// Same as [`build_tree`], also reporting every recovery it performed.
pub fn build_tree_with_report(records: &[FolderNode]) -> (Vec<TreeNode>, BuildReport) {
    let mut report = BuildReport::default();

    let mut index: HashMap<FolderId, usize> = HashMap::with_capacity(records.len());
    let mut kept: Vec<usize> = Vec::with_capacity(records.len());
    for (ix, record) in records.iter().enumerate() {
        if index.contains_key(&record.id) {
            warn!(folder_id = %record.id, "Duplicate folder id dropped");
            report.duplicates.push(record.id);
            continue;
        }
        index.insert(record.id, ix);
        kept.push(ix);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut parent_of: Vec<Option<usize>> = vec![None; records.len()];
    let mut roots: Vec<usize> = Vec::new();
    let mut promoted: HashSet<usize> = HashSet::new();

    for &ix in &kept {
        let record = &records[ix];
        match record.parent {
            None => roots.push(ix),
            Some(parent) => match index.get(&parent) {
                Some(&parent_ix) => {
                    children[parent_ix].push(ix);
                    parent_of[ix] = Some(parent_ix);
                }
                None => {
                    warn!(
                        folder_id = %record.id,
                        parent_id = %parent,
                        "Orphaned folder promoted to root"
                    );
                    report.orphans.push(record.id);
                    promoted.insert(ix);
                    roots.push(ix);
                }
            },
        }
    }

    // Whatever is unreachable from a root hangs off a parent cycle.
    let mut reached = vec![false; records.len()];
    for &root in &roots {
        mark_reachable(root, &children, &mut reached);
    }
    for &ix in &kept {
        if reached[ix] {
            continue;
        }
        if let Some(parent_ix) = parent_of[ix].take() {
            children[parent_ix].retain(|&child| child != ix);
        }
        warn!(folder_id = %records[ix].id, "Folder on a parent cycle promoted to root");
        report.cycles.push(records[ix].id);
        promoted.insert(ix);
        roots.push(ix);
        mark_reachable(ix, &children, &mut reached);
    }

    let forest = roots
        .iter()
        .map(|&ix| assemble(ix, records, &children, &promoted))
        .collect();
    (forest, report)
}

fn mark_reachable(start: usize, children: &[Vec<usize>], reached: &mut [bool]) {
    let mut stack = vec![start];
    while let Some(ix) = stack.pop() {
        if reached[ix] {
            continue;
        }
        reached[ix] = true;
        stack.extend(children[ix].iter().copied());
    }
}

fn assemble(
    ix: usize,
    records: &[FolderNode],
    children: &[Vec<usize>],
    promoted: &HashSet<usize>,
) -> TreeNode {
    let mut folder = records[ix].clone();
    if promoted.contains(&ix) {
        folder.parent = None;
    }
    TreeNode {
        folder,
        children: children[ix]
            .iter()
            .map(|&child| assemble(child, records, children, promoted))
            .collect(),
    }
}

/// Build then flatten: the canonical pre-order for a set of records.
pub fn flatten_records(records: &[FolderNode]) -> (Vec<FlattenedItem>, BuildReport) {
    let (forest, report) = build_tree_with_report(records);
    (flatten_tree(&forest), report)
}

/// One past the last descendant of the row at `start`.
pub fn subtree_end(items: &[FlattenedItem], start: usize) -> usize {
    let Some(root) = items.get(start) else {
        return start;
    };
    let mut ix = start + 1;
    while ix < items.len() && items[ix].depth > root.depth {
        ix += 1;
    }
    ix
}

/// Ids of every descendant of `id`, in pre-order.
pub fn descendant_ids(items: &[FlattenedItem], id: FolderId) -> Vec<FolderId> {
    let Some(start) = items.iter().position(|item| item.id() == id) else {
        return Vec::new();
    };
    items[start + 1..subtree_end(items, start)]
        .iter()
        .map(FlattenedItem::id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folder::collapse::{collapsed_ids, remove_children_of};
    use crate::folder::fixtures::{folder, ids};

    fn sample() -> Vec<TreeNode> {
        // 1
        // ├── 2
        // │   └── 3
        // └── 4
        // 5
        vec![
            TreeNode::leaf(folder(1, None))
                .child(TreeNode::leaf(folder(2, Some(1))).child(TreeNode::leaf(folder(3, Some(2)))))
                .child(TreeNode::leaf(folder(4, Some(1)))),
            TreeNode::leaf(folder(5, None)),
        ]
    }

    #[test]
    fn test_flatten_is_preorder() {
        let flat = flatten_tree(&sample());
        assert_eq!(ids(&flat), vec![1, 2, 3, 4, 5]);
        let depths: Vec<usize> = flat.iter().map(|item| item.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 1, 0]);
        assert_eq!(flat[2].parent_id, Some(FolderId(2)));
        assert_eq!(flat[2].folder.parent, Some(FolderId(2)));
    }

    #[test]
    fn test_flatten_subtree_offsets_depth() {
        let roots = sample();
        let flat = flatten_subtree(&roots[0].children, Some(FolderId(1)), 1);
        assert_eq!(ids(&flat), vec![2, 3, 4]);
        assert_eq!(flat[0].depth, 1);
        assert_eq!(flat[0].parent_id, Some(FolderId(1)));
    }

    #[test]
    fn test_depth_invariant_holds() {
        let flat = flatten_tree(&sample());
        let depth_of: HashMap<FolderId, usize> =
            flat.iter().map(|item| (item.id(), item.depth)).collect();
        for item in &flat {
            match item.parent_id {
                None => assert_eq!(item.depth, 0),
                Some(parent) => assert_eq!(item.depth, depth_of[&parent] + 1),
            }
        }
    }

    #[test]
    fn test_round_trip() {
        let flat = flatten_tree(&sample());
        let records: Vec<FolderNode> = flat.iter().map(|item| item.folder.clone()).collect();
        let rebuilt = flatten_tree(&build_tree(&records));
        assert_eq!(rebuilt, flat);
    }

    /// `size` parent-linked records, each parented to an earlier folder or
    /// the root. Roughly a third of the folders are collapsed.
    fn generated_records(size: i64, seed: i64) -> Vec<FolderNode> {
        (1..=size)
            .map(|id| {
                let pick = (id * 7 + seed * 13) % id;
                folder(id, (pick > 0).then_some(pick)).open((id + seed) % 3 != 0)
            })
            .collect()
    }

    #[test]
    fn test_round_trip_over_generated_forests() {
        for size in 1..=14 {
            for seed in 0..8 {
                let records = generated_records(size, seed);
                let (forest, report) = build_tree_with_report(&records);
                assert!(report.is_clean(), "size {size} seed {seed}");

                let flat = flatten_tree(&forest);
                assert_eq!(flat.len(), size as usize);

                let rebuilt: Vec<FolderNode> = flat.iter().map(|item| item.folder.clone()).collect();
                assert_eq!(flatten_tree(&build_tree(&rebuilt)), flat, "size {size} seed {seed}");

                let depth_of: HashMap<FolderId, usize> =
                    flat.iter().map(|item| (item.id(), item.depth)).collect();
                for item in &flat {
                    match item.parent_id {
                        None => assert_eq!(item.depth, 0),
                        Some(parent) => assert_eq!(item.depth, depth_of[&parent] + 1),
                    }
                }

                // Visible rows are exactly those whose ancestors are all open.
                let open_of: HashMap<FolderId, (bool, Option<FolderId>)> = flat
                    .iter()
                    .map(|item| (item.id(), (item.is_open(), item.parent_id)))
                    .collect();
                let expected: Vec<i64> = flat
                    .iter()
                    .filter(|item| {
                        let mut cursor = item.parent_id;
                        while let Some(ancestor) = cursor {
                            let (is_open, parent) = open_of[&ancestor];
                            if !is_open {
                                return false;
                            }
                            cursor = parent;
                        }
                        true
                    })
                    .map(|item| item.id().0)
                    .collect();
                let visible = remove_children_of(&flat, &collapsed_ids(&flat));
                assert_eq!(ids(&visible), expected, "size {size} seed {seed}");
            }
        }
    }

    #[test]
    fn test_build_groups_children_in_input_order() {
        // Children listed before their parent still end up nested.
        let records = vec![
            folder(3, Some(1)),
            folder(1, None),
            folder(2, Some(1)),
        ];
        let forest = build_tree(&records);
        assert_eq!(forest.len(), 1);
        let child_ids: Vec<i64> = forest[0].children.iter().map(|c| c.folder.id.0).collect();
        assert_eq!(child_ids, vec![3, 2]);
    }

    #[test]
    fn test_orphan_becomes_root() {
        let records = vec![folder(1, None), folder(2, Some(99))];
        let (forest, report) = build_tree_with_report(&records);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[1].folder.parent, None);
        assert_eq!(report.orphans, vec![FolderId(2)]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_cycle_is_broken() {
        // 2 -> 3 -> 2 with nothing reaching them from a root.
        let records = vec![folder(1, None), folder(2, Some(3)), folder(3, Some(2))];
        let (forest, report) = build_tree_with_report(&records);
        let flat = flatten_tree(&forest);
        assert_eq!(flat.len(), 3);
        assert_eq!(report.cycles, vec![FolderId(2)]);
        assert_eq!(ids(&flat), vec![1, 2, 3]);
        assert_eq!(flat[2].depth, 1);
    }

    #[test]
    fn test_self_parent_is_a_cycle() {
        let records = vec![folder(7, Some(7))];
        let (forest, report) = build_tree_with_report(&records);
        assert_eq!(forest.len(), 1);
        assert!(forest[0].children.is_empty());
        assert_eq!(report.cycles, vec![FolderId(7)]);
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let records = vec![folder(1, None), folder(1, None)];
        let (forest, report) = build_tree_with_report(&records);
        assert_eq!(forest.len(), 1);
        assert_eq!(report.duplicates, vec![FolderId(1)]);
    }

    #[test]
    fn test_descendants() {
        let flat = flatten_tree(&sample());
        assert_eq!(descendant_ids(&flat, FolderId(1)), vec![FolderId(2), FolderId(3), FolderId(4)]);
        assert!(descendant_ids(&flat, FolderId(5)).is_empty());
        assert!(descendant_ids(&flat, FolderId(42)).is_empty());
        assert_eq!(subtree_end(&flat, 1), 3);
    }
}
