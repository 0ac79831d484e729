//! The anchor path: root-to-selection chain that drives column contents.
//!
//! `path[0]` is always the tree root. Every later entry `path[k]` is the
//! *anchor* of column `k`: that column shows `path[k].children`. Column 0 is
//! special and shows the root itself (or, for a synthetic root, the root's
//! children).
//!
//! # Invariants
//! - Never empty (enforced by construction: the only constructors are
//!   [`seed`] and [`AnchorPath::drilled`]).
//! - Entries are shared handles into the caller's tree; nothing here mutates
//!   a node.

use crate::model::{NavigationError, NodeId, NodeRef};
use std::sync::Arc;

/// Non-empty root-to-selection chain of node handles.
///
/// Equality is identity-based: two paths are equal when they hold the very
/// same node handles in the same order.
#[derive(Debug, Clone)]
pub struct AnchorPath(Vec<NodeRef>);

/// Build the initial path for a freshly supplied root.
///
/// - no root: no path
/// - synthetic root: `[root, first child with declared descendants]`, or just
///   `[root]` when no child declares any
/// - ordinary root: `[root, root]`, so column 0 shows the root on its own and
///   column 1 shows its direct children
pub fn seed(root: Option<NodeRef>) -> Option<AnchorPath> {
    let root = root?;
    if root.is_synthetic_root() {
        let first_expandable = root.children().iter().find(|c| c.is_expandable()).cloned();
        return Some(match first_expandable {
            Some(child) => AnchorPath(vec![root, child]),
            None => AnchorPath(vec![root]),
        });
    }
    Some(AnchorPath(vec![Arc::clone(&root), root]))
}

impl AnchorPath {
    /// First entry: the tree root.
    pub fn root(&self) -> &NodeRef {
        &self.0[0]
    }

    /// Deepest anchor.
    pub fn last(&self) -> &NodeRef {
        &self.0[self.0.len() - 1]
    }

    /// Number of entries, which is also the number of columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&NodeRef> {
        self.0.get(index)
    }

    /// All entries, root first.
    pub fn nodes(&self) -> &[NodeRef] {
        &self.0
    }

    /// Ids of all entries, root first.
    pub fn ids(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.0.iter().map(|n| n.id())
    }

    /// Id of the entry one past `column`: the node highlighted in that column.
    pub fn active_id(&self, column: usize) -> Option<&NodeId> {
        self.0.get(column + 1).map(|n| n.id())
    }

    /// The path after clicking `node` in `column`.
    ///
    /// Keeps `path[0..=column]`, drops every deeper anchor and appends `node`.
    ///
    /// # Errors
    ///
    /// [`NavigationError::InvalidColumnIndex`] when `column >= len()`.
    pub fn drilled(&self, node: NodeRef, column: usize) -> Result<AnchorPath, NavigationError> {
        if column >= self.0.len() {
            return Err(NavigationError::InvalidColumnIndex {
                index: column,
                path_len: self.0.len(),
            });
        }
        let mut next = Vec::with_capacity(column + 2);
        next.extend(self.0[..=column].iter().cloned());
        next.push(node);
        Ok(AnchorPath(next))
    }

    /// In-place variant of [`AnchorPath::drilled`]. Leaves the path untouched
    /// on error.
    pub fn drill(&mut self, node: NodeRef, column: usize) -> Result<(), NavigationError> {
        if column >= self.0.len() {
            return Err(NavigationError::InvalidColumnIndex {
                index: column,
                path_len: self.0.len(),
            });
        }
        self.0.truncate(column + 1);
        self.0.push(node);
        Ok(())
    }

    /// Which columns render narrow.
    pub fn compaction(&self) -> Compaction {
        Compaction::for_path(self)
    }
}

impl PartialEq for AnchorPath {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().zip(&other.0).all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl Eq for AnchorPath {}

/// Per-column compaction flags derived from a path.
///
/// The last `cutoff` columns always render full width; everything before
/// them is compact. `cutoff` is 3 when the deepest anchor is a leaf (its own
/// column is empty, so one more ancestor stays wide) and 2 otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compaction {
    path_len: usize,
    cutoff: usize,
}

impl Compaction {
    /// Full-width columns when the deepest anchor is a leaf.
    pub const LEAF_CUTOFF: usize = 3;
    /// Full-width columns otherwise.
    pub const BRANCH_CUTOFF: usize = 2;

    /// Flags for `path`.
    pub fn for_path(path: &AnchorPath) -> Self {
        let cutoff = if path.last().is_leaf() {
            Self::LEAF_CUTOFF
        } else {
            Self::BRANCH_CUTOFF
        };
        Self {
            path_len: path.len(),
            cutoff,
        }
    }

    /// How many trailing columns stay full width.
    pub fn cutoff(&self) -> usize {
        self.cutoff
    }

    /// `column < path_len - cutoff`, without underflow.
    pub fn is_compact(&self, column: usize) -> bool {
        column + self.cutoff < self.path_len
    }
}
