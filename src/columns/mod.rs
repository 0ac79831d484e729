//! Column resolution: which nodes each column shows, and which is active.
//!
//! Pure functions of the anchor path. Nothing is cached, so callers may
//! re-resolve as often as they like.

use crate::model::{NodeId, NodeRef};
use crate::navigation::path::{AnchorPath, Compaction};
use std::slice;

/// Node list and highlighted id for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedColumn<'a> {
    /// Column position, 0 on the left.
    pub index: usize,
    /// Nodes shown, in render order.
    pub nodes: &'a [NodeRef],
    /// Id of the highlighted node, if any.
    pub active: Option<&'a NodeId>,
}

/// A column ready for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column<'a> {
    /// Column position, 0 on the left.
    pub index: usize,
    /// Nodes shown, in render order.
    pub nodes: &'a [NodeRef],
    /// Id of the highlighted node, if any.
    pub active: Option<&'a NodeId>,
    /// Rendered narrow with text suppressed.
    pub is_compact: bool,
}

impl<'a> Column<'a> {
    /// The rendered node matching the active id, if it is in this column.
    pub fn active_node(&self) -> Option<&'a NodeRef> {
        let active = self.active?;
        self.nodes.iter().find(|n| n.id() == active)
    }

    /// Whether `id` is this column's active node.
    pub fn is_active(&self, id: &NodeId) -> bool {
        self.active == Some(id)
    }

    /// Look up a shown node by id.
    pub fn find(&self, id: &NodeId) -> Option<&'a NodeRef> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// No nodes to show.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Resolve one entry per path element.
///
/// Column 0 shows `[root]`, or the root's children when the root is
/// synthetic. Column `k > 0` shows `path[k].children`. The active id of
/// column `k` is `path[k + 1].id`.
pub fn resolve_columns(path: &AnchorPath) -> Vec<ResolvedColumn<'_>> {
    path.nodes()
        .iter()
        .enumerate()
        .map(|(index, anchor)| {
            let nodes: &[NodeRef] = if index == 0 && !anchor.is_synthetic_root() {
                slice::from_ref(anchor)
            } else {
                anchor.children()
            };
            ResolvedColumn {
                index,
                nodes,
                active: path.active_id(index),
            }
        })
        .collect()
}

/// Resolve columns and attach compaction flags.
pub fn columns(path: &AnchorPath) -> Vec<Column<'_>> {
    let compaction: Compaction = path.compaction();
    resolve_columns(path)
        .into_iter()
        .map(|c| Column {
            index: c.index,
            nodes: c.nodes,
            active: c.active,
            is_compact: compaction.is_compact(c.index),
        })
        .collect()
}
