//! Stateful owner of the anchor path.

use super::path::{seed, AnchorPath, Compaction};
use crate::columns::{self, Column};
use crate::model::{NavigationError, NodeRef};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Owns the anchor path and applies root changes and drill clicks to it.
///
/// The path is reseeded only when the root *handle* changes; handing the
/// same `Arc` in again (for example on every render) is a no-op.
///
/// # Cardinality
/// - No root: 1 state (no path)
/// - With root: one state per reachable anchor path
#[derive(Debug, Default, Clone)]
pub struct NavigationController {
    root: Option<NodeRef>,
    path: Option<AnchorPath>,
}

impl NavigationController {
    /// Controller with no tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller seeded with `root`.
    pub fn with_root(root: NodeRef) -> Self {
        let mut controller = Self::new();
        controller.set_root(Some(root));
        controller
    }

    /// Supply a (possibly new) root.
    ///
    /// Returns `true` when the root identity changed and the path was
    /// reseeded.
    pub fn set_root(&mut self, root: Option<NodeRef>) -> bool {
        let unchanged = match (&self.root, &root) {
            (None, None) => true,
            (Some(old), Some(new)) => Arc::ptr_eq(old, new),
            _ => false,
        };
        if unchanged {
            return false;
        }

        self.path = seed(root.clone());
        self.root = root;
        info!(
            root = self.root.as_ref().map(|r| r.id().as_str()),
            columns = self.path.as_ref().map_or(0, AnchorPath::len),
            "Anchor path seeded"
        );
        true
    }

    /// Apply a click on `node` in `column`.
    ///
    /// # Errors
    ///
    /// [`NavigationError::InvalidColumnIndex`] when `column` is not a
    /// rendered column (including when no tree is loaded). The path is left
    /// unchanged.
    pub fn drill(&mut self, node: NodeRef, column: usize) -> Result<(), NavigationError> {
        let Some(path) = self.path.as_mut() else {
            error!(column, "Drill requested with no tree loaded");
            return Err(NavigationError::InvalidColumnIndex {
                index: column,
                path_len: 0,
            });
        };
        if let Err(err) = path.drill(Arc::clone(&node), column) {
            error!(%err, "Drill rejected");
            return Err(err);
        }
        debug!(node = %node.id(), column, depth = path.len(), "Drilled");
        Ok(())
    }

    /// The tree last supplied.
    pub fn root(&self) -> Option<&NodeRef> {
        self.root.as_ref()
    }

    /// The current anchor path, absent with no tree.
    pub fn path(&self) -> Option<&AnchorPath> {
        self.path.as_ref()
    }

    /// Number of rendered columns (0 with no tree).
    pub fn column_count(&self) -> usize {
        self.path.as_ref().map_or(0, AnchorPath::len)
    }

    /// Compaction flags for the current path.
    pub fn compaction(&self) -> Option<Compaction> {
        self.path.as_ref().map(AnchorPath::compaction)
    }

    /// Whether `column` renders narrow.
    pub fn is_compact(&self, column: usize) -> bool {
        self.compaction().is_some_and(|c| c.is_compact(column))
    }

    /// Resolved columns for the current path.
    pub fn columns(&self) -> Vec<Column<'_>> {
        self.path.as_ref().map(columns::columns).unwrap_or_default()
    }
}
