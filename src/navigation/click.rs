//! Scripted clicks (`COL:ID`) for driving navigation from the command line.

use super::controller::NavigationController;
use crate::model::{NodeId, NodeRef};
use std::str::FromStr;
use thiserror::Error;

/// Errors parsing or applying a scripted click.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClickError {
    /// Not of the form `COL:ID`.
    #[error("Malformed click '{0}': expected COLUMN:NODE_ID")]
    Malformed(String),

    /// The column is not currently rendered.
    #[error("Column {column} is not rendered (have {available} columns)")]
    NoSuchColumn {
        /// Requested column.
        column: usize,
        /// Rendered column count.
        available: usize,
    },

    /// No node with that id is shown in the column.
    #[error("Node '{id}' is not shown in column {column}")]
    UnknownNode {
        /// Column searched.
        column: usize,
        /// Id that was not found.
        id: NodeId,
    },
}

/// A click on the node `id` shown in `column`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickSpec {
    /// Column the card is shown in.
    pub column: usize,
    /// Id of the clicked node, taken verbatim.
    pub id: NodeId,
}

impl FromStr for ClickSpec {
    type Err = ClickError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ClickError::Malformed(s.to_string());
        let (column, id) = s.split_once(':').ok_or_else(malformed)?;
        let column = column.trim().parse().map_err(|_| malformed())?;
        let id = NodeId::new(id).map_err(|_| malformed())?;
        Ok(Self { column, id })
    }
}

impl ClickSpec {
    /// Find the clicked node among the nodes currently rendered in `column`.
    ///
    /// # Errors
    ///
    /// [`ClickError::NoSuchColumn`] or [`ClickError::UnknownNode`].
    pub fn resolve(&self, nav: &NavigationController) -> Result<NodeRef, ClickError> {
        let columns = nav.columns();
        let column = columns.get(self.column).ok_or(ClickError::NoSuchColumn {
            column: self.column,
            available: columns.len(),
        })?;
        column
            .find(&self.id)
            .cloned()
            .ok_or_else(|| ClickError::UnknownNode {
                column: self.column,
                id: self.id.clone(),
            })
    }
}
