//! Render sinks (impure edge of the redraw cycle).
//!
//! Both sinks snapshot what the redraw cycle hands them and produce their
//! document on `finish`:
//!
//! - [`SvgSink`]: an SVG drawing with cards and connector groups
//! - [`TextSink`]: a side-by-side text table plus a connector summary

pub mod svg;
pub mod text;

pub use svg::SvgSink;
pub use text::TextSink;

use crate::columns::Column;
use crate::model::NodeId;

/// Owned copy of one rendered card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSnapshot {
    /// Node id.
    pub id: NodeId,
    /// Display name.
    pub name: String,
    /// Optional job title.
    pub title: Option<String>,
    /// Whether the card is the column's active node.
    pub active: bool,
}

/// Owned copy of one rendered column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSnapshot {
    /// Column position, 0 on the left.
    pub index: usize,
    /// Rendered narrow.
    pub compact: bool,
    /// Cards top to bottom.
    pub cards: Vec<CardSnapshot>,
}

impl ColumnSnapshot {
    /// Copy a column handed to a sink.
    pub fn capture(column: &Column<'_>) -> Self {
        Self {
            index: column.index,
            compact: column.is_compact,
            cards: column
                .nodes
                .iter()
                .map(|node| CardSnapshot {
                    id: node.id().clone(),
                    name: node.name().to_string(),
                    title: node.title().map(str::to_string),
                    active: column.is_active(node.id()),
                })
                .collect(),
        }
    }

    /// Capture every column of a render call.
    pub fn capture_all(columns: &[Column<'_>]) -> Vec<Self> {
        columns.iter().map(Self::capture).collect()
    }
}
