//! Plain-text output: columns side by side, then one line per boundary.

use super::{CardSnapshot, ColumnSnapshot};
use crate::columns::Column;
use crate::redraw::RenderSink;
use crate::router::{ConnectorRoutes, ForkDirection};
use std::collections::BTreeMap;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a full column, in terminal cells.
pub const FULL_CELL_WIDTH: usize = 24;
/// Display width of a compact column.
pub const COMPACT_CELL_WIDTH: usize = 6;

const ACTIVE_MARKER: &str = "> ";
const PASSIVE_MARKER: &str = "  ";
const SEPARATOR: &str = " | ";

/// Collects columns and connectors, then writes a text table.
#[derive(Debug, Clone, Default)]
pub struct TextSink {
    columns: Vec<ColumnSnapshot>,
    connectors: BTreeMap<usize, ConnectorRoutes>,
}

impl TextSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the table and connector summary.
    pub fn finish(&self) -> String {
        let mut lines = Vec::new();

        let header: Vec<String> = self
            .columns
            .iter()
            .map(|c| pad(&format!("[{}]", c.index), cell_width(c)))
            .collect();
        lines.push(join_row(&header));

        let rows = self.columns.iter().map(|c| c.cards.len()).max().unwrap_or(0);
        for row in 0..rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|c| {
                    let width = cell_width(c);
                    c.cards
                        .get(row)
                        .map_or_else(|| " ".repeat(width), |card| card_cell(card, c.compact, width))
                })
                .collect();
            lines.push(join_row(&cells));
        }

        if !self.connectors.is_empty() {
            lines.push(String::new());
            lines.extend(
                self.connectors
                    .iter()
                    .map(|(boundary, routes)| connector_line(*boundary, routes)),
            );
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl RenderSink for TextSink {
    fn render_columns(&mut self, columns: &[Column<'_>]) {
        self.columns = ColumnSnapshot::capture_all(columns);
    }

    fn clear_connectors(&mut self) {
        self.connectors.clear();
    }

    fn draw_connectors(&mut self, boundary: usize, routes: &ConnectorRoutes) {
        self.connectors.insert(boundary, routes.clone());
    }
}

fn cell_width(column: &ColumnSnapshot) -> usize {
    if column.compact {
        COMPACT_CELL_WIDTH
    } else {
        FULL_CELL_WIDTH
    }
}

/// Join cells, dropping blank trailing cells and their separators.
///
/// Interior blank cells keep their padding so later columns stay aligned.
fn join_row(cells: &[String]) -> String {
    let Some(last) = cells.iter().rposition(|c| !c.trim().is_empty()) else {
        return String::new();
    };
    let mut row = cells[..=last].join(SEPARATOR);
    row.truncate(row.trim_end().len());
    row
}

/// Compact cards show a short id stub; full cards show name and title.
fn card_cell(card: &CardSnapshot, compact: bool, width: usize) -> String {
    let marker = if card.active {
        ACTIVE_MARKER
    } else {
        PASSIVE_MARKER
    };
    let label = if compact {
        card.id.as_str().to_string()
    } else {
        match &card.title {
            Some(title) => format!("{} ({title})", card.name),
            None => card.name.clone(),
        }
    };
    let room = width.saturating_sub(marker.width());
    pad(&format!("{marker}{}", truncate(&label, room)), width)
}

/// Cut `text` to at most `max` display cells, ending in `…` when cut.
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Right-pad to exactly `width` display cells (never truncates).
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn connector_line(boundary: usize, routes: &ConnectorRoutes) -> String {
    let rail = &routes.rail;
    let mut line = if rail.is_degenerate() {
        format!("{boundary}: straight y={}", rail.top)
    } else {
        format!("{boundary}: rail x={} y={}..{}", rail.x, rail.top, rail.bottom)
    };
    if let Some(active) = &routes.active {
        let direction = match active.direction {
            ForkDirection::Straight => "straight",
            ForkDirection::Down => "down",
            ForkDirection::Up => "up",
        };
        line.push_str(&format!(", active {} {direction}", active.target));
    }
    line
}
