//! Deterministic grid layout for rendered columns.
//!
//! [`GridLayout`] places columns side by side and stacks cards top-down
//! inside each column. Compact columns are narrower than full ones. It implements [`MeasurementProvider`], so the
//! redraw cycle can route connectors against it without a real GUI.
//!
//! # Clamping Behavior
//! Each column keeps its own vertical scroll offset, clamped to
//! `[0, max(0, content_height - viewport_height)]`. A column whose node list
//! changes starts again at the top.

use crate::columns::Column;
use crate::geometry::Bounds;
use crate::model::NodeId;
use crate::redraw::MeasurementProvider;
use tracing::trace;

/// Space above the first card of a column.
pub const PADDING_TOP: f64 = 20.0;
/// Height of every card.
pub const CARD_HEIGHT: f64 = 54.0;
/// Vertical space between consecutive cards.
pub const CARD_GAP: f64 = 24.0;
/// Width of a full column.
pub const COLUMN_WIDTH: f64 = 300.0;
/// Width of a card in a full column, centered.
pub const CARD_WIDTH: f64 = 262.0;
/// Width of a compact column.
pub const COMPACT_COLUMN_WIDTH: f64 = 130.0;
/// Width of a card in a compact column, centered.
pub const COMPACT_CARD_WIDTH: f64 = 50.0;

/// Placement of one column.
#[derive(Debug, Clone, PartialEq)]
struct ColumnSlot {
    left: f64,
    compact: bool,
    ids: Vec<NodeId>,
    scroll: f64,
}

impl ColumnSlot {
    fn width(&self) -> f64 {
        if self.compact {
            COMPACT_COLUMN_WIDTH
        } else {
            COLUMN_WIDTH
        }
    }

    fn card_width(&self) -> f64 {
        if self.compact {
            COMPACT_CARD_WIDTH
        } else {
            CARD_WIDTH
        }
    }

    fn content_height(&self) -> f64 {
        content_height(self.ids.len())
    }
}

/// Height of a column holding `cards` cards, padding included.
pub fn content_height(cards: usize) -> f64 {
    if cards == 0 {
        return PADDING_TOP * 2.0;
    }
    let n = cards as f64;
    PADDING_TOP * 2.0 + n * CARD_HEIGHT + (n - 1.0) * CARD_GAP
}

/// Card positions for the columns of the last redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    viewport_height: f64,
    slots: Vec<ColumnSlot>,
}

impl GridLayout {
    /// Layout for a viewport of the given height (pixels).
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height: viewport_height.max(0.0),
            slots: Vec::new(),
        }
    }

    /// Visible height in pixels.
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Resize the viewport; offsets are re-clamped.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height.max(0.0);
        for index in 0..self.slots.len() {
            self.clamp_scroll(index);
        }
    }

    /// Number of columns placed by the last settle.
    pub fn column_count(&self) -> usize {
        self.slots.len()
    }

    /// Left edge of a column.
    pub fn column_left(&self, column: usize) -> Option<f64> {
        self.slots.get(column).map(|s| s.left)
    }

    /// Total width of all columns.
    pub fn total_width(&self) -> f64 {
        self.slots.last().map_or(0.0, |s| s.left + s.width())
    }

    /// Height of the tallest column, never less than the viewport.
    pub fn total_height(&self) -> f64 {
        self.slots
            .iter()
            .map(ColumnSlot::content_height)
            .fold(self.viewport_height, f64::max)
    }

    /// Current vertical scroll of a column (0 for unknown columns).
    pub fn scroll_offset(&self, column: usize) -> f64 {
        self.slots.get(column).map_or(0.0, |s| s.scroll)
    }

    /// Scroll a column by `dy` pixels (positive scrolls content up).
    ///
    /// Returns `true` when the offset actually changed, which callers turn
    /// into a layout invalidation.
    pub fn scroll_by(&mut self, column: usize, dy: f64) -> bool {
        let Some(slot) = self.slots.get_mut(column) else {
            return false;
        };
        let before = slot.scroll;
        slot.scroll += dy;
        self.clamp_scroll(column);
        let changed = self.slots[column].scroll != before;
        if changed {
            trace!(column, offset = self.slots[column].scroll, "Column scrolled");
        }
        changed
    }

    fn max_scroll(&self, slot: &ColumnSlot) -> f64 {
        (slot.content_height() - self.viewport_height).max(0.0)
    }

    fn clamp_scroll(&mut self, column: usize) {
        let max = self.max_scroll(&self.slots[column]);
        let slot = &mut self.slots[column];
        if !slot.scroll.is_finite() {
            slot.scroll = 0.0;
        }
        slot.scroll = slot.scroll.clamp(0.0, max);
    }

    /// Recompute column placement for freshly rendered columns.
    fn arrange(&mut self, columns: &[Column<'_>]) {
        let mut left = 0.0;
        let mut slots = Vec::with_capacity(columns.len());
        for column in columns {
            let ids: Vec<NodeId> = column.nodes.iter().map(|n| n.id().clone()).collect();
            let scroll = match self.slots.get(column.index) {
                Some(old) if old.ids == ids => old.scroll,
                _ => 0.0,
            };
            let slot = ColumnSlot {
                left,
                compact: column.is_compact,
                ids,
                scroll,
            };
            left += slot.width();
            slots.push(slot);
        }
        self.slots = slots;
        for index in 0..self.slots.len() {
            self.clamp_scroll(index);
        }
    }
}

impl MeasurementProvider for GridLayout {
    fn settle(&mut self, columns: &[Column<'_>]) {
        self.arrange(columns);
    }

    fn measure(&self, column: usize, node: &NodeId) -> Option<Bounds> {
        let slot = self.slots.get(column)?;
        let row = slot.ids.iter().position(|id| id == node)?;
        let card_width = slot.card_width();
        let unscrolled = Bounds::new(
            slot.left + (slot.width() - card_width) / 2.0,
            PADDING_TOP + row as f64 * (CARD_HEIGHT + CARD_GAP),
            card_width,
            CARD_HEIGHT,
        );
        Some(unscrolled.translate(0.0, -slot.scroll))
    }
}
