//! Immutable geometry value types shared by layout, routing and rendering.
//!
//! Coordinates are screen pixels: `x` grows to the right, `y` grows
//! downwards.

pub mod route;

pub use route::{join_svg_paths, ArcSweep, Route, Segment, StrokeRole};

use crate::model::NodeId;

/// A position on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position, growing downwards.
    pub y: f64,
}

impl Point {
    /// Point at `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates rounded to whole pixels.
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// A child attachment point: its left edge at its vertical center, plus its
/// identity so the active child can be picked out.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildPoint {
    /// Left edge, vertical center.
    pub point: Point,
    /// The child's node id.
    pub id: NodeId,
}

impl ChildPoint {
    /// Attachment point of `id` at `(x, y)`.
    pub fn new(x: f64, y: f64, id: NodeId) -> Self {
        Self {
            point: Point::new(x, y),
            id,
        }
    }
}

/// The shared vertical line a column's forks hang off.
///
/// `top <= bottom` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rail {
    /// Horizontal position of the line.
    pub x: f64,
    /// Upper end.
    pub top: f64,
    /// Lower end.
    pub bottom: f64,
}

impl Rail {
    /// Rail at `x`; the ends are put in order.
    pub fn new(x: f64, top: f64, bottom: f64) -> Self {
        Self {
            x,
            top: top.min(bottom),
            bottom: top.max(bottom),
        }
    }

    /// Vertical extent.
    pub fn span(&self) -> f64 {
        self.bottom - self.top
    }

    /// Top and bottom coincide; there is no vertical line to draw.
    pub fn is_degenerate(&self) -> bool {
        self.top == self.bottom
    }

    /// Whether `y` sits exactly on one of the rail ends.
    pub fn is_end(&self, y: f64) -> bool {
        y == self.top || y == self.bottom
    }
}

/// Axis-aligned on-screen bounding box of a rendered card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Horizontal size.
    pub width: f64,
    /// Vertical size.
    pub height: f64,
}

impl Bounds {
    /// Box with its top-left corner at `(left, top)`.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Vertical center.
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Where connectors leave a parent card: right edge, vertical center.
    pub fn outgoing_anchor(&self) -> Point {
        Point::new(self.right(), self.center_y())
    }

    /// Where connectors enter a child card: left edge, vertical center.
    pub fn incoming_anchor(&self) -> Point {
        Point::new(self.left, self.center_y())
    }

    /// Shift by a vector (used for scroll offsets).
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy, self.width, self.height)
    }
}
