//! Orthogonal connector routing between a parent card and its child column.
//!
//! Given already-measured screen positions, [`route_connectors`] computes two
//! independent routes:
//!
//! - a **passive** bundle: a stub from the parent to a shared vertical rail,
//!   the rail itself, and one horizontal fork per child;
//! - an optional **active** line from the parent to the selected child only.
//!
//! The rail sits [`RAIL_OFFSET`] pixels left of the children's common left
//! edge. With a zero corner radius (the default) every corner is a right
//! angle and no arc segment is emitted.

use crate::geometry::route::RouteBuilder;
use crate::geometry::{ChildPoint, Point, Rail, Route, StrokeRole};
use crate::model::{NodeId, RouteSkip};
use tracing::warn;

/// Horizontal distance between the rail and the children's left edge.
pub const RAIL_OFFSET: f64 = 11.0;

/// Parent and active child closer than this vertically get a straight line.
pub const STRAIGHT_TOLERANCE: f64 = 1.0;

/// Direction of the active line's vertical leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkDirection {
    /// Parent and child share a row: one horizontal segment.
    Straight,
    /// Child is below the parent.
    Down,
    /// Child is above the parent.
    Up,
}

/// Highlighted route to the selected child.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRoute {
    /// The selected child.
    pub target: NodeId,
    /// Which way the vertical leg runs.
    pub direction: ForkDirection,
    /// Path data, stroked with the active color.
    pub route: Route,
}

/// Everything drawn for one column boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorRoutes {
    /// The shared vertical line.
    pub rail: Rail,
    /// Stub, rail and one fork per child.
    pub passive: Route,
    /// Present when the active id is among the children.
    pub active: Option<ActiveRoute>,
}

/// Compute connector geometry for one parent and its visible children.
///
/// `parent` is the parent card's right edge at its vertical center. Each
/// child point is the child's left edge at its vertical center, in render
/// order. All children are expected to share one left edge; when they do not,
/// the first child's edge is used and a warning is logged.
///
/// A negative or non-finite `radius` is treated as zero.
///
/// # Errors
///
/// Returns [`RouteSkip::EmptyChildSet`] when `children` is empty; nothing is
/// drawn in that case.
pub fn route_connectors(
    parent: Point,
    children: &[ChildPoint],
    active_id: Option<&NodeId>,
    radius: f64,
) -> Result<ConnectorRoutes, RouteSkip> {
    let first = children.first().ok_or(RouteSkip::EmptyChildSet)?;
    let child_left_x = first.point.x;

    if let Some(odd) = children.iter().find(|c| c.point.x != child_left_x) {
        warn!(
            expected = child_left_x,
            found = odd.point.x,
            node = %odd.id,
            "Children report different left edges; using the first"
        );
    }

    let (min_y, max_y) = children.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
        (lo.min(c.point.y), hi.max(c.point.y))
    });
    let rail = Rail::new(
        child_left_x - RAIL_OFFSET,
        min_y.min(parent.y),
        max_y.max(parent.y),
    );
    let radius = clamp_radius(radius, rail.span() / 2.0);

    let passive = passive_route(parent, children, child_left_x, &rail, radius);
    let active = active_id
        .and_then(|id| children.iter().find(|c| &c.id == id))
        .map(|child| active_route(parent, child, child_left_x, rail.x, radius));

    Ok(ConnectorRoutes {
        rail,
        passive,
        active,
    })
}

fn clamp_radius(radius: f64, limit: f64) -> f64 {
    if !radius.is_finite() || radius <= 0.0 {
        return 0.0;
    }
    radius.min(limit).min(RAIL_OFFSET).max(0.0)
}

fn passive_route(
    parent: Point,
    children: &[ChildPoint],
    child_left_x: f64,
    rail: &Rail,
    radius: f64,
) -> Route {
    let mut b = RouteBuilder::new(StrokeRole::Passive);
    b.move_to(parent);

    // Everything on one row: a single straight line, no rail.
    if rail.is_degenerate() {
        b.line_to(Point::new(child_left_x, parent.y));
        return b.finish();
    }

    // Parent stub, turning into the rail when the parent sits on a rail end.
    let stub_end = Point::new(rail.x, parent.y);
    if parent.y == rail.top {
        b.corner_to(stub_end, Point::new(rail.x, rail.bottom), radius);
    } else if parent.y == rail.bottom {
        b.corner_to(stub_end, Point::new(rail.x, rail.top), radius);
    } else {
        b.line_to(stub_end);
    }

    // Rail, shortened at both ends to leave room for the corner arcs. The
    // parent's arc is limited by its stub, so its end is shortened less.
    let parent_radius = radius.min((rail.x - parent.x).abs());
    let top_inset = if parent.y == rail.top { parent_radius } else { radius };
    let bottom_inset = if parent.y == rail.bottom { parent_radius } else { radius };
    b.move_to(Point::new(rail.x, rail.top + top_inset));
    b.line_to(Point::new(rail.x, rail.bottom - bottom_inset));

    for child in children {
        let y = child.point.y;
        let join = Point::new(rail.x, y);
        let end = Point::new(child_left_x, y);
        if rail.is_end(y) {
            let inset = if y == rail.top { radius } else { -radius };
            b.move_to(Point::new(rail.x, y + inset));
            b.corner_to(join, end, radius);
        } else {
            b.move_to(join);
        }
        b.line_to(end);
    }

    b.finish()
}

fn active_route(
    parent: Point,
    child: &ChildPoint,
    child_left_x: f64,
    line_x: f64,
    radius: f64,
) -> ActiveRoute {
    let mut b = RouteBuilder::new(StrokeRole::Active);
    b.move_to(parent);

    let child_y = child.point.y;
    let dy = child_y - parent.y;
    let direction = if dy.abs() < STRAIGHT_TOLERANCE {
        b.line_to(Point::new(child_left_x, parent.y));
        ForkDirection::Straight
    } else {
        // Two corners share the vertical leg.
        let radius = radius.min(dy.abs() / 2.0);
        let upper = Point::new(line_x, parent.y);
        let lower = Point::new(line_x, child_y);
        let end = Point::new(child_left_x, child_y);
        b.corner_to(upper, lower, radius);
        b.corner_to(lower, end, radius);
        b.line_to(end);
        if dy > 0.0 {
            ForkDirection::Down
        } else {
            ForkDirection::Up
        }
    };

    ActiveRoute {
        target: child.id.clone(),
        direction,
        route: b.finish(),
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
