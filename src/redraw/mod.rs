//! Redraw synchronization between navigation, layout and drawing.
//!
//! Invalidations are explicit events ([`Invalidation`]) that mark the next
//! [`RedrawSynchronizer::flush`] as needed. A flush runs one synchronous
//! cycle in a fixed order:
//!
//! 1. resolve columns from the current path;
//! 2. hand them to the [`RenderSink`] (only when the path or style changed);
//! 3. let the [`MeasurementProvider`] settle its layout;
//! 4. route every column boundary and hand the routes to the sink.
//!
//! Routing therefore always sees active ids and positions for the current
//! path. Several invalidations between flushes coalesce into one cycle.

use crate::columns::Column;
use crate::geometry::{Bounds, ChildPoint};
use crate::model::{NodeId, RouteSkip};
use crate::navigation::NavigationController;
use crate::router::{route_connectors, ConnectorRoutes};
use tracing::{debug, trace};

/// Why the connectors (and maybe the columns) must be redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Invalidation {
    /// The anchor path changed: columns and connectors.
    PathChanged,
    /// Positions moved (resize, column scroll): connectors only.
    LayoutInvalidated,
    /// Colors or corner radius changed: columns and connectors.
    StyleChanged,
}

impl Invalidation {
    /// Whether the columns themselves must be re-rendered.
    pub fn rerenders_columns(self) -> bool {
        matches!(self, Invalidation::PathChanged | Invalidation::StyleChanged)
    }
}

/// Source of on-screen geometry for rendered cards.
pub trait MeasurementProvider {
    /// Called after the sink accepted the columns and before any lookup.
    ///
    /// Providers that compute layout themselves do it here.
    fn settle(&mut self, _columns: &[Column<'_>]) {}

    /// Bounding box of `node` as rendered in `column`, if it is on screen.
    fn measure(&self, column: usize, node: &NodeId) -> Option<Bounds>;
}

/// Receiver of everything the core wants drawn.
pub trait RenderSink {
    /// Columns to render as cards.
    fn render_columns(&mut self, columns: &[Column<'_>]);

    /// Drop all previously drawn connectors.
    fn clear_connectors(&mut self);

    /// Connectors between column `boundary - 1` and column `boundary`.
    fn draw_connectors(&mut self, boundary: usize, routes: &ConnectorRoutes);
}

/// Outcome of one flush.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedrawReport {
    /// Whether the sink received fresh columns.
    pub columns_rendered: bool,
    /// Boundaries that received routes.
    pub drawn: Vec<usize>,
    /// Boundaries left without lines, and why.
    pub skipped: Vec<(usize, RouteSkip)>,
}

/// Coalesces invalidations and runs redraw cycles.
#[derive(Debug, Clone)]
pub struct RedrawSynchronizer {
    corner_radius: f64,
    rerender_columns: bool,
    reroute: bool,
}

impl RedrawSynchronizer {
    /// A synchronizer whose first flush renders everything.
    pub fn new(corner_radius: f64) -> Self {
        Self {
            corner_radius,
            rerender_columns: true,
            reroute: true,
        }
    }

    /// Radius used for the next routing pass.
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Change the corner radius; marks a style change when it differs.
    pub fn set_corner_radius(&mut self, radius: f64) {
        if self.corner_radius.to_bits() != radius.to_bits() {
            self.corner_radius = radius;
            self.invalidate(Invalidation::StyleChanged);
        }
    }

    /// Record an invalidation for the next flush.
    pub fn invalidate(&mut self, reason: Invalidation) {
        trace!(?reason, "Invalidated");
        self.rerender_columns |= reason.rerenders_columns();
        self.reroute = true;
    }

    /// Whether the next flush has work to do.
    pub fn is_pending(&self) -> bool {
        self.reroute || self.rerender_columns
    }

    /// Run one redraw cycle if anything is pending.
    ///
    /// Returns `None` when nothing was invalidated since the last flush.
    pub fn flush(
        &mut self,
        nav: &NavigationController,
        provider: &mut dyn MeasurementProvider,
        sink: &mut dyn RenderSink,
    ) -> Option<RedrawReport> {
        if !self.is_pending() {
            return None;
        }

        let columns = nav.columns();
        let mut report = RedrawReport::default();

        if self.rerender_columns {
            sink.render_columns(&columns);
            report.columns_rendered = true;
        }
        provider.settle(&columns);

        sink.clear_connectors();
        for boundary in 1..columns.len() {
            match route_boundary(nav, &columns, boundary, &*provider, self.corner_radius) {
                Ok(routes) => {
                    sink.draw_connectors(boundary, &routes);
                    report.drawn.push(boundary);
                }
                Err(skip) => {
                    debug!(boundary, reason = %skip, "Skipped connector drawing");
                    report.skipped.push((boundary, skip));
                }
            }
        }

        self.rerender_columns = false;
        self.reroute = false;
        Some(report)
    }
}

/// Route the lines between `path[boundary]` (shown in column
/// `boundary - 1`) and its children (shown in column `boundary`).
///
/// Measurements are rounded to whole pixels before routing.
pub fn route_boundary(
    nav: &NavigationController,
    columns: &[Column<'_>],
    boundary: usize,
    provider: &dyn MeasurementProvider,
    corner_radius: f64,
) -> Result<ConnectorRoutes, RouteSkip> {
    let (Some(path), Some(column)) = (nav.path(), columns.get(boundary)) else {
        return Err(RouteSkip::EmptyChildSet);
    };
    if column.is_empty() {
        return Err(RouteSkip::EmptyChildSet);
    }

    let parent = path.get(boundary).ok_or(RouteSkip::EmptyChildSet)?;
    let parent_column = boundary - 1;
    let parent_bounds =
        provider
            .measure(parent_column, parent.id())
            .ok_or_else(|| RouteSkip::MissingMeasurement {
                column: parent_column,
                node: parent.id().clone(),
            })?;

    let children = column
        .nodes
        .iter()
        .map(|child| {
            provider
                .measure(boundary, child.id())
                .map(|b| {
                    let p = b.incoming_anchor().round();
                    ChildPoint::new(p.x, p.y, child.id().clone())
                })
                .ok_or_else(|| RouteSkip::MissingMeasurement {
                    column: boundary,
                    node: child.id().clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    route_connectors(
        parent_bounds.outgoing_anchor().round(),
        &children,
        column.active,
        corner_radius,
    )
}

#[cfg(test)]
#[path = "redraw_tests.rs"]
mod tests;
