//! Event-driven chart: navigation plus redraw scheduling behind one handle.
//!
//! Hosts feed [`ChartEvent`]s in and call [`Chart::redraw`] when they are
//! ready to paint. Events only record work; the redraw performs it in the
//! fixed order the synchronizer guarantees.

use crate::model::{NavigationError, NodeRef};
use crate::navigation::NavigationController;
use crate::redraw::{Invalidation, MeasurementProvider, RedrawReport, RedrawSynchronizer, RenderSink};
use tracing::debug;

/// Something that happened to the chart.
#[derive(Debug, Clone)]
pub enum ChartEvent {
    /// A card was clicked.
    NodeClicked {
        /// The clicked node.
        node: NodeRef,
        /// Column the card was rendered in.
        column: usize,
    },
    /// The host supplied a (possibly identical) root.
    RootChanged(Option<NodeRef>),
    /// Positions moved: window resize or column scroll.
    LayoutInvalidated,
    /// Colors changed, or the corner radius changed to the given value.
    StyleChanged {
        /// New corner radius, if it changed.
        corner_radius: Option<f64>,
    },
}

/// Navigation state and its pending redraw.
#[derive(Debug, Clone)]
pub struct Chart {
    nav: NavigationController,
    redraw: RedrawSynchronizer,
}

impl Chart {
    /// A chart with no tree yet.
    pub fn new(corner_radius: f64) -> Self {
        Self {
            nav: NavigationController::new(),
            redraw: RedrawSynchronizer::new(corner_radius),
        }
    }

    /// A chart seeded with `root`.
    pub fn with_root(root: NodeRef, corner_radius: f64) -> Self {
        Self {
            nav: NavigationController::with_root(root),
            redraw: RedrawSynchronizer::new(corner_radius),
        }
    }

    /// The navigation state.
    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    /// Corner radius used by the next redraw.
    pub fn corner_radius(&self) -> f64 {
        self.redraw.corner_radius()
    }

    /// Whether a redraw is pending.
    pub fn needs_redraw(&self) -> bool {
        self.redraw.is_pending()
    }

    /// Apply one event.
    ///
    /// # Errors
    ///
    /// [`NavigationError::InvalidColumnIndex`] for a click on a column that is
    /// not rendered. Nothing is invalidated in that case.
    pub fn handle_event(&mut self, event: ChartEvent) -> Result<(), NavigationError> {
        debug!(?event, "Chart event");
        match event {
            ChartEvent::NodeClicked { node, column } => {
                self.nav.drill(node, column)?;
                self.redraw.invalidate(Invalidation::PathChanged);
            }
            ChartEvent::RootChanged(root) => {
                if self.nav.set_root(root) {
                    self.redraw.invalidate(Invalidation::PathChanged);
                }
            }
            ChartEvent::LayoutInvalidated => {
                self.redraw.invalidate(Invalidation::LayoutInvalidated);
            }
            ChartEvent::StyleChanged { corner_radius } => {
                if let Some(radius) = corner_radius {
                    self.redraw.set_corner_radius(radius);
                }
                self.redraw.invalidate(Invalidation::StyleChanged);
            }
        }
        Ok(())
    }

    /// Run the pending redraw, if any.
    pub fn redraw(
        &mut self,
        provider: &mut dyn MeasurementProvider,
        sink: &mut dyn RenderSink,
    ) -> Option<RedrawReport> {
        self.redraw.flush(&self.nav, provider, sink)
    }
}
