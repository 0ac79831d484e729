//! Pure core integration functions.
//!
//! Glue used by the binary: replay scripted clicks on a loaded tree, run one
//! redraw against the grid layout, and return the rendered document. No I/O
//! happens here, so the whole pipeline is testable in-process.

use crate::chart::{Chart, ChartEvent};
use crate::config::StyleOptions;
use crate::layout::GridLayout;
use crate::model::error::AppError;
use crate::model::NodeRef;
use crate::navigation::ClickSpec;
use crate::render::{SvgSink, TextSink};
use clap::ValueEnum;
use tracing::{debug, info};

/// Viewport height used when the caller does not pick one.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;

/// Output document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Side-by-side text table.
    #[default]
    Text,
    /// SVG drawing.
    Svg,
}

/// Everything needed to render one chart.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Clicks replayed in order before rendering.
    pub clicks: Vec<ClickSpec>,
    /// Output document kind.
    pub format: OutputFormat,
    /// Colors, corner radius and stroke width.
    pub style: StyleOptions,
    /// Viewport height handed to the grid layout.
    pub viewport_height: f64,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            clicks: Vec::new(),
            format: OutputFormat::default(),
            style: StyleOptions::default(),
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Replay clicks in order, each resolved against the columns it sees.
///
/// # Errors
///
/// The first click that names a missing column or node stops the replay.
pub fn apply_clicks(chart: &mut Chart, clicks: &[ClickSpec]) -> Result<(), AppError> {
    for click in clicks {
        let node = click.resolve(chart.navigation())?;
        chart.handle_event(ChartEvent::NodeClicked {
            node,
            column: click.column,
        })?;
    }
    Ok(())
}

/// Render `root` after applying the request's clicks.
///
/// # Errors
///
/// Click resolution and navigation failures.
pub fn render(root: NodeRef, request: &RenderRequest) -> Result<String, AppError> {
    let mut chart = Chart::with_root(root, request.style.corner_radius);
    apply_clicks(&mut chart, &request.clicks)?;

    let mut layout = GridLayout::new(request.viewport_height);
    let (output, report) = match request.format {
        OutputFormat::Text => {
            let mut sink = TextSink::new();
            let report = chart.redraw(&mut layout, &mut sink);
            (sink.finish(), report)
        }
        OutputFormat::Svg => {
            let mut sink = SvgSink::new(request.style.clone());
            let report = chart.redraw(&mut layout, &mut sink);
            (sink.finish(&layout), report)
        }
    };

    if let Some(report) = report {
        for (boundary, reason) in &report.skipped {
            debug!(boundary, %reason, "Boundary rendered without connectors");
        }
        info!(
            columns = chart.navigation().column_count(),
            drawn = report.drawn.len(),
            skipped = report.skipped.len(),
            format = ?request.format,
            "Chart rendered"
        );
    }
    Ok(output)
}
