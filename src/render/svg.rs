//! SVG output.

use super::{CardSnapshot, ColumnSnapshot};
use crate::columns::Column;
use crate::config::StyleOptions;
use crate::geometry::{Bounds, Route};
use crate::layout::GridLayout;
use crate::redraw::{MeasurementProvider, RenderSink};
use crate::router::ConnectorRoutes;
use std::collections::BTreeMap;
use tracing::debug;

/// Transition hint attached to active connectors.
pub const ACTIVE_TRANSITION: &str = "transition: all 0.3s ease";

/// Class of the overlay that holds every connector group.
pub const CONNECTOR_LAYER_CLASS: &str = "global-connector-layer";

/// Collects columns and connectors, then writes one SVG document.
///
/// Cards are placed with the [`GridLayout`] that measured them, so cards
/// and connectors always agree.
#[derive(Debug, Clone)]
pub struct SvgSink {
    style: StyleOptions,
    columns: Vec<ColumnSnapshot>,
    connectors: BTreeMap<usize, ConnectorRoutes>,
}

impl SvgSink {
    /// Empty sink drawing with `style`.
    pub fn new(style: StyleOptions) -> Self {
        Self {
            style,
            columns: Vec::new(),
            connectors: BTreeMap::new(),
        }
    }

    /// The style this sink draws with.
    pub fn style(&self) -> &StyleOptions {
        &self.style
    }

    /// Boundaries currently holding connectors, in order.
    pub fn boundaries(&self) -> impl Iterator<Item = usize> + '_ {
        self.connectors.keys().copied()
    }

    /// Write the document.
    pub fn finish(&self, layout: &GridLayout) -> String {
        let width = layout.total_width();
        let height = layout.total_height();
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
        );
        out.push_str(&format!(
            "<rect class=\"background\" width=\"{width}\" height=\"{height}\" fill=\"{}\"/>\n",
            self.style.background_color
        ));

        for column in &self.columns {
            out.push_str(&format!(
                "<g class=\"column\" id=\"column-{}\" data-compact=\"{}\">\n",
                column.index, column.compact
            ));
            for card in &column.cards {
                match layout.measure(column.index, &card.id) {
                    Some(bounds) => self.push_card(&mut out, card, bounds, column.compact),
                    None => debug!(column = column.index, node = %card.id, "Card has no position"),
                }
            }
            out.push_str("</g>\n");
        }

        out.push_str(&format!(
            "<svg class=\"{CONNECTOR_LAYER_CLASS}\" overflow=\"visible\">\n"
        ));
        for (boundary, routes) in &self.connectors {
            out.push_str(&format!("<g id=\"connector-grp-{boundary}\">\n"));
            self.push_path(&mut out, &routes.passive, &self.style.connector_color.to_string(), None);
            if let Some(active) = &routes.active {
                self.push_path(
                    &mut out,
                    &active.route,
                    &self.style.active_color.to_string(),
                    Some(ACTIVE_TRANSITION),
                );
            }
            out.push_str("</g>\n");
        }
        out.push_str("</svg>\n</svg>\n");
        out
    }

    fn push_card(&self, out: &mut String, card: &CardSnapshot, b: Bounds, compact: bool) {
        let class = if card.active { "card active" } else { "card" };
        let stroke = if card.active {
            self.style.active_color.to_string()
        } else {
            "none".to_string()
        };
        out.push_str(&format!(
            "<g class=\"{class}\" data-id=\"{}\">\n",
            escape(card.id.as_str())
        ));
        out.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"4\" fill=\"{}\" stroke=\"{stroke}\" stroke-width=\"{}\"/>\n",
            b.left, b.top, b.width, b.height, self.style.card_color, self.style.stroke_width
        ));
        let text_x = b.left + 12.0;
        if compact {
            let initial: String = card.name.chars().take(1).collect();
            out.push_str(&format!(
                "<text x=\"{text_x}\" y=\"{}\" fill=\"{}\" font-size=\"14\">{}</text>\n",
                b.top + 32.0,
                self.style.card_text_color,
                escape(&initial)
            ));
        } else {
            out.push_str(&format!(
                "<text x=\"{text_x}\" y=\"{}\" fill=\"{}\" font-size=\"14\">{}</text>\n",
                b.top + 23.0,
                self.style.text_color,
                escape(&card.name)
            ));
            if let Some(title) = &card.title {
                out.push_str(&format!(
                    "<text x=\"{text_x}\" y=\"{}\" fill=\"{}\" font-size=\"12\">{}</text>\n",
                    b.top + 41.0,
                    self.style.card_title_color,
                    escape(title)
                ));
            }
        }
        out.push_str("</g>\n");
    }

    fn push_path(&self, out: &mut String, route: &Route, stroke: &str, style: Option<&str>) {
        if route.is_empty() {
            return;
        }
        let style = style.map(|s| format!(" style=\"{s}\"")).unwrap_or_default();
        out.push_str(&format!(
            "<path d=\"{route}\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"{}\"{style}/>\n",
            self.style.stroke_width
        ));
    }
}

impl RenderSink for SvgSink {
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

/// Escape text for XML content and attribute values.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
