//! Chart style options.

use super::color::Color;

/// Default highlight color for the active path.
pub const DEFAULT_ACTIVE_COLOR: Color = Color::rgb(0, 203, 108);
/// Default stroke color for passive connectors.
pub const DEFAULT_CONNECTOR_COLOR: Color = Color::rgb(204, 204, 204);
/// Opacity of the background tint derived from the active color.
pub const BACKGROUND_ALPHA: f32 = 0.06;
/// Default connector stroke width in pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Resolved visual style of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOptions {
    /// Active connector and active card accent.
    pub active_color: Color,
    /// Passive connectors.
    pub connector_color: Color,
    /// Text outside cards.
    pub text_color: Color,
    /// Card fill.
    pub card_color: Color,
    /// Card name text.
    pub card_text_color: Color,
    /// Card title text.
    pub card_title_color: Color,
    /// Page background. Defaults to the active color at 6% opacity.
    pub background_color: Color,
    /// Corner radius of connector bends; 0 draws right angles.
    pub corner_radius: f64,
    /// Connector stroke width in pixels.
    pub stroke_width: f64,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            active_color: DEFAULT_ACTIVE_COLOR,
            connector_color: DEFAULT_CONNECTOR_COLOR,
            text_color: Color::rgb(0, 0, 0),
            card_color: Color::rgb(255, 255, 255),
            card_text_color: Color::rgb(102, 102, 102),
            card_title_color: Color::rgb(102, 102, 102),
            background_color: background_for(DEFAULT_ACTIVE_COLOR),
            corner_radius: 0.0,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl StyleOptions {
    /// Replace the active color. A background still derived from the old
    /// active color follows the new one.
    pub fn set_active_color(&mut self, color: Color) {
        if self.background_color == background_for(self.active_color) {
            self.background_color = background_for(color);
        }
        self.active_color = color;
    }
}

/// Background tint for a given active color.
pub fn background_for(active: Color) -> Color {
    active.with_alpha(BACKGROUND_ALPHA)
}
