//! Color literals accepted in configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A color string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid color '{0}': expected #rgb, #rrggbb, rgb(r g b) or a color name")]
pub struct ColorError(pub String);

/// An sRGB color with optional alpha.
///
/// Parsed from `#rgb`, `#rrggbb`, `rgb(r g b)`, `rgb(r, g, b)` or a small
/// set of CSS names. Formats back to the canonical spelling used in SVG
/// output: `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity, `0.0..=1.0`.
    pub alpha: f32,
}

const NAMED: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
];

impl Color {
    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            alpha: 1.0,
        }
    }

    /// Same color at the given opacity (clamped to `0.0..=1.0`).
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Full opacity.
    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorError(s.to_string());
        let trimmed = s.trim();

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(err);
        }

        if let Some(body) = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let channels: Vec<u8> = body
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .map(|part| part.parse::<u8>().map_err(|_| err()))
                .collect::<Result<_, _>>()?;
            return match channels.as_slice() {
                [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
                _ => Err(err()),
            };
        }

        let lower = trimmed.to_ascii_lowercase();
        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, (r, g, b))| Color::rgb(*r, *g, *b))
            .ok_or_else(err)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| channel(&c.to_string()).map(|v| v * 17));
            Some(Color::rgb(it.next()??, it.next()??, it.next()??))
        }
        6 => Some(Color::rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_hex() {
        assert_eq!("#CCCCCC".parse::<Color>(), Ok(Color::rgb(204, 204, 204)));
    }

    #[test]
    fn parses_short_hex() {
        assert_eq!("#fff".parse::<Color>(), Ok(Color::rgb(255, 255, 255)));
        assert_eq!("#666".parse::<Color>(), Ok(Color::rgb(102, 102, 102)));
    }

    #[test]
    fn parses_space_separated_rgb() {
        assert_eq!("rgb(0 203 108)".parse::<Color>(), Ok(Color::rgb(0, 203, 108)));
    }

    #[test]
    fn parses_comma_separated_rgb() {
        assert_eq!(
            "rgb(0, 203, 108)".parse::<Color>(),
            Ok(Color::rgb(0, 203, 108))
        );
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("White".parse::<Color>(), Ok(Color::rgb(255, 255, 255)));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "#12", "#gggggg", "rgb(1 2)", "rgb(300 0 0)", "chartreuse-ish"] {
            assert_eq!(
                bad.parse::<Color>(),
                Err(ColorError(bad.to_string())),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn displays_opaque_as_hex() {
        assert_eq!(Color::rgb(0, 203, 108).to_string(), "#00cb6c");
    }

    #[test]
    fn displays_translucent_as_rgba() {
        let bg = Color::rgb(0, 203, 108).with_alpha(0.06);
        assert_eq!(bg.to_string(), "rgba(0, 203, 108, 0.06)");
    }

    #[test]
    fn deserializes_from_string() {
        let color: Color = serde_json::from_str("\"#ccc\"").unwrap();
        assert_eq!(color, Color::rgb(204, 204, 204));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
