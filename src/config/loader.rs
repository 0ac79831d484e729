//! Configuration file loading with precedence handling.

use super::color::{Color, ColorError};
use super::style::{background_for, StyleOptions};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "DRILLCHART_CONFIG";
/// Environment override for `style.active_color`.
pub const ACTIVE_COLOR_ENV: &str = "DRILLCHART_ACTIVE_COLOR";
/// Environment override for `style.connector_color`.
pub const CONNECTOR_COLOR_ENV: &str = "DRILLCHART_CONNECTOR_COLOR";
/// Environment override for `style.corner_radius`.
pub const CORNER_RADIUS_ENV: &str = "DRILLCHART_CORNER_RADIUS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A color option could not be parsed.
    #[error("Invalid value for {field}: {source}")]
    InvalidColor {
        /// Option name (`style.active_color`, `DRILLCHART_ACTIVE_COLOR`, ...).
        field: String,
        /// Why the literal was rejected.
        #[source]
        source: ColorError,
    },

    /// A numeric option could not be parsed.
    #[error("Invalid value for {field}: '{value}' is not a number")]
    InvalidNumber {
        /// Option name.
        field: String,
        /// Offending value.
        value: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; anything left out keeps its default.
/// Corresponds to `~/.config/drillchart/config.toml`:
///
/// ```toml
/// log_file_path = "/tmp/drillchart.log"
///
/// [style]
/// active_color = "rgb(0 203 108)"
/// connector_color = "#CCCCCC"
/// corner_radius = 4
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Chart colors and stroke options.
    #[serde(default)]
    pub style: Option<StyleSection>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// `[style]` table. Colors stay strings until merge so errors can name the
/// offending key.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StyleSection {
    /// Active connector color.
    #[serde(default)]
    pub active_color: Option<String>,
    /// Passive connector color.
    #[serde(default)]
    pub connector_color: Option<String>,
    /// Text color outside cards.
    #[serde(default)]
    pub text_color: Option<String>,
    /// Card fill.
    #[serde(default)]
    pub card_color: Option<String>,
    /// Card name text.
    #[serde(default)]
    pub card_text_color: Option<String>,
    /// Card title text.
    #[serde(default)]
    pub card_title_color: Option<String>,
    /// Explicit background; derived from the active color when absent.
    #[serde(default)]
    pub background_color: Option<String>,
    /// Connector corner radius in pixels.
    #[serde(default)]
    pub corner_radius: Option<f64>,
    /// Connector stroke width in pixels.
    #[serde(default)]
    pub stroke_width: Option<f64>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Fully resolved chart style.
    pub style: StyleOptions,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            style: StyleOptions::default(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/drillchart/drillchart.log` on Linux, or the
/// platform equivalent. Falls back to the current directory when no state
/// directory is known.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("drillchart").join("drillchart.log")
    } else {
        PathBuf::from("drillchart.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    info!(path = %path.display(), "Loaded config file");
    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/drillchart/config.toml` on Linux. Returns `None` if
/// no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("drillchart").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `DRILLCHART_CONFIG` environment variable
/// 3. Default path `~/.config/drillchart/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

fn parse_color(field: &str, raw: &str) -> Result<Color, ConfigError> {
    raw.parse().map_err(|source| ConfigError::InvalidColor {
        field: field.to_string(),
        source,
    })
}

fn parse_optional_color(
    field: &str,
    raw: Option<&str>,
    fallback: Color,
) -> Result<Color, ConfigError> {
    raw.map_or(Ok(fallback), |raw| parse_color(field, raw))
}

/// Merge config file into defaults to create resolved config.
///
/// A background color left unset is derived from the resolved active color.
///
/// # Errors
///
/// [`ConfigError::InvalidColor`] for any unparseable color string.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let d = defaults.style;
    let s = config.style.unwrap_or_default();
    let active_color =
        parse_optional_color("style.active_color", s.active_color.as_deref(), d.active_color)?;

    let style = StyleOptions {
        active_color,
        connector_color: parse_optional_color(
            "style.connector_color",
            s.connector_color.as_deref(),
            d.connector_color,
        )?,
        text_color: parse_optional_color("style.text_color", s.text_color.as_deref(), d.text_color)?,
        card_color: parse_optional_color("style.card_color", s.card_color.as_deref(), d.card_color)?,
        card_text_color: parse_optional_color(
            "style.card_text_color",
            s.card_text_color.as_deref(),
            d.card_text_color,
        )?,
        card_title_color: parse_optional_color(
            "style.card_title_color",
            s.card_title_color.as_deref(),
            d.card_title_color,
        )?,
        background_color: parse_optional_color(
            "style.background_color",
            s.background_color.as_deref(),
            background_for(active_color),
        )?,
        corner_radius: s.corner_radius.unwrap_or(d.corner_radius),
        stroke_width: s.stroke_width.unwrap_or(d.stroke_width),
    };

    Ok(ResolvedConfig {
        style,
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `DRILLCHART_ACTIVE_COLOR`
/// - `DRILLCHART_CONNECTOR_COLOR`
/// - `DRILLCHART_CORNER_RADIUS`
///
/// # Errors
///
/// Returns error if a set variable does not parse.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var(ACTIVE_COLOR_ENV) {
        let color = parse_color(ACTIVE_COLOR_ENV, &raw)?;
        config.style.set_active_color(color);
    }

    if let Ok(raw) = std::env::var(CONNECTOR_COLOR_ENV) {
        config.style.connector_color = parse_color(CONNECTOR_COLOR_ENV, &raw)?;
    }

    if let Ok(raw) = std::env::var(CORNER_RADIUS_ENV) {
        config.style.corner_radius =
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    field: CORNER_RADIUS_ENV.to_string(),
                    value: raw.clone(),
                })?;
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, radius_override: Option<f64>) -> ResolvedConfig {
    if let Some(radius) = radius_override {
        config.style.corner_radius = radius;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
