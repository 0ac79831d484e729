//! Configuration module.
//!
//! - [`color`]: color literals accepted in config and env vars
//! - [`style`]: [`StyleOptions`] and their defaults
//! - [`loader`]: TOML loading and the defaults → file → env → CLI chain

pub mod color;
pub mod loader;
pub mod style;

pub use color::{Color, ColorError};
pub use loader::{ConfigError, ConfigFile, ResolvedConfig, StyleSection};
pub use style::StyleOptions;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_log_path, load_config_with_precedence,
    merge_config,
};
