//! Error types for drillchart.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions up to [`AppError`].
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level binary error wrapping every failure mode
//!   - [`InputError`] - Tree file/stdin reading failures
//!   - [`NavigationError`] - Contract violations against the anchor path
//!   - `ConfigError`, `LoggingError`, `ClickError` - ambient failures
//!
//! # Recovery Strategy
//!
//! Connector routing never fails the redraw cycle. Its recoverable outcomes are
//! described by [`RouteSkip`]: the affected column boundary simply draws no
//! lines, and every other boundary is still routed. Only
//! [`NavigationError::InvalidColumnIndex`] is surfaced to callers, because it
//! means the caller asked for a column that is not on screen.

use super::identifiers::NodeId;
use crate::config::loader::ConfigError;
use crate::logging::LoggingError;
use crate::navigation::click::ClickError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or resolved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Failed to read the org-chart tree.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// A navigation request violated the anchor-path contract.
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// A `--click` argument could not be applied.
    #[error("Click error: {0}")]
    Click(#[from] ClickError),

    /// Writing rendered output failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors encountered when reading the org-chart tree from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified tree file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use drillchart::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No file path was given and stdin is an interactive terminal.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// The document is not a valid org-chart tree.
    ///
    /// `line` and `column` are 1-based positions reported by the JSON parser.
    #[error("Invalid tree JSON at line {line}, column {column}: {message}")]
    InvalidJson {
        /// 1-based line of the failure.
        line: usize,
        /// 1-based column of the failure.
        column: usize,
        /// Parser message.
        message: String,
    },

    /// Generic I/O error reading from the input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for InputError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return InputError::Io(std::io::Error::other(err.to_string()));
        }
        InputError::InvalidJson {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Contract violations against the anchor path.
///
/// These indicate a caller bug (for example a click event carrying a stale
/// column index). They are returned rather than clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Drill was asked for a column outside `0..path_len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use drillchart::model::error::NavigationError;
    ///
    /// let err = NavigationError::InvalidColumnIndex { index: 4, path_len: 2 };
    /// assert!(err.to_string().contains("column 4"));
    /// ```
    #[error("Invalid column {index}: anchor path has {path_len} columns")]
    InvalidColumnIndex {
        /// Requested column.
        index: usize,
        /// Length of the anchor path at the time of the request.
        path_len: usize,
    },
}

/// Why a column boundary was left without connector lines.
///
/// None of these abort the redraw cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteSkip {
    /// The column has no children to connect to. Not a failure.
    #[error("no children to connect")]
    EmptyChildSet,

    /// The parent or a child has no on-screen position yet.
    #[error("no measurement for node {node} in column {column}")]
    MissingMeasurement {
        /// Column the node was expected in.
        column: usize,
        /// Node that could not be located.
        node: NodeId,
    },
}
