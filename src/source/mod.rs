//! Org-chart tree input.
//!
//! The tree is one JSON document, read once from a file or from piped
//! stdin. Parsing happens here at the boundary; the rest of the crate only
//! sees [`NodeRef`].

use crate::model::error::InputError;
use crate::model::NodeRef;
use std::fs::File;
use std::io::{BufReader, IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Where the tree document comes from.
///
/// Sum type enforces exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A JSON file on disk.
    File(PathBuf),
    /// Piped stdin.
    Stdin,
}

impl InputSource {
    /// Read and parse the whole document.
    ///
    /// # Errors
    ///
    /// [`InputError::FileNotFound`] if the file vanished since detection,
    /// [`InputError::Io`] for read failures and [`InputError::InvalidJson`]
    /// for malformed documents.
    pub fn load(&self) -> Result<NodeRef, InputError> {
        let root = match self {
            InputSource::File(path) => {
                let file = File::open(path).map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => InputError::FileNotFound { path: path.clone() },
                    _ => InputError::Io(e),
                })?;
                read_tree(BufReader::new(file))?
            }
            InputSource::Stdin => read_tree(std::io::stdin().lock())?,
        };
        info!(
            source = ?self,
            root = %root.id(),
            children = root.children().len(),
            "Loaded org-chart tree"
        );
        Ok(root)
    }
}

/// Parse a tree document from any reader.
///
/// # Errors
///
/// [`InputError::InvalidJson`] with the parser's line and column, or
/// [`InputError::Io`] when the reader fails.
pub fn read_tree<R: Read>(reader: R) -> Result<NodeRef, InputError> {
    let node = serde_json::from_reader(reader)?;
    Ok(Arc::new(node))
}

/// Detect the appropriate input source.
///
/// # Logic:
/// 1. If file path is provided: it must exist
/// 2. If stdin is piped: use stdin
/// 3. Else: return `InputError::NoInput`
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is a
/// terminal. Returns `InputError::FileNotFound` if the file does not exist.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) if path.exists() => Ok(InputSource::File(path)),
        Some(path) => Err(InputError::FileNotFound { path }),
        None if std::io::stdin().is_terminal() => Err(InputError::NoInput),
        None => Ok(InputSource::Stdin),
    }
}
