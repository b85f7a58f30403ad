use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the page from rendering.
///
/// An empty filter result is not an error; views report it through their
/// own `is_empty()` and still render.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    /// The file is missing or its content is not a readable track table.
    #[error("Data unavailable at {}: {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// The header row lacks a column the dashboard needs.
    #[error("Schema mismatch: missing column '{column}'")]
    SchemaMismatch { column: String },
}
