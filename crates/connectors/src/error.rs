use crate::file::csv::error::FileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// No table with this name exists in the source.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// The table name cannot be mapped onto the source, e.g. it contains a path separator.
    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    /// File-related error.
    #[error("File error: {0}")]
    File(#[from] FileError),
}
