use connectors::error::SourceError;
use engine_core::QueryError;
use sql_syntax::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}", .0.format_error())]
    Parse(#[from] ParseError),

    #[error("Query failed: {0}")]
    Query(#[from] QueryError),

    #[error("Failed to read table: {0}")]
    Source(#[from] SourceError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
