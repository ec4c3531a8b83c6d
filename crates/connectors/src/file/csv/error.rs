use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Invalid delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(char),
}

impl FileError {
    pub fn from_io(path: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => FileError::PermissionDenied(path.to_string()),
            _ => FileError::IoError(err),
        }
    }
}
