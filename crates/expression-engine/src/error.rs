use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExpressionError {
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),
}

pub type Result<T> = std::result::Result<T, ExpressionError>;
