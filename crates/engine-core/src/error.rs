use connectors::error::SourceError;
use expression_engine::ExpressionError;
use thiserror::Error;

/// Errors that abort a query. No partial results are returned.
#[derive(Error, Debug)]
pub enum QueryError {
    /// A `WHERE` clause uses an operator outside `= != > < >= <=`.
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error("Malformed join predicate '{0}': expected table.column")]
    MalformedJoinPredicate(String),

    #[error("Unknown table qualifier '{qualifier}' in field '{field}'")]
    UnknownTableQualifier { field: String, qualifier: String },

    /// Loading a table failed; the source error is passed through as is.
    #[error(transparent)]
    ResourceLoad(#[from] SourceError),
}

impl QueryError {
    pub fn is_unsupported_operator(&self) -> bool {
        matches!(
            self,
            QueryError::Expression(ExpressionError::UnsupportedOperator(_))
        )
    }
}
