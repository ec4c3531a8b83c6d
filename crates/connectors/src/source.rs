use crate::error::SourceError;
use async_trait::async_trait;
use model::records::row::Row;

/// Supplies every row of a named table.
///
/// Each call loads a fresh copy; nothing is cached between queries.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn load(&self, table: &str) -> Result<Vec<Row>, SourceError>;
}

#[async_trait]
impl<S: RowSource + ?Sized> RowSource for std::sync::Arc<S> {
    async fn load(&self, table: &str) -> Result<Vec<Row>, SourceError> {
        (**self).load(table).await
    }
}
