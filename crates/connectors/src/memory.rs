use crate::{error::SourceError, source::RowSource};
use async_trait::async_trait;
use model::records::row::Row;
use std::collections::HashMap;

/// Tables held in memory, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    tables: HashMap<String, Vec<Row>>,
}

impl MemorySource {
    pub fn new() -> Self {
        MemorySource::default()
    }

    pub fn with_table(mut self, name: impl Into<String>, rows: Vec<Row>) -> Self {
        self.insert(name, rows);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        self.tables.insert(name.into(), rows);
    }
}

#[async_trait]
impl RowSource for MemorySource {
    async fn load(&self, table: &str) -> Result<Vec<Row>, SourceError> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| SourceError::TableNotFound(table.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::row;

    #[tokio::test]
    async fn loads_registered_tables() {
        let source = MemorySource::new().with_table("t", vec![row! { "id" => 1 }]);
        assert_eq!(source.load("t").await.unwrap(), vec![row! { "id" => 1 }]);
    }

    #[tokio::test]
    async fn unknown_table_is_not_found() {
        let err = MemorySource::new().load("nope").await.unwrap_err();
        assert!(matches!(err, SourceError::TableNotFound(name) if name == "nope"));
    }
}
