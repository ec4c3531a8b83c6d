use crate::{
    error::SourceError,
    file::csv::{adapter::CsvAdapter, error::FileError, metadata::CsvMetadata, settings::CsvSettings},
    source::RowSource,
};
use async_trait::async_trait;
use model::records::row::Row;
use std::path::PathBuf;
use tracing::{debug, info};

/// Serves each table from `<dir>/<table>.csv`.
#[derive(Clone, Debug)]
pub struct CsvSource {
    dir: PathBuf,
    settings: CsvSettings,
}

impl CsvSource {
    pub fn new(dir: impl Into<PathBuf>, settings: CsvSettings) -> Self {
        CsvSource {
            dir: dir.into(),
            settings,
        }
    }

    pub fn table_path(&self, table: &str) -> Result<PathBuf, SourceError> {
        let is_plain = !table.is_empty()
            && table != "."
            && table != ".."
            && !table.contains(['/', '\\']);
        if !is_plain {
            return Err(SourceError::InvalidTableName(table.to_string()));
        }

        Ok(self.dir.join(format!("{table}.csv")))
    }

    async fn read_adapter(&self, table: &str) -> Result<CsvAdapter, SourceError> {
        let path = self.table_path(table)?;
        let bytes = tokio::fs::read(&path).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                SourceError::TableNotFound(table.to_string())
            } else {
                SourceError::File(FileError::from_io(&path.display().to_string(), err))
            }
        })?;

        debug!(table, path = %path.display(), bytes = bytes.len(), "Read CSV file");

        Ok(CsvAdapter::from_bytes(&bytes, self.settings.clone())?)
    }

    /// Column names and inferred types of a table, without building rows.
    pub async fn metadata(&self, table: &str) -> Result<CsvMetadata, SourceError> {
        let adapter = self.read_adapter(table).await?;
        Ok(adapter.fetch_metadata(table))
    }
}

#[async_trait]
impl RowSource for CsvSource {
    async fn load(&self, table: &str) -> Result<Vec<Row>, SourceError> {
        let start = std::time::Instant::now();
        let adapter = self.read_adapter(table).await?;
        let meta = adapter.fetch_metadata(table);
        let rows = adapter.rows(&meta);

        info!(
            table,
            rows = rows.len(),
            columns = meta.columns.len(),
            took_ms = start.elapsed().as_millis() as u64,
            "Loaded CSV table"
        );

        Ok(rows)
    }
}
