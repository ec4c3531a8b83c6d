use crate::file::csv::types::ColumnType;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CsvColumnMetadata {
    pub name: String,
    pub column_type: ColumnType,
    pub is_nullable: bool,
    pub ordinal: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CsvMetadata {
    pub name: String,
    pub columns: Vec<CsvColumnMetadata>,
    pub delimiter: char,
    pub has_header: bool,
    pub row_count: usize,
}

impl CsvMetadata {
    pub fn column(&self, name: &str) -> Option<&CsvColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Name given to the column at `ordinal` when the file has no header row.
pub fn positional_col_name(ordinal: usize) -> String {
    format!("column_{}", ordinal + 1)
}
