use crate::file::csv::{
    error::FileError,
    metadata::{CsvColumnMetadata, CsvMetadata, positional_col_name},
    settings::CsvSettings,
    types::ColumnType,
};
use model::records::row::{FieldValue, Row};
use std::io::Read;

/// A fully read CSV table: header names plus raw string records.
#[derive(Clone, Debug)]
pub struct CsvAdapter {
    pub settings: CsvSettings,
    pub headers: Vec<String>,
    pub records: Vec<csv::StringRecord>,
}

impl CsvAdapter {
    pub fn from_reader<R: Read>(reader: R, settings: CsvSettings) -> Result<Self, FileError> {
        if !settings.delimiter.is_ascii() {
            return Err(FileError::InvalidDelimiter(settings.delimiter));
        }

        let mut builder = csv::ReaderBuilder::new();
        let builder = builder
            .delimiter(settings.delimiter as u8)
            .has_headers(settings.has_headers)
            .trim(csv::Trim::All)
            .flexible(true);

        let mut rdr = builder.from_reader(reader);
        let mut headers: Vec<String> = if settings.has_headers {
            rdr.headers()?.iter().map(String::from).collect()
        } else {
            Vec::new()
        };

        let records = rdr.records().collect::<Result<Vec<_>, _>>()?;

        // Without a header row, name columns by position, wide enough for the longest record
        if !settings.has_headers {
            let width = records.iter().map(|r| r.len()).max().unwrap_or(0);
            headers = (0..width).map(positional_col_name).collect();
        }

        Ok(CsvAdapter {
            settings,
            headers,
            records,
        })
    }

    pub fn from_bytes(bytes: &[u8], settings: CsvSettings) -> Result<Self, FileError> {
        Self::from_reader(bytes, settings)
    }

    /// Infers column types over every record.
    pub fn fetch_metadata(&self, name: &str) -> CsvMetadata {
        let initial = if self.settings.infer_types {
            ColumnType::Int
        } else {
            ColumnType::String
        };

        let mut columns: Vec<CsvColumnMetadata> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| CsvColumnMetadata {
                name: h.clone(),
                column_type: initial,
                is_nullable: false,
                ordinal: i,
            })
            .collect();

        for record in &self.records {
            for col_meta in columns.iter_mut() {
                let field = record.get(col_meta.ordinal).unwrap_or("");
                if field.is_empty() {
                    col_meta.is_nullable = true;
                }
                col_meta.column_type = col_meta.column_type.promote(field);
            }
        }

        CsvMetadata {
            name: name.to_string(),
            columns,
            delimiter: self.settings.delimiter,
            has_header: self.settings.has_headers,
            row_count: self.records.len(),
        }
    }

    /// Converts every record into a typed row. Cells missing from a short
    /// record load as `Null`; cells beyond the header width are dropped.
    pub fn rows(&self, meta: &CsvMetadata) -> Vec<Row> {
        self.records
            .iter()
            .map(|record| {
                let fields = meta
                    .columns
                    .iter()
                    .map(|col_meta| FieldValue {
                        name: col_meta.name.clone(),
                        value: col_meta
                            .column_type
                            .get_value(record.get(col_meta.ordinal).unwrap_or("")),
                    })
                    .collect();
                Row::new(fields)
            })
            .collect()
    }
}
