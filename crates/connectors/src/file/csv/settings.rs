use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CsvSettings {
    pub delimiter: char,
    pub has_headers: bool,
    /// Type columns as numbers where every non-empty cell parses as one.
    /// When off, every non-empty cell loads as a string.
    pub infer_types: bool,
}

impl CsvSettings {
    pub fn new(delimiter: char, has_headers: bool) -> Self {
        CsvSettings {
            delimiter,
            has_headers,
            infer_types: true,
        }
    }

    pub fn with_infer_types(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }
}

impl Default for CsvSettings {
    fn default() -> Self {
        CsvSettings::new(',', true)
    }
}
