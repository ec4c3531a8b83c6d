use model::core::value::Value;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Int,
    Float,
    String,
}

/// The promotion sequence: start at the current type and widen until it fits.
const CHAIN: &[ColumnType] = &[ColumnType::Int, ColumnType::Float, ColumnType::String];

/// Check if type can parse the given string.
fn can_parse(column_type: ColumnType, value: &str) -> bool {
    if value.is_empty() {
        return true; // treat empty as null
    }
    match column_type {
        ColumnType::Int => value.parse::<i64>().is_ok(),
        ColumnType::Float => value.parse::<f64>().is_ok_and(f64::is_finite),
        ColumnType::String => true,
    }
}

impl ColumnType {
    /// Widens this type until it can hold `value`.
    pub fn promote(&self, value: &str) -> ColumnType {
        // Find our index in the promotion chain (fallback to start)
        let start = CHAIN.iter().position(|t| t == self).unwrap_or(0);
        // Find the first type from here onward that can parse the value
        CHAIN[start..]
            .iter()
            .copied()
            .find(|t| can_parse(*t, value))
            .unwrap_or(ColumnType::String)
    }

    /// Converts one cell. Empty cells are `Null`; a cell the type cannot
    /// parse falls back to its string form.
    pub fn get_value(&self, cell: &str) -> Value {
        if cell.is_empty() {
            return Value::Null;
        }
        match self {
            ColumnType::Int => cell
                .parse::<i64>()
                .map(Value::Int)
                .unwrap_or_else(|_| Value::String(cell.to_string())),
            ColumnType::Float => cell
                .parse::<f64>()
                .map(Value::Float)
                .unwrap_or_else(|_| Value::String(cell.to_string())),
            ColumnType::String => Value::String(cell.to_string()),
        }
    }
}
