use crate::plan::{FieldRef, Qualifier};
use model::{
    core::value::Value,
    records::row::{ResultRow, Row},
};

impl FieldRef {
    /// Reads this field from a main/joined row pair. A missing side, as in
    /// the unmatched half of an outer join, reads as `Null`.
    pub fn read(&self, main: Option<&Row>, joined: Option<&Row>) -> Value {
        let column = self.column.as_str();
        let value = match self.qualifier {
            Qualifier::Main => lookup(main, column),
            Qualifier::Joined => lookup(joined, column),
            Qualifier::None => lookup(main, column).or_else(|| lookup(joined, column)),
        };
        value.cloned().unwrap_or(Value::Null)
    }

    /// Pins a bare field to one side of a join: the main table when any main
    /// row has the column, otherwise the joined table when any joined row
    /// has it. Qualified fields are returned unchanged.
    pub fn bind(&self, main: &[Row], joined: &[Row]) -> FieldRef {
        if self.qualifier != Qualifier::None {
            return self.clone();
        }

        let has_column = |rows: &[Row]| rows.iter().any(|r| r.contains(&self.column));
        let qualifier = if !has_column(main) && has_column(joined) {
            Qualifier::Joined
        } else {
            Qualifier::Main
        };

        FieldRef {
            qualifier,
            ..self.clone()
        }
    }
}

fn lookup<'r>(row: Option<&'r Row>, column: &str) -> Option<&'r Value> {
    row.and_then(|r| r.get(column))
}

/// Builds a row keyed by each field's identifier, in field order.
pub fn project(fields: &[FieldRef], main: Option<&Row>, joined: Option<&Row>) -> Row {
    let mut row = Row::with_capacity(fields.len());
    for field in fields {
        row.insert(field.identifier.clone(), field.read(main, joined));
    }
    row
}

/// Keeps only the requested identifiers of an already projected row.
pub fn select(row: &Row, identifiers: &[String]) -> ResultRow {
    let mut out = ResultRow::with_capacity(identifiers.len());
    for identifier in identifiers {
        out.insert(identifier.clone(), row.get_value(identifier));
    }
    out
}
