use crate::core::value::Value;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
}

/// One record keyed by column name, in column order.
///
/// Source rows are keyed by bare column names. Rows produced by a join or a
/// projection are keyed by the field identifiers the query asked for, which
/// may be qualified (`orders.id`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub field_values: Vec<FieldValue>,
}

/// A projected output row. Same shape as [`Row`], keyed by requested identifiers.
pub type ResultRow = Row;

impl Row {
    pub fn new(field_values: Vec<FieldValue>) -> Self {
        Row { field_values }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Row {
            field_values: Vec::with_capacity(capacity),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.field_values
            .iter()
            .find(|f| f.name == field)
            .map(|f| &f.value)
    }

    /// Looks a field up, reading an absent field as `Null`.
    pub fn get_value(&self, field: &str) -> Value {
        self.get(field).cloned().unwrap_or(Value::Null)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Appends a field, replacing the value in place if the name already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.field_values.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.value = value,
            None => self.field_values.push(FieldValue { name, value }),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.field_values.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.field_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut row = Row::default();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}

/// Builds a [`Row`] from `name => value` pairs.
#[macro_export]
macro_rules! row {
    () => {
        $crate::records::row::Row::default()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        [$(($name, $crate::core::value::Value::from($value))),+]
            .into_iter()
            .collect::<$crate::records::row::Row>()
    };
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.field_values.len()))?;
        for field in &self.field_values {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of column names to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
                let mut row = Row::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, Value>()? {
                    row.insert(name, value);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact() {
        let row = row! { "id" => 1, "name" => "a" };
        assert_eq!(row.get("id"), Some(&Value::Int(1)));
        assert_eq!(row.get("ID"), None);
        assert_eq!(row.get_value("missing"), Value::Null);
    }

    #[test]
    fn insert_replaces_existing_field() {
        let mut row = row! { "id" => 1 };
        row.insert("id", Value::Int(2));
        assert_eq!(row.len(), 1);
        assert_eq!(row.get_value("id"), Value::Int(2));
    }

    #[test]
    fn serializes_in_field_order() {
        let row = row! { "orders.id" => 1, "customers.name" => Value::Null, "a" => "x" };
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"orders.id":1,"customers.name":null,"a":"x"}"#);
    }

    #[test]
    fn deserializes_from_json_object() {
        let row: Row = serde_json::from_str(r#"{"id": 2, "name": "b"}"#).unwrap();
        assert_eq!(row, row! { "id" => 2, "name" => "b" });
    }
}
