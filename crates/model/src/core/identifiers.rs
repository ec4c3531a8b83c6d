use serde::{Deserialize, Serialize};
use std::fmt;

/// A field identifier as written in a query, split on its first `.`.
///
/// `orders.id` yields qualifier `orders` and column `id`; a bare `id` has no
/// qualifier. Splitting happens once, callers work with the parts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    pub qualifier: Option<String>,
    pub column: String,
}

impl QualifiedName {
    pub fn parse(ident: &str) -> Self {
        match ident.split_once('.') {
            Some((qualifier, column)) => QualifiedName {
                qualifier: Some(qualifier.to_string()),
                column: column.to_string(),
            },
            None => QualifiedName {
                qualifier: None,
                column: ident.to_string(),
            },
        }
    }

    /// Strict `table.column` form: exactly one dot with both parts non-empty.
    pub fn parse_strict(ident: &str) -> Option<Self> {
        let (qualifier, column) = ident.split_once('.')?;
        if qualifier.is_empty() || column.is_empty() || column.contains('.') {
            return None;
        }

        Some(QualifiedName {
            qualifier: Some(qualifier.to_string()),
            column: column.to_string(),
        })
    }

    pub fn is_qualified(&self) -> bool {
        self.qualifier.is_some()
    }

    pub fn is_qualified_by(&self, table: &str) -> bool {
        self.qualifier.as_deref() == Some(table)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(q) => write!(f, "{q}.{}", self.column),
            None => write!(f, "{}", self.column),
        }
    }
}
