use crate::{core::value::Value, query::join::JoinSpec};
use serde::{Deserialize, Serialize};

/// A parsed `SELECT` statement.
///
/// Produced by the SQL front end or deserialized from JSON. Operators and
/// join types are kept as written; the engine validates them when planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Requested field identifiers in output order, possibly qualified.
    pub fields: Vec<String>,
    pub table: String,
    #[serde(default)]
    pub where_clauses: Vec<FilterClause>,
    #[serde(default)]
    pub join: Option<JoinSpec>,
}

/// `field operator value`, one conjunct of a `WHERE` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    pub field: String,
    pub operator: String,
    pub value: Value,
}

impl QueryDescriptor {
    pub fn new(table: impl Into<String>, fields: Vec<String>) -> Self {
        QueryDescriptor {
            fields,
            table: table.into(),
            where_clauses: Vec::new(),
            join: None,
        }
    }

    pub fn with_where(mut self, clause: FilterClause) -> Self {
        self.where_clauses.push(clause);
        self
    }

    pub fn with_join(mut self, join: JoinSpec) -> Self {
        self.join = Some(join);
        self
    }

    pub fn joined_table(&self) -> Option<&str> {
        self.join.as_ref().map(|j| j.table.as_str())
    }
}

impl FilterClause {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: Value) -> Self {
        FilterClause {
            field: field.into(),
            operator: operator.into(),
            value,
        }
    }
}
