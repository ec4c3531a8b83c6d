use crate::error::{ExpressionError, Result};
use model::{core::value::Value, query::descriptor::FilterClause, records::row::Row};
use std::{cmp::Ordering, fmt, str::FromStr};
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

impl Comparator {
    pub fn test(&self, actual: &Value, target: &Value) -> bool {
        match self {
            Comparator::Equal => actual.equal(target),
            Comparator::NotEqual => !actual.equal(target),

            Comparator::GreaterThan => matches!(actual.compare(target), Some(Ordering::Greater)),
            Comparator::GreaterThanOrEqual => matches!(
                actual.compare(target),
                Some(Ordering::Greater) | Some(Ordering::Equal)
            ),
            Comparator::LessThan => matches!(actual.compare(target), Some(Ordering::Less)),
            Comparator::LessThanOrEqual => matches!(
                actual.compare(target),
                Some(Ordering::Less) | Some(Ordering::Equal)
            ),
        }
    }
}

impl FromStr for Comparator {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "=" => Ok(Comparator::Equal),
            "!=" => Ok(Comparator::NotEqual),
            ">" => Ok(Comparator::GreaterThan),
            ">=" => Ok(Comparator::GreaterThanOrEqual),
            "<" => Ok(Comparator::LessThan),
            "<=" => Ok(Comparator::LessThanOrEqual),
            _ => Err(ExpressionError::UnsupportedOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Comparator::Equal => "=",
            Comparator::NotEqual => "!=",
            Comparator::GreaterThan => ">",
            Comparator::GreaterThanOrEqual => ">=",
            Comparator::LessThan => "<",
            Comparator::LessThanOrEqual => "<=",
        };
        write!(f, "{op}")
    }
}

/// A filter clause with its operator validated.
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    pub field: String,
    pub op: Comparator,
    pub value: Value,
}

impl Condition {
    pub fn compile(clause: &FilterClause) -> Result<Self> {
        Ok(Condition {
            field: clause.field.clone(),
            op: clause.operator.parse()?,
            value: clause.value.clone(),
        })
    }

    /// Tests one row. An absent field reads as `Null`.
    pub fn eval(&self, row: &Row) -> bool {
        let actual = row.get(&self.field).unwrap_or(&Value::Null);
        let passed = self.op.test(actual, &self.value);

        trace!(
            field = %self.field,
            op = %self.op,
            actual = %actual,
            target = %self.value,
            passed,
            "Evaluated condition"
        );

        passed
    }
}

/// Conjunction of conditions. An empty filter keeps every row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Filter::default()
    }

    /// Compiles every clause up front so an unsupported operator fails the
    /// whole filter before any row is seen.
    pub fn compile(clauses: &[FilterClause]) -> Result<Self> {
        let conditions = clauses
            .iter()
            .map(Condition::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Filter { conditions })
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn eval(&self, row: &Row) -> bool {
        self.conditions.iter().all(|c| c.eval(row))
    }

    /// Keeps the rows passing every condition, preserving their order.
    pub fn apply(&self, rows: Vec<Row>) -> Vec<Row> {
        if self.is_empty() {
            return rows;
        }
        rows.into_iter().filter(|row| self.eval(row)).collect()
    }
}

/// Tests one row against one clause.
pub fn evaluate(row: &Row, clause: &FilterClause) -> Result<bool> {
    Ok(Condition::compile(clause)?.eval(row))
}
