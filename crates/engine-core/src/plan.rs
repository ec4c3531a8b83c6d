use crate::error::QueryError;
use expression_engine::Filter;
use model::{
    core::identifiers::QualifiedName,
    query::{
        descriptor::QueryDescriptor,
        join::{JoinKind, JoinPredicate, JoinSpec},
    },
};

/// Which side of a join a field identifier reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    Main,
    Joined,
    /// Bare column. A join pins it to one side for the whole result; without
    /// a join it reads the main row.
    None,
}

/// A requested field identifier resolved against the query's tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    /// The identifier exactly as requested; output rows are keyed by it.
    pub identifier: String,
    pub qualifier: Qualifier,
    /// Column name within the source table's own rows.
    pub column: String,
}

impl FieldRef {
    pub fn resolve(identifier: &str, main: &str, joined: Option<&str>) -> Result<Self, QueryError> {
        let name = QualifiedName::parse(identifier);
        let qualifier = match name.qualifier.as_deref() {
            None => Qualifier::None,
            Some(q) if q == main => Qualifier::Main,
            Some(q) if Some(q) == joined => Qualifier::Joined,
            Some(q) => {
                return Err(QueryError::UnknownTableQualifier {
                    field: identifier.to_string(),
                    qualifier: q.to_string(),
                });
            }
        };

        Ok(FieldRef {
            identifier: identifier.to_string(),
            qualifier,
            column: name.column,
        })
    }
}

/// Join predicate with qualifiers stripped and sides aligned to main/joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinKeys {
    pub main_column: String,
    pub joined_column: String,
}

impl JoinKeys {
    /// Both sides must be `table.column`. The left side is read from the main
    /// row and the right side from the joined row, unless the qualifiers name
    /// the tables the other way round, in which case the sides are swapped.
    pub fn resolve(
        predicate: &JoinPredicate,
        main: &str,
        joined: &str,
    ) -> Result<Self, QueryError> {
        let left = QualifiedName::parse_strict(&predicate.left)
            .ok_or_else(|| QueryError::MalformedJoinPredicate(predicate.left.clone()))?;
        let right = QualifiedName::parse_strict(&predicate.right)
            .ok_or_else(|| QueryError::MalformedJoinPredicate(predicate.right.clone()))?;

        let reversed = main != joined && left.is_qualified_by(joined) && right.is_qualified_by(main);
        let (main_side, joined_side) = if reversed { (right, left) } else { (left, right) };

        Ok(JoinKeys {
            main_column: main_side.column,
            joined_column: joined_side.column,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinPlan {
    pub kind: JoinKind,
    pub main_table: String,
    pub joined_table: String,
    pub keys: JoinKeys,
}

/// What the executor does with the query's `JOIN`, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinStep {
    None,
    Apply(JoinPlan),
    /// The join type is not INNER, LEFT or RIGHT; the query runs unjoined.
    Skip { join_type: String },
}

/// A query with every identifier and operator validated, ready to run.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    pub table: String,
    pub join: JoinStep,
    pub filter: Filter,
    /// Fields carried through join and filter: the requested fields followed
    /// by any filtered field that was not requested.
    pub working_fields: Vec<FieldRef>,
    /// The requested output identifiers, in order.
    pub output_fields: Vec<String>,
}

impl QueryPlan {
    pub fn build(query: &QueryDescriptor) -> Result<Self, QueryError> {
        let filter = Filter::compile(&query.where_clauses)?;
        let joined_table = query.joined_table();

        let join = match &query.join {
            None => JoinStep::None,
            Some(spec) => Self::plan_join(&query.table, spec)?,
        };

        let mut working_fields: Vec<FieldRef> = Vec::with_capacity(query.fields.len());
        let filtered = query.where_clauses.iter().map(|c| &c.field);
        for identifier in query.fields.iter().chain(filtered) {
            if working_fields.iter().any(|f| &f.identifier == identifier) {
                continue;
            }
            working_fields.push(FieldRef::resolve(identifier, &query.table, joined_table)?);
        }

        Ok(QueryPlan {
            table: query.table.clone(),
            join,
            filter,
            working_fields,
            output_fields: query.fields.clone(),
        })
    }

    fn plan_join(main: &str, spec: &JoinSpec) -> Result<JoinStep, QueryError> {
        let Some(kind) = spec.kind() else {
            return Ok(JoinStep::Skip {
                join_type: spec.join_type.clone(),
            });
        };

        Ok(JoinStep::Apply(JoinPlan {
            kind,
            main_table: main.to_string(),
            joined_table: spec.table.clone(),
            keys: JoinKeys::resolve(&spec.predicate, main, &spec.table)?,
        }))
    }

    pub fn joined_table(&self) -> Option<&str> {
        match &self.join {
            JoinStep::Apply(plan) => Some(&plan.joined_table),
            _ => None,
        }
    }
}
