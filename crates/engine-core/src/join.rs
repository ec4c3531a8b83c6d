use crate::{
    plan::{FieldRef, JoinKeys, JoinPlan},
    projection::project,
};
use model::{core::value::Value, query::join::JoinKind, records::row::Row};
use tracing::debug;

/// Combines main and joined rows under an equality predicate, projecting
/// each combination onto the planned fields.
///
/// Output order follows the driving table (main rows for INNER and LEFT,
/// joined rows for RIGHT); within one driving row, matches keep the order of
/// the other table.
pub struct JoinEngine<'a> {
    plan: &'a JoinPlan,
    fields: &'a [FieldRef],
}

impl<'a> JoinEngine<'a> {
    pub fn new(plan: &'a JoinPlan, fields: &'a [FieldRef]) -> Self {
        JoinEngine { plan, fields }
    }

    pub fn join(&self, main: &[Row], joined: &[Row]) -> Vec<Row> {
        let fields: Vec<FieldRef> = self.fields.iter().map(|f| f.bind(main, joined)).collect();
        let rows = match self.plan.kind {
            JoinKind::Inner => self.inner(&fields, main, joined),
            JoinKind::Left => self.left(&fields, main, joined),
            JoinKind::Right => self.right(&fields, main, joined),
        };

        debug!(
            kind = %self.plan.kind,
            main_table = %self.plan.main_table,
            joined_table = %self.plan.joined_table,
            main_rows = main.len(),
            joined_rows = joined.len(),
            output_rows = rows.len(),
            "Joined tables"
        );

        rows
    }

    fn inner(&self, fields: &[FieldRef], main: &[Row], joined: &[Row]) -> Vec<Row> {
        main.iter()
            .flat_map(move |m| {
                joined
                    .iter()
                    .filter(move |j| self.plan.keys.matches(m, j))
                    .map(move |j| project(fields, Some(m), Some(j)))
            })
            .collect()
    }

    fn left(&self, fields: &[FieldRef], main: &[Row], joined: &[Row]) -> Vec<Row> {
        let mut out = Vec::with_capacity(main.len());
        for m in main {
            let before = out.len();
            out.extend(
                joined
                    .iter()
                    .filter(|j| self.plan.keys.matches(m, j))
                    .map(|j| project(fields, Some(m), Some(j))),
            );
            if out.len() == before {
                out.push(project(fields, Some(m), None));
            }
        }
        out
    }

    fn right(&self, fields: &[FieldRef], main: &[Row], joined: &[Row]) -> Vec<Row> {
        let mut out = Vec::with_capacity(joined.len());
        for j in joined {
            let before = out.len();
            out.extend(
                main.iter()
                    .filter(|m| self.plan.keys.matches(m, j))
                    .map(|m| project(fields, Some(m), Some(j))),
            );
            if out.len() == before {
                out.push(project(fields, None, Some(j)));
            }
        }
        out
    }
}

impl JoinKeys {
    /// Strict equality of the key columns, the same equality `WHERE a = b`
    /// uses. A missing key reads as `Null`, and `Null` matches `Null`.
    pub fn matches(&self, main: &Row, joined: &Row) -> bool {
        let left = main.get(&self.main_column).unwrap_or(&Value::Null);
        let right = joined.get(&self.joined_column).unwrap_or(&Value::Null);
        left.equal(right)
    }
}
