use crate::{
    error::QueryError,
    join::JoinEngine,
    plan::{JoinStep, QueryPlan},
    projection::{project, select},
};
use connectors::source::RowSource;
use model::{
    query::descriptor::QueryDescriptor,
    records::row::{ResultRow, Row},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs `SELECT` queries against a [`RowSource`].
///
/// Every call loads its tables afresh; nothing is shared between queries.
#[derive(Clone)]
pub struct QueryExecutor {
    source: Arc<dyn RowSource>,
}

impl QueryExecutor {
    pub fn new(source: impl RowSource + 'static) -> Self {
        Self::from_arc(Arc::new(source))
    }

    pub fn from_arc(source: Arc<dyn RowSource>) -> Self {
        QueryExecutor { source }
    }

    /// Loads, joins, filters and projects. Any error aborts the whole query.
    pub async fn execute(&self, query: &QueryDescriptor) -> Result<Vec<ResultRow>, QueryError> {
        let start = std::time::Instant::now();

        // Validate the whole descriptor before touching the source
        let plan = QueryPlan::build(query)?;
        debug!(
            table = %plan.table,
            joined = ?plan.joined_table(),
            conditions = plan.filter.conditions().len(),
            fields = plan.working_fields.len(),
            "Planned query"
        );

        let working = self.working_rows(&plan).await?;
        let loaded = working.len();

        let rows: Vec<ResultRow> = plan
            .filter
            .apply(working)
            .iter()
            .map(|row| select(row, &plan.output_fields))
            .collect();

        info!(
            table = %plan.table,
            scanned = loaded,
            returned = rows.len(),
            took_ms = start.elapsed().as_millis() as u64,
            "Query complete"
        );

        Ok(rows)
    }

    /// Rows keyed by the plan's working identifiers, joined when requested.
    async fn working_rows(&self, plan: &QueryPlan) -> Result<Vec<Row>, QueryError> {
        match &plan.join {
            JoinStep::Apply(join) => {
                let (main, joined) = tokio::try_join!(
                    self.source.load(&join.main_table),
                    self.source.load(&join.joined_table)
                )?;
                Ok(JoinEngine::new(join, &plan.working_fields).join(&main, &joined))
            }
            JoinStep::Skip { join_type } => {
                warn!(join_type = %join_type, "Unsupported join type, running query without join");
                self.unjoined_rows(plan).await
            }
            JoinStep::None => self.unjoined_rows(plan).await,
        }
    }

    async fn unjoined_rows(&self, plan: &QueryPlan) -> Result<Vec<Row>, QueryError> {
        let main = self.source.load(&plan.table).await?;
        Ok(main
            .iter()
            .map(|row| project(&plan.working_fields, Some(row), None))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use connectors::{error::SourceError, memory::MemorySource};
    use model::{
        core::value::Value,
        query::{
            descriptor::FilterClause,
            join::{JoinPredicate, JoinSpec},
        },
        row,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn people() -> MemorySource {
        MemorySource::new().with_table(
            "people",
            vec![
                row! { "id" => 1, "name" => "a", "age" => 30 },
                row! { "id" => 2, "name" => "b", "age" => 25 },
                row! { "id" => 3, "name" => "c", "age" => 41 },
            ],
        )
    }

    fn shop() -> MemorySource {
        MemorySource::new()
            .with_table(
                "orders",
                vec![row! { "id" => 1, "cust" => 1 }, row! { "id" => 2, "cust" => 99 }],
            )
            .with_table(
                "customers",
                vec![row! { "id" => 1, "name" => "x" }, row! { "id" => 2, "name" => "y" }],
            )
    }

    fn orders_query(join_type: &str) -> QueryDescriptor {
        QueryDescriptor::new("orders", vec!["orders.id".into(), "customers.name".into()])
            .with_join(JoinSpec::new(
                join_type,
                "customers",
                JoinPredicate::new("orders.cust", "customers.id"),
            ))
    }

    /// Counts loads so tests can assert that nothing was read.
    struct CountingSource {
        inner: MemorySource,
        loads: AtomicUsize,
    }

    #[async_trait]
    impl RowSource for CountingSource {
        async fn load(&self, table: &str) -> Result<Vec<Row>, SourceError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.inner.load(table).await
        }
    }

    #[tokio::test]
    async fn filters_and_projects_without_join() {
        let query = QueryDescriptor::new("people", vec!["name".into()])
            .with_where(FilterClause::new("id", ">", Value::Int(1)));
        let rows = QueryExecutor::new(people()).execute(&query).await.unwrap();
        assert_eq!(rows, vec![row! { "name" => "b" }, row! { "name" => "c" }]);
    }

    #[tokio::test]
    async fn clauses_are_conjunctive() {
        let query = QueryDescriptor::new("people", vec!["id".into()])
            .with_where(FilterClause::new("age", ">=", Value::Int(30)))
            .with_where(FilterClause::new("name", "!=", Value::from("c")));
        let rows = QueryExecutor::new(people()).execute(&query).await.unwrap();
        assert_eq!(rows, vec![row! { "id" => 1 }]);
    }

    #[tokio::test]
    async fn projection_never_leaks_columns() {
        let query = QueryDescriptor::new("people", vec!["age".into(), "people.id".into()])
            .with_where(FilterClause::new("name", "=", Value::from("b")));
        let rows = QueryExecutor::new(people()).execute(&query).await.unwrap();
        assert_eq!(rows, vec![row! { "age" => 25, "people.id" => 2 }]);
    }

    #[tokio::test]
    async fn inner_join() {
        let rows = QueryExecutor::new(shop())
            .execute(&orders_query("INNER"))
            .await
            .unwrap();
        assert_eq!(rows, vec![row! { "orders.id" => 1, "customers.name" => "x" }]);
    }

    #[tokio::test]
    async fn left_join_pads_with_null() {
        let rows = QueryExecutor::new(shop())
            .execute(&orders_query("left"))
            .await
            .unwrap();
        assert_eq!(
            rows,
            vec![
                row! { "orders.id" => 1, "customers.name" => "x" },
                row! { "orders.id" => 2, "customers.name" => Value::Null },
            ]
        );
    }

    #[tokio::test]
    async fn right_join_pads_with_null() {
        let rows = QueryExecutor::new(shop())
            .execute(&orders_query("Right"))
            .await
            .unwrap();
        assert_eq!(
            rows,
            vec![
                row! { "orders.id" => 1, "customers.name" => "x" },
                row! { "orders.id" => Value::Null, "customers.name" => "y" },
            ]
        );
    }

    #[tokio::test]
    async fn filters_after_join_on_unprojected_field() {
        let query = orders_query("LEFT")
            .with_where(FilterClause::new("customers.id", "=", Value::Int(1)));
        let rows = QueryExecutor::new(shop()).execute(&query).await.unwrap();
        assert_eq!(rows, vec![row! { "orders.id" => 1, "customers.name" => "x" }]);
    }

    #[tokio::test]
    async fn bare_field_is_padded_in_right_join() {
        let query = QueryDescriptor::new("orders", vec!["id".into(), "customers.name".into()])
            .with_join(JoinSpec::new(
                "RIGHT",
                "customers",
                JoinPredicate::new("orders.cust", "customers.id"),
            ));
        let rows = QueryExecutor::new(shop()).execute(&query).await.unwrap();
        assert_eq!(
            rows,
            vec![
                row! { "id" => 1, "customers.name" => "x" },
                row! { "id" => Value::Null, "customers.name" => "y" },
            ]
        );
    }

    #[tokio::test]
    async fn null_keys_join_and_filter_alike() {
        let source = MemorySource::new()
            .with_table(
                "orders",
                vec![
                    row! { "id" => 10, "cust" => 1 },
                    row! { "id" => 11, "cust" => Value::Null },
                ],
            )
            .with_table(
                "customers",
                vec![
                    row! { "id" => 1, "name" => "x" },
                    row! { "id" => Value::Null, "name" => "anon" },
                ],
            );
        let executor = QueryExecutor::new(source);

        let joined = executor.execute(&orders_query("INNER")).await.unwrap();
        assert_eq!(
            joined,
            vec![
                row! { "orders.id" => 10, "customers.name" => "x" },
                row! { "orders.id" => 11, "customers.name" => "anon" },
            ]
        );

        let filtered = QueryDescriptor::new("orders", vec!["id".into()])
            .with_where(FilterClause::new("cust", "=", Value::Null));
        let rows = executor.execute(&filtered).await.unwrap();
        assert_eq!(rows, vec![row! { "id" => 11 }]);
    }

    #[tokio::test]
    async fn unknown_join_type_runs_unjoined() {
        let query = QueryDescriptor::new("orders", vec!["orders.id".into(), "customers.name".into()])
            .with_join(JoinSpec::new(
                "FULL",
                "customers",
                JoinPredicate::new("orders.cust", "customers.id"),
            ));
        let rows = QueryExecutor::new(shop()).execute(&query).await.unwrap();
        assert_eq!(
            rows,
            vec![
                row! { "orders.id" => 1, "customers.name" => Value::Null },
                row! { "orders.id" => 2, "customers.name" => Value::Null },
            ]
        );
    }

    #[tokio::test]
    async fn invalid_queries_fail_before_loading() {
        let source = Arc::new(CountingSource {
            inner: shop(),
            loads: AtomicUsize::new(0),
        });
        let executor = QueryExecutor::from_arc(source.clone());

        let bad_operator = orders_query("INNER")
            .with_where(FilterClause::new("orders.id", "==", Value::Int(1)));
        let err = executor.execute(&bad_operator).await.unwrap_err();
        assert!(err.is_unsupported_operator());

        let mut bad_predicate = orders_query("INNER");
        if let Some(join) = bad_predicate.join.as_mut() {
            join.predicate.left = "cust".into();
        }
        let err = executor.execute(&bad_predicate).await.unwrap_err();
        assert!(matches!(err, QueryError::MalformedJoinPredicate(p) if p == "cust"));

        let mut bad_qualifier = orders_query("INNER");
        bad_qualifier.fields.push("products.sku".into());
        let err = executor.execute(&bad_qualifier).await.unwrap_err();
        assert!(matches!(err, QueryError::UnknownTableQualifier { .. }));

        assert_eq!(source.loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn load_failures_propagate() {
        let query = QueryDescriptor::new("missing", vec!["id".into()]);
        let err = QueryExecutor::new(shop()).execute(&query).await.unwrap_err();
        assert!(matches!(
            err,
            QueryError::ResourceLoad(SourceError::TableNotFound(t)) if t == "missing"
        ));

        let mut query = orders_query("INNER");
        if let Some(join) = query.join.as_mut() {
            join.table = "ghosts".into();
            join.predicate.right = "ghosts.id".into();
        }
        query.fields = vec!["orders.id".into()];
        let err = QueryExecutor::new(shop()).execute(&query).await.unwrap_err();
        assert!(matches!(err, QueryError::ResourceLoad(_)));
    }
}
