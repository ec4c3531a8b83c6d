#![allow(dead_code)]

use connectors::file::csv::{settings::CsvSettings, source::CsvSource};
use engine_core::{QueryError, QueryExecutor};
use model::records::row::ResultRow;
use std::{fs, path::Path};
use tempfile::TempDir;

pub const ORDERS_CSV: &str = "\
id,cust,total
1,1,10.5
2,99,3
3,2,7.25
4,1,
";

pub const CUSTOMERS_CSV: &str = "\
id,name,city
1,x,Paris
2,y,Oslo
3,z,Paris
";

pub const PEOPLE_CSV: &str = "\
id,name
1,a
2,b
";

/// A temp data directory holding one `<table>.csv` per entry.
pub fn data_dir(tables: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for (table, contents) in tables {
        write_table(dir.path(), table, contents);
    }
    dir
}

pub fn write_table(dir: &Path, table: &str, contents: &str) {
    fs::write(dir.join(format!("{table}.csv")), contents).expect("write csv fixture");
}

/// The standard orders/customers/people fixture.
pub fn shop_dir() -> TempDir {
    data_dir(&[
        ("orders", ORDERS_CSV),
        ("customers", CUSTOMERS_CSV),
        ("people", PEOPLE_CSV),
    ])
}

pub fn executor(dir: &Path) -> QueryExecutor {
    executor_with(dir, CsvSettings::default())
}

pub fn executor_with(dir: &Path, settings: CsvSettings) -> QueryExecutor {
    QueryExecutor::new(CsvSource::new(dir, settings))
}

/// Parses and executes `sql` against the CSV tables in `dir`.
pub async fn run_sql(dir: &Path, sql: &str) -> Result<Vec<ResultRow>, QueryError> {
    let query = sql_syntax::parse(sql).expect("parse query");
    executor(dir).execute(&query).await
}

/// The values of one column across result rows, rendered for easy comparison.
pub fn column(rows: &[ResultRow], field: &str) -> Vec<String> {
    rows.iter().map(|r| r.get_value(field).to_string()).collect()
}
