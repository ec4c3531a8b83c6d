use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "sql.pest"]
pub struct SqlParser;
