use crate::{config::SourceArgs, output::OutputArgs};
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run a SELECT statement against the CSV files in the data directory
    Query {
        #[arg(long, help = "SQL statement to execute")]
        sql: String,

        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the parsed query descriptor as JSON
    Ast {
        #[arg(long, help = "SQL statement to parse")]
        sql: String,
    },
    /// Execute a JSON query descriptor, skipping the SQL parser
    Run {
        #[arg(long, help = "Path to a JSON query descriptor")]
        descriptor: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the columns and inferred types of a table
    Schema {
        #[arg(long, help = "Table name (file name without .csv)")]
        table: String,

        #[command(flatten)]
        source: SourceArgs,

        #[arg(
            long,
            help = "If specified, writes the schema to this file instead of stdout"
        )]
        output: Option<PathBuf>,
    },
}
