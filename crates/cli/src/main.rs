use crate::{config::Config, error::CliError, output::OutputArgs};
use clap::Parser;
use commands::Commands;
use connectors::file::csv::source::CsvSource;
use engine_core::QueryExecutor;
use model::query::descriptor::QueryDescriptor;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "csvql",
    version = "0.1.0",
    about = "Run SQL SELECT queries over CSV files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Logs go to stderr, results to stdout
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            sql,
            source,
            output,
        } => {
            let query = sql_syntax::parse(&sql)?;
            run_query(&query, Config::from_env(&source)?, &output).await?;
        }
        Commands::Ast { sql } => {
            let query = sql_syntax::parse(&sql)?;
            let json = serde_json::to_string_pretty(&query)?;
            println!("{json}");
        }
        Commands::Run {
            descriptor,
            source,
            output,
        } => {
            let raw = tokio::fs::read_to_string(&descriptor).await?;
            let query: QueryDescriptor = serde_json::from_str(&raw)?;
            run_query(&query, Config::from_env(&source)?, &output).await?;
        }
        Commands::Schema {
            table,
            source,
            output,
        } => {
            let config = Config::from_env(&source)?;
            let metadata = CsvSource::new(config.data_dir, config.settings)
                .metadata(&table)
                .await?;
            let json = serde_json::to_string_pretty(&metadata)?;
            output::emit(&json, output.as_ref()).await?;
        }
    }

    Ok(())
}

async fn run_query(
    query: &QueryDescriptor,
    config: Config,
    output: &OutputArgs,
) -> Result<(), CliError> {
    info!(
        data_dir = %config.data_dir.display(),
        table = %query.table,
        "Executing query"
    );

    let executor = QueryExecutor::new(CsvSource::new(config.data_dir, config.settings));
    let rows = executor.execute(query).await?;

    let text = output::render(&rows, output.format)?;
    output::emit(&text, output.output.as_ref()).await
}
