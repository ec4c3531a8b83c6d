use crate::error::CliError;
use clap::{Args, ValueEnum};
use model::records::row::ResultRow;
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq)]
pub enum Format {
    #[default]
    Json,
    Table,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = Format::Json, help = "Result format")]
    pub format: Format,

    #[arg(
        long,
        help = "If specified, writes the result to this file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

pub fn render(rows: &[ResultRow], format: Format) -> Result<String, CliError> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(rows)?),
        Format::Table => Ok(render_table(rows)),
    }
}

/// Writes to `path` when given, stdout otherwise.
pub async fn emit(text: &str, path: Option<&PathBuf>) -> Result<(), CliError> {
    match path {
        Some(path) => tokio::fs::write(path, text).await?,
        None => println!("{text}"),
    }
    Ok(())
}

fn render_table(rows: &[ResultRow]) -> String {
    let Some(first) = rows.first() else {
        return "(0 rows)".to_string();
    };

    // Every row of one result shares the same identifiers in the same order
    let headers: Vec<&str> = first.names().collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|h| row.get_value(h).to_string())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: Vec<&str>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{v:<width$}", width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 3);
    out.push(line(headers.clone()));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &cells {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.push(format!("({} rows)", rows.len()));
    out.join("\n")
}
