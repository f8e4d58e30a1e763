//! CLI argument parsing for the contatos-worker binary.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "contatos-worker", about = "Contact spreadsheet normalization worker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize one contact sheet and wait for the result
    Process {
        /// Path to the input CSV file (first row is the header)
        file: String,
        /// Poll interval in milliseconds while waiting
        #[arg(long, default_value_t = 200)]
        poll_ms: u64,
    },
}

/// Read all data rows from a CSV file. The header row supplies the column
/// width, mirroring how uploads declare their layout; its cell names are
/// not interpreted.
pub fn read_rows(path: &str) -> Result<(Vec<Vec<String>>, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path))?;

    let column_count = reader.headers().context("reading header row")?.len();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("reading data row")?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok((rows, column_count))
}
