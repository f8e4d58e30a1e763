//! contatos-worker - contact spreadsheet normalization worker
//!
//! Reads a contact sheet, runs the async normalization pipeline, and
//! writes the cleaned sheet plus summary counts. Job state is held in
//! memory only; nothing survives a restart.

mod cli;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contatos_worker::config::Config;
use contatos_worker::services::artifact::CsvArtifactWriter;
use contatos_worker::services::job_store::JobStore;
use contatos_worker::services::pipeline::ContactProcessor;
use contatos_worker::types::JobState;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs directory - use LOGS_DIR env var or default to ./logs
    let logs_dir = std::env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "worker.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Initialize logging - both stdout and file
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,contatos_worker=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    let args = cli::Cli::parse();

    let config = Config::from_env()?;
    info!("Configuration loaded");

    let store = Arc::new(JobStore::new());
    let writer = Arc::new(CsvArtifactWriter::new(&config.output_dir));
    let processor = ContactProcessor::new(store, writer, config);

    match args.command {
        cli::Command::Process { file, poll_ms } => process_file(&processor, &file, poll_ms).await,
    }
}

async fn process_file(processor: &ContactProcessor, file: &str, poll_ms: u64) -> Result<()> {
    let (rows, column_count) = cli::read_rows(file)?;
    let filename = Path::new(file)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file);

    let submitted = processor.submit(rows, column_count, filename);
    info!("Job {} started: {} rows", submitted.job_id, submitted.row_count);

    loop {
        tokio::time::sleep(Duration::from_millis(poll_ms)).await;

        let status = processor.query_status(submitted.job_id)?;
        info!(
            "Job {}: {:?} {}%",
            submitted.job_id, status.state, status.progress_percent
        );

        match status.state {
            JobState::Completed => {
                let artifact = processor.fetch_artifact(submitted.job_id)?;
                let result = status.result.context("completed job without result")?;
                println!("Output: {}", artifact.path);
                println!(
                    "Rows: {} in, {} kept, {} blank; blank columns: {}",
                    result.original_row_count,
                    result.output_row_count,
                    result.blank_row_count,
                    result.blank_column_count
                );
                return Ok(());
            }
            JobState::Failed => {
                anyhow::bail!(
                    "processing failed: {}",
                    status.error.unwrap_or_else(|| "unknown error".to_string())
                );
            }
            JobState::Queued | JobState::Processing => {}
        }
    }
}
