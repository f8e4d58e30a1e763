//! Job pipeline
//!
//! Drives one job from Queued to a terminal state on its own tokio task:
//! schema detection, per-row normalization, staged progress updates,
//! artifact construction. Jobs are fully independent; no cross-job
//! coordination and no cancellation — once processing starts, the job
//! runs to a terminal state even if nobody keeps polling.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::WorkerError;
use crate::services::artifact::{self, ArtifactWriter, RowCounts};
use crate::services::job_store::JobStore;
use crate::services::{normalizer, schema};
use crate::types::{ArtifactRef, ContactRecord, JobState, JobStatusResponse, SubmitResponse};

/// Progress band reserved for the row pass. Below it is schema detection,
/// above it artifact construction; 100 is set only by `complete`, after
/// the artifact exists.
const ROW_PROGRESS_START: u8 = 10;
const ROW_PROGRESS_END: u8 = 90;

/// Entry point for collaborators: submits jobs and answers status and
/// download queries. Status reads only touch the store and never block
/// behind a running pipeline.
pub struct ContactProcessor {
    store: Arc<JobStore>,
    writer: Arc<dyn ArtifactWriter>,
    config: Config,
}

impl ContactProcessor {
    pub fn new(store: Arc<JobStore>, writer: Arc<dyn ArtifactWriter>, config: Config) -> Self {
        Self {
            store,
            writer,
            config,
        }
    }

    /// Start a job over the given rows; returns immediately. The rows are
    /// owned by the spawned task and released on every exit path.
    pub fn submit(
        &self,
        rows: Vec<Vec<String>>,
        column_count: usize,
        filename_hint: &str,
    ) -> SubmitResponse {
        let job_id = self.store.create(filename_hint);
        let row_count = rows.len();
        info!(
            "Job {} submitted: {} rows x {} columns from {}",
            job_id, row_count, column_count, filename_hint
        );

        let store = Arc::clone(&self.store);
        let writer = Arc::clone(&self.writer);
        let config = self.config.clone();
        let filename = filename_hint.to_string();
        tokio::spawn(async move {
            run_job(store, writer, config, job_id, rows, column_count, filename).await;
        });

        SubmitResponse {
            job_id,
            original_filename: filename_hint.to_string(),
            row_count,
            message: "Processing started".to_string(),
        }
    }

    /// Snapshot for polling clients.
    pub fn query_status(&self, job_id: Uuid) -> Result<JobStatusResponse, WorkerError> {
        self.store
            .get(job_id)
            .map(JobStatusResponse::from)
            .ok_or(WorkerError::JobNotFound(job_id))
    }

    /// Artifact reference for a completed job. `NotReady` until then —
    /// a partial file is never handed out.
    pub fn fetch_artifact(&self, job_id: Uuid) -> Result<ArtifactRef, WorkerError> {
        let job = self
            .store
            .get(job_id)
            .ok_or(WorkerError::JobNotFound(job_id))?;
        if job.state != JobState::Completed {
            return Err(WorkerError::NotReady(job_id));
        }
        job.result
            .map(|r| r.artifact)
            .ok_or(WorkerError::NotReady(job_id))
    }
}

async fn run_job(
    store: Arc<JobStore>,
    writer: Arc<dyn ArtifactWriter>,
    config: Config,
    job_id: Uuid,
    rows: Vec<Vec<String>>,
    column_count: usize,
    filename: String,
) {
    let start = Instant::now();
    store.mark_processing(job_id);

    // Layout is fixed for the whole job; an unknown width is job-fatal
    // and produces no partial result.
    let pattern = match schema::detect(column_count) {
        Ok(p) => p,
        Err(e) => {
            warn!("Job {} failed: {}", job_id, e);
            store.fail(job_id, e.to_string());
            return;
        }
    };
    store.update_progress(job_id, ROW_PROGRESS_START);

    let total = rows.len();
    let mut records: Vec<ContactRecord> = Vec::new();
    let mut blank_rows: u32 = 0;
    let mut column_has_value = vec![false; column_count];

    for (idx, row) in rows.iter().enumerate() {
        for (col, cell) in row.iter().take(column_count).enumerate() {
            if !cell.trim().is_empty() {
                column_has_value[col] = true;
            }
        }

        // Invalid rows are counted, never fatal.
        match normalizer::normalize(row, pattern, config.min_phone_digits) {
            Some(record) => records.push(record),
            None => blank_rows += 1,
        }

        if (idx + 1) % config.progress_row_interval == 0 {
            store.update_progress(job_id, row_progress(idx + 1, total));
        }
    }
    drop(rows);
    store.update_progress(job_id, ROW_PROGRESS_END);

    let counts = RowCounts {
        original_rows: total as u32,
        blank_rows,
        original_columns: column_count as u32,
        blank_columns: column_has_value.iter().filter(|has| !**has).count() as u32,
    };

    match artifact::build(writer.as_ref(), &filename, &records, counts).await {
        Ok(result) => {
            info!(
                "Job {} completed in {}ms: {} of {} rows kept, {} blank",
                job_id,
                start.elapsed().as_millis(),
                result.output_row_count,
                result.original_row_count,
                result.blank_row_count
            );
            store.complete(job_id, result);
        }
        Err(e) => {
            let err = WorkerError::ArtifactConstruction(e.to_string());
            warn!("Job {} failed: {}", job_id, err);
            store.fail(job_id, err.to_string());
        }
    }
}

/// Scale rows consumed into the row-pass progress band.
fn row_progress(done: usize, total: usize) -> u8 {
    if total == 0 {
        return ROW_PROGRESS_END;
    }
    let band = (ROW_PROGRESS_END - ROW_PROGRESS_START) as usize;
    (ROW_PROGRESS_START as usize + done * band / total).min(ROW_PROGRESS_END as usize) as u8
}
