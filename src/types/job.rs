//! Job types for the async normalization pipeline
//!
//! A job is one normalization run over a single uploaded dataset. Jobs
//! live in process memory only and are discarded on restart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================================================
// Tests First (TDD)
// ==========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_starts_queued_with_zero_progress() {
        let job = Job::new("contatos.xlsx");
        assert_eq!(job.state, JobState::Queued);
        assert_eq!(job.progress_percent, 0);
        assert!(job.result.is_none());
        assert!(job.error.is_none());
        assert!(job.finished_at.is_none());
    }

    #[test]
    fn test_job_ids_are_unique() {
        let a = Job::new("a.csv");
        let b = Job::new("a.csv");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!JobState::Queued.is_terminal());
        assert!(!JobState::Processing.is_terminal());
        assert!(JobState::Completed.is_terminal());
        assert!(JobState::Failed.is_terminal());
    }

    #[test]
    fn test_job_state_serializes_lowercase() {
        let json = serde_json::to_string(&JobState::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
    }

    #[test]
    fn test_status_response_serializes_camel_case() {
        let job = Job::new("contatos.xlsx");
        let status = JobStatusResponse::from(job);
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("jobId"));
        assert!(json.contains("progressPercent"));
        // Absent optionals are omitted, not null.
        assert!(!json.contains("result"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn test_processing_result_serializes_counts() {
        let result = ProcessingResult {
            original_row_count: 10,
            original_column_count: 3,
            output_row_count: 8,
            blank_row_count: 2,
            blank_column_count: 0,
            artifact: ArtifactRef {
                path: "output/contatos_x.csv".to_string(),
                download_name: "contatos_x.csv".to_string(),
                size_bytes: 420,
            },
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("originalRowCount"));
        assert!(json.contains("blankColumnCount"));
        assert!(json.contains("downloadName"));
    }
}

// ==========================================================================
// Job Types
// ==========================================================================

/// Lifecycle state of a job.
///
/// Transitions are monotonic and one-directional:
/// Queued -> Processing -> {Completed | Failed}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

/// Opaque reference to a produced output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRef {
    /// Storage path of the produced file.
    pub path: String,
    /// Filename to suggest to downloaders.
    pub download_name: String,
    /// File size in bytes.
    pub size_bytes: u64,
}

/// Summary counts for a completed job.
///
/// `output_row_count + blank_row_count == original_row_count` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub original_row_count: u32,
    pub original_column_count: u32,
    pub output_row_count: u32,
    /// Rows discarded during normalization.
    pub blank_row_count: u32,
    /// Columns with no value in any data row.
    pub blank_column_count: u32,
    pub artifact: ArtifactRef,
}

/// One normalization job as tracked by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub state: JobState,
    pub original_filename: String,
    /// 0-100, non-decreasing; reaches 100 only on completion.
    pub progress_percent: u8,
    /// Present iff the job completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ProcessingResult>,
    /// Present iff the job failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl Job {
    pub fn new(original_filename: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: JobState::Queued,
            original_filename: original_filename.into(),
            progress_percent: 0,
            result: None,
            error: None,
            started_at: Utc::now(),
            finished_at: None,
            duration_ms: None,
        }
    }
}

/// Response when a job is submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub job_id: Uuid,
    pub original_filename: String,
    pub row_count: usize,
    pub message: String,
}

/// Snapshot returned to polling clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub job_id: Uuid,
    pub state: JobState,
    pub progress_percent: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ProcessingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Job> for JobStatusResponse {
    fn from(job: Job) -> Self {
        Self {
            job_id: job.id,
            state: job.state,
            progress_percent: job.progress_percent,
            result: job.result,
            error: job.error,
        }
    }
}
