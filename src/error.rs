//! Worker error taxonomy
//!
//! Only job-wide, structural failures appear here. Row-level anomalies
//! (an invalid phone, an empty name) are absorbed into blank-row counters
//! by the pipeline and never cross the component boundary as errors.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum WorkerError {
    /// Column width matches neither known sheet layout. Job-fatal.
    #[error("unsupported sheet layout: {0} columns (expected 3 or 4)")]
    UnsupportedSchema(usize),

    /// The output file could not be built. Job-fatal.
    #[error("artifact construction failed: {0}")]
    ArtifactConstruction(String),

    /// Unknown or expired job id.
    #[error("job {0} not found")]
    JobNotFound(Uuid),

    /// Artifact requested before the job completed. Distinct from a
    /// lookup miss: the job exists but has nothing to download yet.
    #[error("job {0} is not completed yet")]
    NotReady(Uuid),
}
