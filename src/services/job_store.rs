//! In-memory job registry
//!
//! Process-wide registry of normalization jobs. All state lives in memory
//! for the process lifetime: a restart discards every job, by design.
//! Created once at process start and shared behind an `Arc`.
//!
//! Locking is scoped to the job id: the registry map is locked only to
//! insert or look up an entry, and each job carries its own lock for
//! mutation and snapshotting. A status read never waits behind another
//! job's writer. Reads return cloned snapshots, so a query never observes
//! a partially updated job. Each job is mutated only by the pipeline task
//! that owns it; terminal transitions are first-wins and later attempts
//! are warn-logged no-ops.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::types::{Job, JobState, ProcessingResult};

pub struct JobStore {
    jobs: RwLock<HashMap<Uuid, Arc<RwLock<Job>>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a job's entry. Holds the map lock only for the lookup.
    fn entry(&self, id: Uuid) -> Option<Arc<RwLock<Job>>> {
        self.jobs.read().get(&id).cloned()
    }

    /// Register a new job: Queued, progress 0.
    pub fn create(&self, original_filename: &str) -> Uuid {
        let job = Job::new(original_filename);
        let id = job.id;
        self.jobs.write().insert(id, Arc::new(RwLock::new(job)));
        id
    }

    /// Snapshot of one job.
    pub fn get(&self, id: Uuid) -> Option<Job> {
        self.entry(id).map(|entry| entry.read().clone())
    }

    pub fn len(&self) -> usize {
        self.jobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.read().is_empty()
    }

    /// Queued -> Processing.
    pub fn mark_processing(&self, id: Uuid) {
        let Some(entry) = self.entry(id) else {
            warn!("mark_processing on unknown job {}", id);
            return;
        };
        let mut job = entry.write();
        if job.state != JobState::Queued {
            warn!("Job {} cannot enter processing from {:?}", id, job.state);
            return;
        }
        job.state = JobState::Processing;
    }

    /// Monotonic progress update. A percent below the current value, or
    /// 100 before completion, is a contract violation: logged and ignored.
    pub fn update_progress(&self, id: Uuid, percent: u8) {
        let Some(entry) = self.entry(id) else {
            warn!("update_progress on unknown job {}", id);
            return;
        };
        let mut job = entry.write();
        if job.state.is_terminal() {
            warn!("Job {} is {:?}, ignoring progress update", id, job.state);
            return;
        }
        if percent >= 100 {
            warn!("Job {} progress {} rejected: 100 is set only on completion", id, percent);
            return;
        }
        if percent < job.progress_percent {
            warn!(
                "Job {} progress would go backward ({} -> {}), ignoring",
                id, job.progress_percent, percent
            );
            return;
        }
        job.progress_percent = percent;
    }

    /// Terminal transition with the result; sets progress to 100.
    pub fn complete(&self, id: Uuid, result: ProcessingResult) {
        let Some(entry) = self.entry(id) else {
            warn!("complete on unknown job {}", id);
            return;
        };
        let mut job = entry.write();
        if job.state.is_terminal() {
            warn!("Job {} already {:?}, ignoring complete", id, job.state);
            return;
        }
        let finished_at = Utc::now();
        job.duration_ms = Some((finished_at - job.started_at).num_milliseconds().max(0) as u64);
        job.finished_at = Some(finished_at);
        job.state = JobState::Completed;
        job.progress_percent = 100;
        job.result = Some(result);
    }

    /// Terminal transition with an error message; progress keeps its last
    /// valid value.
    pub fn fail(&self, id: Uuid, message: impl Into<String>) {
        let Some(entry) = self.entry(id) else {
            warn!("fail on unknown job {}", id);
            return;
        };
        let mut job = entry.write();
        if job.state.is_terminal() {
            warn!("Job {} already {:?}, ignoring fail", id, job.state);
            return;
        }
        let finished_at = Utc::now();
        job.duration_ms = Some((finished_at - job.started_at).num_milliseconds().max(0) as u64);
        job.finished_at = Some(finished_at);
        job.state = JobState::Failed;
        job.error = Some(message.into());
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}
