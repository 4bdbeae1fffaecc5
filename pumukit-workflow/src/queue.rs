use crate::error::{WorkflowError, WorkflowResult};
use pumukit_types::MultimediaObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

/// Identifier of a queued encoding job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

/// What the workflow asks the encoder to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    pub multimedia_object_id: MultimediaObjectId,
    pub profile: String,
    /// Path of the source track.
    pub path: String,
    pub priority: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl JobRequest {
    /// Two requests are the same job when object, profile and source match.
    #[must_use]
    pub fn same_job_as(&self, other: &JobRequest) -> bool {
        self.multimedia_object_id == other.multimedia_object_id
            && self.profile == other.profile
            && self.path == other.path
    }
}

/// A request accepted by a queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub request: JobRequest,
}

/// Result of [`JobQueue::add_unique_job`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobOutcome {
    Created(JobId),
    AlreadyQueued(JobId),
}

impl JobOutcome {
    #[must_use]
    pub fn job_id(&self) -> JobId {
        match self {
            Self::Created(id) | Self::AlreadyQueued(id) => *id,
        }
    }

    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Encoder job queue.
pub trait JobQueue: Send + Sync {
    /// Queues `request` unless an equivalent job is already queued.
    fn add_unique_job(&self, request: JobRequest) -> WorkflowResult<JobOutcome>;
}

/// Process-local queue, used by the admin tool and in tests.
#[derive(Debug, Default)]
pub struct InMemoryJobQueue {
    jobs: Mutex<Vec<Job>>,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of queued jobs in submission order.
    pub fn jobs(&self) -> WorkflowResult<Vec<Job>> {
        let jobs = self.jobs.lock().map_err(|_| WorkflowError::Lock)?;
        Ok(jobs.clone())
    }

    pub fn len(&self) -> WorkflowResult<usize> {
        let jobs = self.jobs.lock().map_err(|_| WorkflowError::Lock)?;
        Ok(jobs.len())
    }
}

impl JobQueue for InMemoryJobQueue {
    fn add_unique_job(&self, request: JobRequest) -> WorkflowResult<JobOutcome> {
        let mut jobs = self.jobs.lock().map_err(|_| WorkflowError::Lock)?;
        if let Some(existing) = jobs.iter().find(|job| job.request.same_job_as(&request)) {
            return Ok(JobOutcome::AlreadyQueued(existing.id));
        }
        let id = JobId(jobs.len() as u64 + 1);
        jobs.push(Job { id, request });
        Ok(JobOutcome::Created(id))
    }
}
