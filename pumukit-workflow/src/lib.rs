//! Encoding workflow for multimedia objects.
//!
//! Whenever an object changes (or one of its encoding jobs finishes) the
//! [`WorkflowService`] checks whether the target profile rendition exists
//! and, if not, asks the [`JobQueue`] for a job built from the source track.

mod config;
mod error;
mod queue;
mod service;

pub use config::WorkflowConfig;
pub use error::{WorkflowError, WorkflowResult};
pub use queue::{InMemoryJobQueue, Job, JobId, JobOutcome, JobQueue, JobRequest};
pub use service::WorkflowService;
