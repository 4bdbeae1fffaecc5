use thiserror::Error;

pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("invalid workflow config: {0}")]
    ConfigInvalid(String),

    #[error("job queue unavailable: {0}")]
    Queue(String),

    #[error("job queue lock poisoned")]
    Lock,
}
