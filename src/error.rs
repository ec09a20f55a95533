// src/error.rs
//! Failures shared by the job model, the store and the HTTP handlers.

/// Result alias for job operations
pub type JobResult<T> = std::result::Result<T, JobError>;

#[derive(thiserror::Error, Debug)]
pub enum JobError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid job ID: {0}")]
    InvalidIdentifier(String),

    #[error("Database error: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl JobError {
    pub fn validation(message: impl Into<String>) -> Self {
        JobError::Validation(message.into())
    }
}
