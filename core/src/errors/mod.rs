//! Domain-specific error types and error handling.

use thiserror::Error;

/// Core domain errors
///
/// SMS delivery problems never appear here: providers report them as
/// [`SendResult`](crate::domain::value_objects::SendResult) values.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Repository error: {message}")]
    Repository { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;
