//! Outcome of a single SMS send attempt.

use serde::Serialize;

const UNKNOWN_ERROR: &str = "Unknown SMS error";

/// Result of one `send` call
///
/// An error message is present exactly when the send failed, and is never
/// empty. The fields are private so the two constructors are the only way to
/// build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl SendResult {
    /// The gateway accepted the message
    pub fn sent() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// The send failed; a blank message is replaced with a generic one
    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            error
        };
        Self {
            success: false,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Adapter outcomes: the error's display text becomes the message
impl<E: std::fmt::Display> From<Result<(), E>> for SendResult {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => SendResult::sent(),
            Err(e) => SendResult::failed(e.to_string()),
        }
    }
}
