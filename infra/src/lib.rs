//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for Masjid Notify. It
//! provides the concrete SMS gateway adapters behind the core
//! [`SmsProvider`](mn_core::SmsProvider) contract, the environment-driven
//! provider factory, and logging setup.
//!
//! ## Gateways
//!
//! - **Semaphore**, **Infobip**, **Twilio**, **SMSPH**, **PromoTexter**,
//!   **Rising Tide**: third-party HTTP gateways
//! - **Android gateway**: a self-hosted phone bridge
//! - **Mock**: no-op stand-in used for development and whenever the
//!   configuration is incomplete

/// SMS service module - External SMS providers
pub mod sms;

/// Tracing subscriber setup
pub mod telemetry;

pub use sms::{get_sms_provider, EnvSmsProviderFactory};

/// Infrastructure-specific error types
///
/// Adapters use these internally; at the provider boundary they are turned
/// into a failed [`SendResult`](mn_core::SendResult) using their display text.
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway did not answer within the adapter's time limit
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Non-success HTTP status with the raw response body
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The gateway accepted the request but refused the message
    #[error("Rejected by gateway: {0}")]
    Rejected(String),

    /// Gateway-specific failure that fits none of the above
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
