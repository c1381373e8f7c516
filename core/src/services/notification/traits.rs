//! Traits for SMS provider integration

use async_trait::async_trait;

use crate::domain::value_objects::SendResult;

/// Capability shared by every SMS gateway adapter
///
/// `send` never returns an error and never panics for transport problems:
/// HTTP failures, malformed responses and timeouts all come back as a failed
/// [`SendResult`]. Callers never branch on the concrete provider.
#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Provider name for logs and reports (e.g. "Semaphore", "Mock")
    fn name(&self) -> &str;

    /// Send `message` to `to`, making exactly one attempt
    async fn send(&self, to: &str, message: &str) -> SendResult;
}

/// Source of configured providers
///
/// Every call builds a fresh provider, so configuration changes and random
/// provider selection take effect on the next call.
pub trait SmsProviderFactory: Send + Sync {
    fn get_provider(&self) -> Box<dyn SmsProvider>;
}

