//! Aggregated outcome of sending one message to many subscribers.

use serde::Serialize;
use uuid::Uuid;

/// A subscriber the broadcast could not reach
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDelivery {
    pub subscriber_id: Uuid,
    /// Masked destination, safe to show to operators
    pub phone: String,
    /// Error text reported by the provider
    pub error: String,
}

/// Counts and failures for one broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BroadcastReport {
    /// Name of the provider used for every recipient of this broadcast
    pub provider: Option<String>,
    pub total: usize,
    pub sent: usize,
    pub failures: Vec<FailedDelivery>,
}

impl BroadcastReport {
    /// Report for a broadcast with no recipients
    pub fn empty() -> Self {
        Self {
            provider: None,
            total: 0,
            sent: 0,
            failures: Vec::new(),
        }
    }

    pub(crate) fn for_provider(provider: &str, total: usize) -> Self {
        Self {
            provider: Some(provider.to_string()),
            total,
            sent: 0,
            failures: Vec::new(),
        }
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn all_sent(&self) -> bool {
        self.sent == self.total
    }

    /// Operator-facing summary, e.g. "sent to 8 of 10 subscribers"
    pub fn summary(&self) -> String {
        format!("sent to {} of {} subscribers", self.sent, self.total)
    }
}
