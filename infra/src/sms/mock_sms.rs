//! Mock SMS Service Implementation
//!
//! Stand-in used for local development and whenever the configured gateway
//! cannot be built. It logs the message instead of sending it and always
//! reports success after a short simulated delay.

use async_trait::async_trait;
use mn_core::{SendResult, SmsProvider};
use mn_shared::mask_phone_number;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Simulated network delay per message
pub const MOCK_SEND_DELAY: Duration = Duration::from_millis(500);

/// Mock SMS service for development and testing
#[derive(Clone, Default)]
pub struct MockSmsService {
    /// Counter for tracking number of messages "sent"
    message_count: Arc<AtomicU64>,
}

impl MockSmsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl SmsProvider for MockSmsService {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn send(&self, to: &str, message: &str) -> SendResult {
        tokio::time::sleep(MOCK_SEND_DELAY).await;

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            target: "sms_service",
            provider = "mock",
            phone = %mask_phone_number(to),
            message_number = count,
            message_length = message.len(),
            "SMS sent successfully (mock)"
        );

        SendResult::sent()
    }
}
