//! Semaphore SMS Service Implementation
//!
//! Semaphore takes a form-encoded POST and expects local-format numbers
//! (`09XXXXXXXXX`). A successful call answers with a JSON array holding one
//! entry per queued message; anything else is a failure.

use async_trait::async_trait;
use mn_core::{SendResult, SmsProvider};
use mn_shared::PhoneNumber;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use super::config::{require, ConfigError, SmsSettings};
use super::gateway::{dispatch, into_send_result, note_destination, GatewayResponse};
use crate::InfrastructureError;

const PROVIDER_NAME: &str = "Semaphore";

/// Semaphore message endpoint
pub const SEMAPHORE_API_URL: &str = "https://api.semaphore.co/api/v4/messages";

/// Semaphore SMS service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemaphoreConfig {
    /// Semaphore API key
    pub api_key: String,
}

impl SemaphoreConfig {
    pub fn from_settings(settings: &SmsSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: require(&settings.semaphore_api_key, PROVIDER_NAME, "SEMAPHORE_API_KEY")?,
        })
    }
}

/// Semaphore SMS service implementation
pub struct SemaphoreSmsService {
    client: Client,
    config: SemaphoreConfig,
    api_url: String,
}

impl SemaphoreSmsService {
    pub fn new(config: SemaphoreConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            api_url: SEMAPHORE_API_URL.to_string(),
        }
    }

    /// Point the adapter at another endpoint
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    fn build_request(&self, to: &str, message: &str) -> RequestBuilder {
        let number = PhoneNumber::new(to).to_local();
        self.client.post(&self.api_url).form(&[
            ("apikey", self.config.api_key.as_str()),
            ("number", number.as_str()),
            ("message", message),
        ])
    }

    async fn deliver(&self, to: &str, message: &str) -> Result<(), InfrastructureError> {
        let response = dispatch(self.build_request(to, message), None).await?;
        interpret(&response)
    }
}

/// A non-empty JSON array means the message was queued
fn interpret(response: &GatewayResponse) -> Result<(), InfrastructureError> {
    let parsed: Value = serde_json::from_str(&response.body).map_err(|e| {
        InfrastructureError::InvalidResponse(format!(
            "invalid JSON from Semaphore ({}): {}",
            e, response.body
        ))
    })?;

    match parsed {
        Value::Array(ref messages) if !messages.is_empty() => {
            debug!(queued = messages.len(), "Semaphore accepted message");
            Ok(())
        }
        other => Err(InfrastructureError::Rejected(format!(
            "Semaphore returned HTTP {}: {}",
            response.status.as_u16(),
            other
        ))),
    }
}

#[async_trait]
impl SmsProvider for SemaphoreSmsService {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn send(&self, to: &str, message: &str) -> SendResult {
        note_destination(PROVIDER_NAME, to);
        into_send_result(PROVIDER_NAME, to, self.deliver(to, message).await)
    }
}
