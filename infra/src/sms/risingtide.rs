//! Rising Tide SMS Service Implementation

use async_trait::async_trait;
use chrono::Utc;
use mn_core::{SendResult, SmsProvider};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use super::config::{require, ConfigError, SmsSettings};
use super::gateway::{dispatch, into_send_result, note_destination};
use crate::InfrastructureError;

const PROVIDER_NAME: &str = "RisingTide";

/// Media type Rising Tide uses for both request and response documents
pub const RISINGTIDE_MEDIA_TYPE: &str = "application/vnd.net.wyrls.Document-v3+json";

/// Time limit for one Rising Tide call
pub const RISINGTIDE_TIMEOUT: Duration = Duration::from_secs(10);

/// Rising Tide configuration; every field is required
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RisingTideConfig {
    pub client_id: String,
    pub client_password: String,
    pub from: String,
    pub usage_type: String,
    pub url: String,
}

impl RisingTideConfig {
    pub fn from_settings(settings: &SmsSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: require(&settings.risingtide_client_id, PROVIDER_NAME, "RISINGTIDE_CLIENT_ID")?,
            client_password: require(
                &settings.risingtide_client_password,
                PROVIDER_NAME,
                "RISINGTIDE_CLIENT_PASSWORD",
            )?,
            from: require(&settings.risingtide_from, PROVIDER_NAME, "RISINGTIDE_FROM")?,
            usage_type: require(&settings.risingtide_usage_type, PROVIDER_NAME, "RISINGTIDE_USAGE_TYPE")?,
            url: require(&settings.risingtide_url, PROVIDER_NAME, "RISINGTIDE_URL")?,
        })
    }
}

#[derive(Debug, Serialize)]
struct RisingTideDocument<'a> {
    id: String,
    from: &'a str,
    to: &'a str,
    content_type: &'static str,
    body: &'a str,
    date: String,
    usagetype: &'a str,
}

/// Rising Tide SMS service implementation
pub struct RisingTideSmsService {
    client: Client,
    config: RisingTideConfig,
    timeout: Duration,
}

impl RisingTideSmsService {
    pub fn new(config: RisingTideConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            timeout: RISINGTIDE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request(&self, to: &str, message: &str) -> RequestBuilder {
        // Fresh id per message so gateway-side deduplication never merges sends
        let document = RisingTideDocument {
            id: Uuid::new_v4().to_string(),
            from: &self.config.from,
            to,
            content_type: "text/plain",
            body: message,
            date: Utc::now().to_rfc3339(),
            usagetype: &self.config.usage_type,
        };

        self.client
            .post(&self.config.url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_password))
            .header("Content-Type", RISINGTIDE_MEDIA_TYPE)
            .header("Accept", RISINGTIDE_MEDIA_TYPE)
            .json(&document)
    }

    async fn deliver(&self, to: &str, message: &str) -> Result<(), InfrastructureError> {
        dispatch(self.build_request(to, message), Some(self.timeout))
            .await?
            .require_success()
    }
}

#[async_trait]
impl SmsProvider for RisingTideSmsService {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn send(&self, to: &str, message: &str) -> SendResult {
        note_destination(PROVIDER_NAME, to);
        into_send_result(PROVIDER_NAME, to, self.deliver(to, message).await)
    }
}
