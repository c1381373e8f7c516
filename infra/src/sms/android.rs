//! Android SMS gateway
//!
//! Sends through a self-hosted bridge app running on an Android phone. The
//! bridge accepts `{to, message}` and relays it over the phone's own SIM.

use async_trait::async_trait;
use mn_core::{SendResult, SmsProvider};
use reqwest::{Client, RequestBuilder};
use serde_json::json;
use std::time::Duration;

use super::config::{require, ConfigError, SmsSettings};
use super::gateway::{dispatch, into_send_result, note_destination};
use crate::InfrastructureError;

const PROVIDER_NAME: &str = "AndroidGateway";

/// Time limit for one bridge call
pub const ANDROID_GATEWAY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidGatewayConfig {
    pub gateway_url: String,
}

impl AndroidGatewayConfig {
    pub fn from_settings(settings: &SmsSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            gateway_url: require(&settings.android_gateway_url, PROVIDER_NAME, "ANDROID_GATEWAY_URL")?,
        })
    }
}

pub struct AndroidGatewaySmsService {
    client: Client,
    config: AndroidGatewayConfig,
    timeout: Duration,
}

impl AndroidGatewaySmsService {
    pub fn new(config: AndroidGatewayConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            timeout: ANDROID_GATEWAY_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request(&self, to: &str, message: &str) -> RequestBuilder {
        self.client
            .post(&self.config.gateway_url)
            .json(&json!({ "to": to, "message": message }))
    }

    async fn deliver(&self, to: &str, message: &str) -> Result<(), InfrastructureError> {
        let response = dispatch(self.build_request(to, message), Some(self.timeout))
            .await
            .map_err(|e| match e {
                InfrastructureError::Timeout(detail) => InfrastructureError::Timeout(format!(
                    "Android gateway {}; check that the phone is online and paired with the bridge",
                    detail
                )),
                other => other,
            })?;
        response.require_success()
    }
}

#[async_trait]
impl SmsProvider for AndroidGatewaySmsService {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn send(&self, to: &str, message: &str) -> SendResult {
        note_destination(PROVIDER_NAME, to);
        into_send_result(PROVIDER_NAME, to, self.deliver(to, message).await)
    }
}
