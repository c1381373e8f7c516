//! Infobip SMS Service Implementation
//!
//! Uses the Infobip "advanced" text endpoint with `App <key>` authorization.
//! Destinations are sent as bare country code numbers (`639XXXXXXXXX`).
//! Infobip answers 200 even for messages it will not deliver, so success is
//! decided from the first message's status group.

use async_trait::async_trait;
use mn_core::{SendResult, SmsProvider};
use mn_shared::PhoneNumber;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::json;

use super::config::{require, ConfigError, SmsSettings};
use super::gateway::{dispatch, into_send_result, note_destination, GatewayResponse};
use crate::InfrastructureError;

const PROVIDER_NAME: &str = "Infobip";

/// Status group Infobip uses for rejected messages
const REJECTED_GROUP_ID: i64 = 5;

/// Infobip SMS service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfobipConfig {
    /// Infobip API key
    pub api_key: String,
    /// Account-specific base URL, with or without scheme
    pub base_url: String,
    /// Alphanumeric sender, when the account has one registered
    pub sender_name: Option<String>,
}

impl InfobipConfig {
    pub fn from_settings(settings: &SmsSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: require(&settings.infobip_api_key, PROVIDER_NAME, "INFOBIP_API_KEY")?,
            base_url: require(&settings.infobip_base_url, PROVIDER_NAME, "INFOBIP_BASE_URL")?,
            sender_name: settings.infobip_sender_name.clone(),
        })
    }

    /// Full URL of the send endpoint
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            format!("{}/sms/2/text/advanced", base)
        } else {
            format!("https://{}/sms/2/text/advanced", base)
        }
    }
}

#[derive(Debug, Deserialize)]
struct InfobipResponse {
    #[serde(default)]
    messages: Vec<InfobipMessage>,
}

#[derive(Debug, Deserialize)]
struct InfobipMessage {
    status: InfobipStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InfobipStatus {
    group_id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InfobipErrorResponse {
    request_error: InfobipRequestError,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InfobipRequestError {
    service_exception: InfobipServiceException,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InfobipServiceException {
    #[serde(default)]
    message_id: String,
    #[serde(default)]
    text: String,
}

/// Infobip SMS service implementation
pub struct InfobipSmsService {
    client: Client,
    config: InfobipConfig,
}

impl InfobipSmsService {
    pub fn new(config: InfobipConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn build_request(&self, to: &str, message: &str) -> RequestBuilder {
        let destination = PhoneNumber::new(to).to_bare_country_code();

        let mut entry = json!({
            "destinations": [{ "to": destination }],
            "text": message,
        });
        if let Some(sender) = &self.config.sender_name {
            entry["from"] = json!(sender);
        }

        self.client
            .post(self.config.endpoint())
            .header("Authorization", format!("App {}", self.config.api_key))
            .header("Accept", "application/json")
            .json(&json!({ "messages": [entry] }))
    }

    async fn deliver(&self, to: &str, message: &str) -> Result<(), InfrastructureError> {
        let response = dispatch(self.build_request(to, message), None).await?;
        interpret(&response)
    }
}

fn interpret(response: &GatewayResponse) -> Result<(), InfrastructureError> {
    if !response.status.is_success() {
        // Prefer Infobip's own explanation when the body carries one
        return match serde_json::from_str::<InfobipErrorResponse>(&response.body) {
            Ok(error) => Err(InfrastructureError::Rejected(format!(
                "{} {}",
                error.request_error.service_exception.message_id,
                error.request_error.service_exception.text
            ))),
            Err(_) => response.require_success(),
        };
    }

    let parsed: InfobipResponse = serde_json::from_str(&response.body).map_err(|e| {
        InfrastructureError::InvalidResponse(format!("unexpected Infobip response ({}): {}", e, response.body))
    })?;

    let status = parsed
        .messages
        .into_iter()
        .next()
        .map(|message| message.status)
        .ok_or_else(|| {
            InfrastructureError::InvalidResponse("Infobip response listed no messages".to_string())
        })?;

    if status.group_id == REJECTED_GROUP_ID || status.name.contains("REJECTED") {
        let reason = if status.description.is_empty() {
            status.name
        } else {
            status.description
        };
        return Err(InfrastructureError::Rejected(reason));
    }

    Ok(())
}

#[async_trait]
impl SmsProvider for InfobipSmsService {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn send(&self, to: &str, message: &str) -> SendResult {
        note_destination(PROVIDER_NAME, to);
        into_send_result(PROVIDER_NAME, to, self.deliver(to, message).await)
    }
}
