//! Twilio SMS Service Implementation
//!
//! This module sends SMS through the Twilio Messages REST API using HTTP
//! Basic auth and a form-encoded body.
//!
//! ## Features
//!
//! - E.164 destinations, derived from local or bare country code input
//! - Messaging Service SID preferred over a plain sender number
//! - Twilio's numeric error code and message surfaced on failure
//! - Security: Phone number masking in logs

use async_trait::async_trait;
use mn_core::{SendResult, SmsProvider};
use mn_shared::{mask_phone_number, PhoneNumber};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::info;

use super::config::{require, ConfigError, SmsSettings};
use super::gateway::{dispatch, into_send_result, note_destination, GatewayResponse};
use crate::InfrastructureError;

const PROVIDER_NAME: &str = "Twilio";

/// Twilio REST API root
pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Where Twilio messages are sent from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TwilioSender {
    /// `MessagingServiceSid`, lets Twilio pick the sender
    MessagingService(String),
    /// `From`, a Twilio phone number in E.164 format
    PhoneNumber(String),
}

/// Twilio SMS service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    pub sender: TwilioSender,
}

impl TwilioConfig {
    pub fn from_settings(settings: &SmsSettings) -> Result<Self, ConfigError> {
        let account_sid = require(&settings.twilio_account_sid, PROVIDER_NAME, "TWILIO_ACCOUNT_SID")?;
        let auth_token = require(&settings.twilio_auth_token, PROVIDER_NAME, "TWILIO_AUTH_TOKEN")?;

        let sender = match (
            &settings.twilio_messaging_service_sid,
            &settings.twilio_phone_number,
        ) {
            (Some(sid), _) => TwilioSender::MessagingService(sid.clone()),
            (None, Some(number)) => TwilioSender::PhoneNumber(number.clone()),
            (None, None) => {
                return Err(ConfigError::MissingCredential {
                    provider: PROVIDER_NAME,
                    variable: "TWILIO_MESSAGING_SERVICE_SID or TWILIO_PHONE_NUMBER",
                })
            }
        };

        Ok(Self {
            account_sid,
            auth_token,
            sender,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    code: Option<i64>,
    message: Option<String>,
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
    api_base: String,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Self {
        match &config.sender {
            TwilioSender::MessagingService(sid) => {
                info!("Twilio SMS service initialized with messaging service {}", sid)
            }
            TwilioSender::PhoneNumber(number) => info!(
                "Twilio SMS service initialized with from number: {}",
                mask_phone_number(number)
            ),
        }

        Self {
            client: Client::new(),
            config,
            api_base: TWILIO_API_BASE.to_string(),
        }
    }

    /// Replace the API root, e.g. with a local stub
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    fn build_request(&self, to: &str, message: &str) -> RequestBuilder {
        let destination = PhoneNumber::new(to).to_e164();
        let sender = match &self.config.sender {
            TwilioSender::MessagingService(sid) => ("MessagingServiceSid", sid.as_str()),
            TwilioSender::PhoneNumber(number) => ("From", number.as_str()),
        };

        self.client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[("To", destination.as_str()), ("Body", message), sender])
    }

    async fn deliver(&self, to: &str, message: &str) -> Result<(), InfrastructureError> {
        let response = dispatch(self.build_request(to, message), None).await?;
        interpret(&response)
    }
}

fn interpret(response: &GatewayResponse) -> Result<(), InfrastructureError> {
    if response.status.is_success() {
        return Ok(());
    }

    match serde_json::from_str::<TwilioErrorBody>(&response.body) {
        Ok(TwilioErrorBody {
            code: Some(code),
            message,
        }) => Err(InfrastructureError::Rejected(format!(
            "Twilio error {}: {}",
            code,
            message.unwrap_or_default()
        ))),
        _ => response.require_success(),
    }
}

#[async_trait]
impl SmsProvider for TwilioSmsService {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn send(&self, to: &str, message: &str) -> SendResult {
        note_destination(PROVIDER_NAME, to);
        into_send_result(PROVIDER_NAME, to, self.deliver(to, message).await)
    }
}
