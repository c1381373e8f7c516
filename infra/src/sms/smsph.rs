//! SMS API PH Service Implementation
//!
//! JSON POST authenticated with an `x-api-key` header. The gateway reports
//! the outcome in a `success` boolean of its JSON body. Calls are limited
//! to 8 seconds.

use async_trait::async_trait;
use mn_core::{SendResult, SmsProvider};
use mn_shared::PhoneNumber;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use std::time::Duration;

use super::config::{require, ConfigError, SmsSettings};
use super::gateway::{dispatch, into_send_result, note_destination, GatewayResponse};
use crate::InfrastructureError;

const PROVIDER_NAME: &str = "SMSPH";

/// SMS API PH send endpoint
pub const SMSPH_API_URL: &str = "https://smsapiph.onrender.com/api/v1/send/sms";

/// Time limit for one SMSPH call
pub const SMSPH_TIMEOUT: Duration = Duration::from_secs(8);

/// SMSPH configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsphConfig {
    pub api_key: String,
}

impl SmsphConfig {
    pub fn from_settings(settings: &SmsSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: require(&settings.smsph_api_key, PROVIDER_NAME, "SMSPH_API_KEY")?,
        })
    }
}

/// SMSPH SMS service implementation
pub struct SmsphSmsService {
    client: Client,
    config: SmsphConfig,
    api_url: String,
    timeout: Duration,
}

impl SmsphSmsService {
    pub fn new(config: SmsphConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            api_url: SMSPH_API_URL.to_string(),
            timeout: SMSPH_TIMEOUT,
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request(&self, to: &str, message: &str) -> RequestBuilder {
        self.client
            .post(&self.api_url)
            .header("x-api-key", &self.config.api_key)
            .json(&json!({
                "recipient": PhoneNumber::new(to).to_e164(),
                "message": message,
            }))
    }

    async fn deliver(&self, to: &str, message: &str) -> Result<(), InfrastructureError> {
        let response = dispatch(self.build_request(to, message), Some(self.timeout))
            .await
            .map_err(|e| match e {
                InfrastructureError::Timeout(detail) => {
                    InfrastructureError::Timeout(format!("SMSPH {}", detail))
                }
                InfrastructureError::Http(inner) => {
                    InfrastructureError::Sms(format!("SMSPH request failed: {}", inner))
                }
                other => other,
            })?;
        interpret(&response)
    }
}

fn interpret(response: &GatewayResponse) -> Result<(), InfrastructureError> {
    let parsed: Value = serde_json::from_str(&response.body).map_err(|e| {
        InfrastructureError::InvalidResponse(format!(
            "SMSPH returned HTTP {} with non-JSON body ({}): {}",
            response.status.as_u16(),
            e,
            response.body
        ))
    })?;

    if parsed.get("success") == Some(&Value::Bool(true)) {
        return Ok(());
    }

    let reason = parsed
        .get("message")
        .or_else(|| parsed.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| parsed.to_string());
    Err(InfrastructureError::Rejected(format!(
        "SMSPH HTTP {}: {}",
        response.status.as_u16(),
        reason
    )))
}

#[async_trait]
impl SmsProvider for SmsphSmsService {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn send(&self, to: &str, message: &str) -> SendResult {
        note_destination(PROVIDER_NAME, to);
        into_send_result(PROVIDER_NAME, to, self.deliver(to, message).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn response(status: StatusCode, body: &str) -> GatewayResponse {
        GatewayResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_request_shape() {
        let service = SmsphSmsService::new(SmsphConfig {
            api_key: "ph-key".to_string(),
        });
        let request = service.build_request("09171234567", "Salam").build().unwrap();

        assert_eq!(request.headers().get("x-api-key").unwrap(), "ph-key");
        let body: Value =
            serde_json::from_slice(request.body().unwrap().as_bytes().unwrap()).unwrap();
        assert_eq!(body["recipient"], "+639171234567");
        assert_eq!(body["message"], "Salam");
    }

    #[test]
    fn test_success_flag() {
        assert!(interpret(&response(StatusCode::OK, r#"{"success":true,"data":{}}"#)).is_ok());

        // A 200 without the flag is still a failure
        let err = interpret(&response(
            StatusCode::OK,
            r#"{"success":false,"message":"Insufficient credits"}"#,
        ))
        .unwrap_err();
        assert!(err.to_string().contains("Insufficient credits"));

        // Truthy but not `true` does not count
        assert!(interpret(&response(StatusCode::OK, r#"{"success":"true"}"#)).is_err());
    }

    #[test]
    fn test_non_json_body() {
        let err = interpret(&response(StatusCode::BAD_GATEWAY, "Bad Gateway")).unwrap_err();
        assert!(matches!(err, InfrastructureError::InvalidResponse(_)));
    }
}
