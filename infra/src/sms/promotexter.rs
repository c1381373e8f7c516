//! PromoTexter SMS Service Implementation
//!
//! PromoTexter takes a GET with everything in the query string and the
//! message base64-encoded. Its HTTP status carries no meaning: the body is
//! the outcome, a positive integer message id on success.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use mn_core::{SendResult, SmsProvider};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

use super::config::{require, ConfigError, SmsSettings};
use super::gateway::{dispatch, into_send_result, note_destination, GatewayResponse};
use crate::InfrastructureError;

const PROVIDER_NAME: &str = "PromoTexter";

/// Endpoint used when `PROMOTEXTER_URL` is not set
pub const PROMOTEXTER_DEFAULT_URL: &str = "https://rest.promotexter.com/sms/send";

/// Time limit for one PromoTexter call
pub const PROMOTEXTER_TIMEOUT: Duration = Duration::from_secs(10);

/// PromoTexter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoTexterConfig {
    pub sender_id: String,
    pub client_id: String,
    pub passkey: String,
    pub url: String,
    /// Delivery report callback URL, forwarded as-is
    pub dlr_call: Option<String>,
}

impl PromoTexterConfig {
    pub fn from_settings(settings: &SmsSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            sender_id: require(&settings.promotexter_sender_id, PROVIDER_NAME, "PROMOTEXTER_SENDER_ID")?,
            client_id: require(&settings.promotexter_client_id, PROVIDER_NAME, "PROMOTEXTER_CLIENT_ID")?,
            passkey: require(&settings.promotexter_passkey, PROVIDER_NAME, "PROMOTEXTER_PASSKEY")?,
            url: settings
                .promotexter_url
                .clone()
                .unwrap_or_else(|| PROMOTEXTER_DEFAULT_URL.to_string()),
            dlr_call: settings.promotexter_dlr_call.clone(),
        })
    }
}

/// PromoTexter SMS service implementation
pub struct PromoTexterSmsService {
    client: Client,
    config: PromoTexterConfig,
    timeout: Duration,
}

impl PromoTexterSmsService {
    pub fn new(config: PromoTexterConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            timeout: PROMOTEXTER_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request(&self, to: &str, message: &str) -> RequestBuilder {
        let encoded = STANDARD.encode(message);
        let mut query: Vec<(&str, &str)> = vec![
            ("senderid", self.config.sender_id.as_str()),
            ("clientid", self.config.client_id.as_str()),
            ("passkey", self.config.passkey.as_str()),
            ("msisdn", to),
            ("message", encoded.as_str()),
        ];
        if let Some(callback) = &self.config.dlr_call {
            query.push(("dlr_call", callback.as_str()));
        }

        self.client.get(&self.config.url).query(&query)
    }

    async fn deliver(&self, to: &str, message: &str) -> Result<(), InfrastructureError> {
        let response = dispatch(self.build_request(to, message), Some(self.timeout)).await?;
        interpret(&response)
    }
}

fn interpret(response: &GatewayResponse) -> Result<(), InfrastructureError> {
    match response.body.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(()),
        _ => Err(InfrastructureError::Rejected(format!(
            "PromoTexter returned '{}'",
            response.body
        ))),
    }
}

#[async_trait]
impl SmsProvider for PromoTexterSmsService {
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

    fn config(dlr_call: Option<&str>) -> PromoTexterConfig {
        PromoTexterConfig {
            sender_id: "MASJID".to_string(),
            client_id: "client-1".to_string(),
            passkey: "secret".to_string(),
            url: "https://promo.example/send".to_string(),
            dlr_call: dlr_call.map(str::to_string),
        }
    }

    fn body(text: &str) -> GatewayResponse {
        GatewayResponse {
            status: StatusCode::OK,
            body: text.to_string(),
        }
    }

    #[test]
    fn test_query_string() {
        let service = PromoTexterSmsService::new(config(Some("https://portal.example/dlr")));
        let request = service.build_request("09171234567", "Hi all").build().unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        let pairs: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("senderid".to_string(), "MASJID".to_string()),
                ("clientid".to_string(), "client-1".to_string()),
                ("passkey".to_string(), "secret".to_string()),
                ("msisdn".to_string(), "09171234567".to_string()),
                ("message".to_string(), "SGkgYWxs".to_string()),
                ("dlr_call".to_string(), "https://portal.example/dlr".to_string()),
            ]
        );
    }

    #[test]
    fn test_number_passed_through_unchanged() {
        let service = PromoTexterSmsService::new(config(None));
        let request = service.build_request("+639171234567", "x").build().unwrap();
        let msisdn = request
            .url()
            .query_pairs()
            .find(|(k, _)| k == "msisdn")
            .map(|(_, v)| v.into_owned());
        assert_eq!(msisdn.as_deref(), Some("+639171234567"));
        assert!(!request.url().as_str().contains("dlr_call"));
    }

    #[test]
    fn test_positive_integer_body_is_success() {
        assert!(interpret(&body("202")).is_ok());
        assert!(interpret(&body(" 99871\n")).is_ok());
    }

    #[test]
    fn test_other_bodies_fail_with_raw_text() {
        let err = interpret(&body("0")).unwrap_err();
        assert!(err.to_string().contains("'0'"));

        let err = interpret(&body("-3")).unwrap_err();
        assert!(err.to_string().contains("-3"));

        let err = interpret(&body("ERROR: invalid passkey")).unwrap_err();
        assert!(err.to_string().contains("ERROR: invalid passkey"));
    }

    #[test]
    fn test_default_url() {
        let settings = SmsSettings {
            promotexter_sender_id: Some("S".into()),
            promotexter_client_id: Some("C".into()),
            promotexter_passkey: Some("P".into()),
            ..SmsSettings::default()
        };
        let config = PromoTexterConfig::from_settings(&settings).unwrap();
        assert_eq!(config.url, PROMOTEXTER_DEFAULT_URL);
        assert_eq!(config.dlr_call, None);
    }
}
