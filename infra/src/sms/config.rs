//! SMS configuration resolution
//!
//! All gateway settings come from environment variables and are read fresh
//! each time a provider is requested. Resolution is strict (a missing
//! credential is a [`ConfigError`]); the factory is what turns those errors
//! into the Mock provider.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::android::AndroidGatewayConfig;
use super::infobip::InfobipConfig;
use super::promotexter::PromoTexterConfig;
use super::risingtide::RisingTideConfig;
use super::semaphore::SemaphoreConfig;
use super::smsph::SmsphConfig;
use super::twilio::TwilioConfig;

/// Value of `SMS_PROVIDER` that enables weighted random selection
pub const RANDOM_PROVIDER: &str = "random";

/// Errors raised while resolving a provider's configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{provider} requires {variable} to be set")]
    MissingCredential {
        provider: &'static str,
        variable: &'static str,
    },

    #[error("Unknown SMS provider '{0}'")]
    UnknownProvider(String),
}

/// Raw SMS settings, one field per environment variable
///
/// Empty values are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmsSettings {
    pub provider: Option<String>,
    pub weights: Option<String>,
    pub android_gateway_url: Option<String>,
    pub semaphore_api_key: Option<String>,
    pub infobip_api_key: Option<String>,
    pub infobip_base_url: Option<String>,
    pub infobip_sender_name: Option<String>,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_messaging_service_sid: Option<String>,
    pub twilio_phone_number: Option<String>,
    pub smsph_api_key: Option<String>,
    pub promotexter_sender_id: Option<String>,
    pub promotexter_client_id: Option<String>,
    pub promotexter_passkey: Option<String>,
    pub promotexter_url: Option<String>,
    pub promotexter_dlr_call: Option<String>,
    pub risingtide_client_id: Option<String>,
    pub risingtide_client_password: Option<String>,
    pub risingtide_from: Option<String>,
    pub risingtide_usage_type: Option<String>,
    pub risingtide_url: Option<String>,
}

impl SmsSettings {
    /// Read settings from the process environment, loading `.env` if present
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            provider: get("SMS_PROVIDER"),
            weights: get("SMS_WEIGHTS"),
            android_gateway_url: get("ANDROID_GATEWAY_URL"),
            semaphore_api_key: get("SEMAPHORE_API_KEY"),
            infobip_api_key: get("INFOBIP_API_KEY"),
            infobip_base_url: get("INFOBIP_BASE_URL"),
            infobip_sender_name: get("INFOBIP_SENDER_NAME"),
            twilio_account_sid: get("TWILIO_ACCOUNT_SID"),
            twilio_auth_token: get("TWILIO_AUTH_TOKEN"),
            twilio_messaging_service_sid: get("TWILIO_MESSAGING_SERVICE_SID"),
            twilio_phone_number: get("TWILIO_PHONE_NUMBER"),
            smsph_api_key: get("SMSPH_API_KEY"),
            promotexter_sender_id: get("PROMOTEXTER_SENDER_ID"),
            promotexter_client_id: get("PROMOTEXTER_CLIENT_ID"),
            promotexter_passkey: get("PROMOTEXTER_PASSKEY"),
            promotexter_url: get("PROMOTEXTER_URL"),
            promotexter_dlr_call: get("PROMOTEXTER_DLR_CALL"),
            risingtide_client_id: get("RISINGTIDE_CLIENT_ID"),
            risingtide_client_password: get("RISINGTIDE_CLIENT_PASSWORD"),
            risingtide_from: get("RISINGTIDE_FROM"),
            risingtide_usage_type: get("RISINGTIDE_USAGE_TYPE"),
            risingtide_url: get("RISINGTIDE_URL"),
        }
    }

    /// `SMS_PROVIDER`, lowercased; empty when unset
    pub fn provider_name(&self) -> String {
        self.provider
            .as_deref()
            .map(|name| name.trim().to_lowercase())
            .unwrap_or_default()
    }
}

/// Return a required setting or the error naming its variable
pub(crate) fn require(
    value: &Option<String>,
    provider: &'static str,
    variable: &'static str,
) -> Result<String, ConfigError> {
    value
        .clone()
        .ok_or(ConfigError::MissingCredential { provider, variable })
}

/// The gateways a provider name can select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Android,
    Semaphore,
    Infobip,
    Twilio,
    Smsph,
    PromoTexter,
    RisingTide,
    Mock,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "android" => Ok(ProviderKind::Android),
            "semaphore" => Ok(ProviderKind::Semaphore),
            "infobip" => Ok(ProviderKind::Infobip),
            "twilio" => Ok(ProviderKind::Twilio),
            "smsph" => Ok(ProviderKind::Smsph),
            "promotexter" => Ok(ProviderKind::PromoTexter),
            "risingtide" => Ok(ProviderKind::RisingTide),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Android => "android",
            ProviderKind::Semaphore => "semaphore",
            ProviderKind::Infobip => "infobip",
            ProviderKind::Twilio => "twilio",
            ProviderKind::Smsph => "smsph",
            ProviderKind::PromoTexter => "promotexter",
            ProviderKind::RisingTide => "risingtide",
            ProviderKind::Mock => "mock",
        };
        f.write_str(name)
    }
}

/// Fully resolved configuration for exactly one adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    Android(AndroidGatewayConfig),
    Semaphore(SemaphoreConfig),
    Infobip(InfobipConfig),
    Twilio(TwilioConfig),
    Smsph(SmsphConfig),
    PromoTexter(PromoTexterConfig),
    RisingTide(RisingTideConfig),
    Mock,
}

/// Check that `kind`'s required credentials are present and collect them
pub fn resolve_provider_config(
    kind: ProviderKind,
    settings: &SmsSettings,
) -> Result<ProviderConfig, ConfigError> {
    Ok(match kind {
        ProviderKind::Android => ProviderConfig::Android(AndroidGatewayConfig::from_settings(settings)?),
        ProviderKind::Semaphore => ProviderConfig::Semaphore(SemaphoreConfig::from_settings(settings)?),
        ProviderKind::Infobip => ProviderConfig::Infobip(InfobipConfig::from_settings(settings)?),
        ProviderKind::Twilio => ProviderConfig::Twilio(TwilioConfig::from_settings(settings)?),
        ProviderKind::Smsph => ProviderConfig::Smsph(SmsphConfig::from_settings(settings)?),
        ProviderKind::PromoTexter => {
            ProviderConfig::PromoTexter(PromoTexterConfig::from_settings(settings)?)
        }
        ProviderKind::RisingTide => {
            ProviderConfig::RisingTide(RisingTideConfig::from_settings(settings)?)
        }
        ProviderKind::Mock => ProviderConfig::Mock,
    })
}
