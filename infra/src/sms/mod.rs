//! SMS Service Module
//!
//! This module provides the SMS gateway adapters used for announcement
//! broadcasts and subscriber notifications, and the factory that picks one
//! of them from environment configuration.
//!
//! ## Features
//!
//! - **One adapter per gateway**: each owns its wire format, destination
//!   number convention, success rule and time limit
//! - **Mock Implementation**: logs instead of sending, always succeeds
//! - **Weighted random selection**: `SMS_PROVIDER=random` spreads traffic
//!   across gateways according to `SMS_WEIGHTS`
//! - **Fail-open configuration**: missing credentials fall back to Mock
//! - **Security**: phone number masking in logs

pub mod config;
pub mod factory;
mod gateway;

pub mod android;
pub mod infobip;
pub mod mock_sms;
pub mod promotexter;
pub mod risingtide;
pub mod semaphore;
pub mod smsph;
pub mod twilio;

// Re-export commonly used types
pub use config::{resolve_provider_config, ConfigError, ProviderConfig, ProviderKind, SmsSettings};
pub use factory::{build_provider, get_sms_provider, select_weighted, EnvSmsProviderFactory};

pub use android::{AndroidGatewayConfig, AndroidGatewaySmsService};
pub use infobip::{InfobipConfig, InfobipSmsService};
pub use mock_sms::MockSmsService;
pub use promotexter::{PromoTexterConfig, PromoTexterSmsService};
pub use risingtide::{RisingTideConfig, RisingTideSmsService};
pub use semaphore::{SemaphoreConfig, SemaphoreSmsService};
pub use smsph::{SmsphConfig, SmsphSmsService};
pub use twilio::{TwilioConfig, TwilioSender, TwilioSmsService};

#[cfg(test)]
mod tests;
