//! Provider selection
//!
//! Every call reads the settings again and builds a fresh adapter, so a
//! `random` draw is made per request and never sticks for the process.

use mn_core::{SmsProvider, SmsProviderFactory};
use rand::Rng;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::android::AndroidGatewaySmsService;
use super::config::{resolve_provider_config, ProviderConfig, ProviderKind, SmsSettings, RANDOM_PROVIDER};
use super::infobip::InfobipSmsService;
use super::mock_sms::MockSmsService;
use super::promotexter::PromoTexterSmsService;
use super::risingtide::RisingTideSmsService;
use super::semaphore::SemaphoreSmsService;
use super::smsph::SmsphSmsService;
use super::twilio::TwilioSmsService;

type SettingsSource = Arc<dyn Fn() -> SmsSettings + Send + Sync>;
type Draw = Arc<dyn Fn() -> f64 + Send + Sync>;

/// Builds providers from `SMS_PROVIDER` and the matching credentials
///
/// Misconfiguration never fails the caller: an unknown provider name or a
/// missing credential logs a warning and yields [`MockSmsService`].
#[derive(Clone)]
pub struct EnvSmsProviderFactory {
    settings: SettingsSource,
    draw: Draw,
}

impl EnvSmsProviderFactory {
    /// Factory reading the process environment on every call
    pub fn new() -> Self {
        Self {
            settings: Arc::new(SmsSettings::from_env),
            draw: Arc::new(|| rand::thread_rng().gen::<f64>()),
        }
    }

    /// Use fixed settings instead of the environment
    pub fn with_settings(mut self, settings: SmsSettings) -> Self {
        self.settings = Arc::new(move || settings.clone());
        self
    }

    /// Replace the uniform `[0, 1)` draw used for weighted selection
    pub fn with_draw<D>(mut self, draw: D) -> Self
    where
        D: Fn() -> f64 + Send + Sync + 'static,
    {
        self.draw = Arc::new(draw);
        self
    }

    /// Provider name to build, after any weighted draw
    ///
    /// When the weights cannot be used the literal `random` is returned,
    /// which matches no gateway and so ends up as Mock.
    pub fn select_provider_name(&self, settings: &SmsSettings) -> String {
        let name = settings.provider_name();
        if name != RANDOM_PROVIDER {
            return name;
        }

        let weights = match settings.weights.as_deref() {
            Some(raw) => match serde_json::from_str::<Map<String, Value>>(raw) {
                Ok(weights) => weights,
                Err(e) => {
                    warn!(error = %e, "SMS_WEIGHTS is not a JSON object, random selection skipped");
                    return name;
                }
            },
            None => {
                warn!("SMS_PROVIDER is random but SMS_WEIGHTS is not set");
                return name;
            }
        };

        let draw = (self.draw)();
        match select_weighted(&weights, draw) {
            Some(selected) => {
                debug!(draw, provider = %selected, "Weighted provider draw");
                selected.to_lowercase()
            }
            None => {
                warn!(draw, "SMS_WEIGHTS do not cover the draw, random selection skipped");
                name
            }
        }
    }

    /// Build the provider the given settings select
    pub fn provider_for(&self, settings: &SmsSettings) -> Box<dyn SmsProvider> {
        let name = self.select_provider_name(settings);
        if name.is_empty() {
            debug!("SMS_PROVIDER not set, using mock implementation");
            return Box::new(MockSmsService::new());
        }

        let resolved = name
            .parse::<ProviderKind>()
            .and_then(|kind| resolve_provider_config(kind, settings));

        match resolved {
            Ok(config) => {
                let provider = build_provider(config);
                info!(provider = provider.name(), "SMS provider selected");
                provider
            }
            Err(e) => {
                warn!(error = %e, "Falling back to mock SMS service");
                Box::new(MockSmsService::new())
            }
        }
    }
}

impl Default for EnvSmsProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SmsProviderFactory for EnvSmsProviderFactory {
    fn get_provider(&self) -> Box<dyn SmsProvider> {
        let settings = (self.settings)();
        self.provider_for(&settings)
    }
}

/// First entry whose running weight total exceeds `draw`
///
/// Entries are visited in the map's insertion order. Weights that are not
/// numbers count as zero.
pub fn select_weighted(weights: &Map<String, Value>, draw: f64) -> Option<String> {
    let mut cumulative = 0.0;
    for (name, weight) in weights {
        cumulative += weight.as_f64().unwrap_or(0.0);
        if draw < cumulative {
            return Some(name.clone());
        }
    }
    None
}

/// Instantiate the adapter for an already resolved configuration
pub fn build_provider(config: ProviderConfig) -> Box<dyn SmsProvider> {
    match config {
        ProviderConfig::Android(config) => Box::new(AndroidGatewaySmsService::new(config)),
        ProviderConfig::Semaphore(config) => Box::new(SemaphoreSmsService::new(config)),
        ProviderConfig::Infobip(config) => Box::new(InfobipSmsService::new(config)),
        ProviderConfig::Twilio(config) => Box::new(TwilioSmsService::new(config)),
        ProviderConfig::Smsph(config) => Box::new(SmsphSmsService::new(config)),
        ProviderConfig::PromoTexter(config) => Box::new(PromoTexterSmsService::new(config)),
        ProviderConfig::RisingTide(config) => Box::new(RisingTideSmsService::new(config)),
        ProviderConfig::Mock => Box::new(MockSmsService::new()),
    }
}

/// Provider for the current environment
pub fn get_sms_provider() -> Box<dyn SmsProvider> {
    EnvSmsProviderFactory::new().get_provider()
}
