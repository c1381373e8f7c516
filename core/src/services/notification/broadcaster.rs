//! Broadcasting one message to every subscriber

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::entities::Subscriber;
use crate::domain::value_objects::{BroadcastReport, FailedDelivery};
use crate::errors::DomainResult;
use crate::repositories::SubscriberRepository;

use super::traits::{SmsProvider, SmsProviderFactory};

/// Sends a message to all subscribers through a single provider
///
/// One provider is obtained per broadcast, so a weighted random selection
/// holds for every recipient of that broadcast. Sends run one after another
/// and a failed recipient never stops the loop.
pub struct AnnouncementBroadcaster<F: SmsProviderFactory, R: SubscriberRepository> {
    factory: Arc<F>,
    subscribers: Arc<R>,
}

impl<F: SmsProviderFactory, R: SubscriberRepository> AnnouncementBroadcaster<F, R> {
    /// Create a new broadcaster
    ///
    /// # Arguments
    ///
    /// * `factory` - Source of the provider used for each broadcast
    /// * `subscribers` - Repository listing the recipients
    pub fn new(factory: Arc<F>, subscribers: Arc<R>) -> Self {
        Self {
            factory,
            subscribers,
        }
    }

    /// Send `message` to every stored subscriber
    ///
    /// # Returns
    ///
    /// * `Ok(BroadcastReport)` - Per-recipient outcome counts; individual SMS
    ///   failures are recorded here, not returned as errors
    /// * `Err(DomainError)` - The subscriber list could not be loaded
    pub async fn broadcast(&self, message: &str) -> DomainResult<BroadcastReport> {
        let subscribers = self.subscribers.list_all().await?;
        Ok(self.broadcast_to(&subscribers, message).await)
    }

    /// Send `message` to the given subscribers
    pub async fn broadcast_to(&self, subscribers: &[Subscriber], message: &str) -> BroadcastReport {
        if subscribers.is_empty() {
            info!("No subscribers to notify, skipping SMS broadcast");
            return BroadcastReport::empty();
        }

        let provider = self.factory.get_provider();
        info!(
            provider = provider.name(),
            recipients = subscribers.len(),
            message_length = message.len(),
            "Starting SMS broadcast"
        );

        let report = deliver_all(provider.as_ref(), subscribers, message).await;

        if report.all_sent() {
            info!(provider = provider.name(), "SMS broadcast {}", report.summary());
        } else {
            warn!(
                provider = provider.name(),
                failed = report.failed_count(),
                "SMS broadcast {}",
                report.summary()
            );
        }

        report
    }
}

async fn deliver_all(
    provider: &dyn SmsProvider,
    subscribers: &[Subscriber],
    message: &str,
) -> BroadcastReport {
    let mut report = BroadcastReport::for_provider(provider.name(), subscribers.len());

    for subscriber in subscribers {
        let phone = subscriber.phone_number();
        let result = provider.send(phone.as_str(), message).await;

        match result.error() {
            None => {
                debug!(phone = %phone.masked(), "SMS delivered to gateway");
                report.sent += 1;
            }
            Some(error) => {
                warn!(phone = %phone.masked(), error = %error, "SMS delivery failed");
                report.failures.push(FailedDelivery {
                    subscriber_id: subscriber.id,
                    phone: phone.masked(),
                    error: error.to_string(),
                });
            }
        }
    }

    report
}
