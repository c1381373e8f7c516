//! Single-recipient notifications

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::Subscriber;
use crate::domain::value_objects::SendResult;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::SubscriberRepository;

use super::traits::SmsProviderFactory;
use super::types::SubscriptionOutcome;

/// Confirmation sent after subscribing; `{name}` is replaced with the subscriber's name
pub const DEFAULT_WELCOME_MESSAGE: &str =
    "Assalamu alaikum {name}! You are now subscribed to masjid SMS announcements.";

/// Sends messages to one subscriber at a time
pub struct SubscriberNotifier<F: SmsProviderFactory, R: SubscriberRepository> {
    factory: Arc<F>,
    subscribers: Arc<R>,
    welcome_message: String,
}

impl<F: SmsProviderFactory, R: SubscriberRepository> SubscriberNotifier<F, R> {
    pub fn new(factory: Arc<F>, subscribers: Arc<R>) -> Self {
        Self {
            factory,
            subscribers,
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
        }
    }

    /// Override the confirmation template
    pub fn with_welcome_message(mut self, template: impl Into<String>) -> Self {
        self.welcome_message = template.into();
        self
    }

    /// Store a new subscriber and send them a confirmation SMS
    ///
    /// A failed confirmation does not undo the subscription; the outcome
    /// carries the failed [`SendResult`] instead.
    pub async fn subscribe(
        &self,
        name: &str,
        phone: &str,
    ) -> DomainResult<SubscriptionOutcome> {
        if phone.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Phone number is required".to_string(),
            });
        }

        let subscriber = self
            .subscribers
            .create(Subscriber::new(name.trim(), phone.trim()))
            .await?;

        let message = self.welcome_message.replace("{name}", &subscriber.name);
        let confirmation = self.send_to(&subscriber, &message).await;

        Ok(SubscriptionOutcome {
            subscriber,
            confirmation,
        })
    }

    /// Send a direct message to a stored subscriber
    pub async fn notify(&self, subscriber_id: Uuid, message: &str) -> DomainResult<SendResult> {
        let subscriber = self
            .subscribers
            .find_by_id(subscriber_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "Subscriber".to_string(),
            })?;

        Ok(self.send_to(&subscriber, message).await)
    }

    /// Send a message to a subscriber record without looking it up
    pub async fn send_to(&self, subscriber: &Subscriber, message: &str) -> SendResult {
        let provider = self.factory.get_provider();
        let phone = subscriber.phone_number();
        let result = provider.send(phone.as_str(), message).await;

        match result.error() {
            None => info!(
                provider = provider.name(),
                phone = %phone.masked(),
                "Subscriber notification sent"
            ),
            Some(error) => warn!(
                provider = provider.name(),
                phone = %phone.masked(),
                error = %error,
                "Subscriber notification failed"
            ),
        }

        result
    }
}
