//! Subscriber repository trait defining the interface for subscriber persistence.
//!
//! Subscribers live in the portal's document store. The SMS layer only needs
//! to read them, plus a way to register new ones from the opt-in flow.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::subscriber::Subscriber;
use crate::errors::DomainError;

/// Repository trait for Subscriber persistence operations
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// All subscribers, in the order the store returns them
    ///
    /// # Returns
    /// * `Ok(Vec<Subscriber>)` - Possibly empty list of subscribers
    /// * `Err(DomainError)` - Store unavailable or query failed
    async fn list_all(&self) -> Result<Vec<Subscriber>, DomainError>;

    /// Find a subscriber by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Subscriber>, DomainError>;

    /// Store a new subscriber
    async fn create(&self, subscriber: Subscriber) -> Result<Subscriber, DomainError>;
}
