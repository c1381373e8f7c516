//! In-memory implementation of SubscriberRepository for testing and local runs

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::subscriber::Subscriber;
use crate::errors::DomainError;

use super::SubscriberRepository;

/// Mock subscriber repository keeping insertion order
#[derive(Clone, Default)]
pub struct MockSubscriberRepository {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockSubscriberRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with subscribers
    pub fn with_subscribers(subscribers: Vec<Subscriber>) -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(subscribers)),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent call fail with a repository error
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Repository {
                message: "Subscriber store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SubscriberRepository for MockSubscriberRepository {
    async fn list_all(&self) -> Result<Vec<Subscriber>, DomainError> {
        self.check_available()?;
        Ok(self.subscribers.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Subscriber>, DomainError> {
        self.check_available()?;
        let subscribers = self.subscribers.read().await;
        Ok(subscribers.iter().find(|s| s.id == id).cloned())
    }

    async fn create(&self, subscriber: Subscriber) -> Result<Subscriber, DomainError> {
        self.check_available()?;
        let mut subscribers = self.subscribers.write().await;

        if subscribers.iter().any(|s| s.phone == subscriber.phone) {
            return Err(DomainError::Validation {
                message: "Phone number already subscribed".to_string(),
            });
        }

        subscribers.push(subscriber.clone());
        Ok(subscriber)
    }
}
