//! In-memory implementation of AnnouncementRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::announcement::Announcement;
use crate::errors::DomainError;

use super::AnnouncementRepository;

/// Mock announcement repository for testing
#[derive(Clone, Default)]
pub struct MockAnnouncementRepository {
    announcements: Arc<RwLock<HashMap<Uuid, Announcement>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockAnnouncementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub async fn count(&self) -> usize {
        self.announcements.read().await.len()
    }
}

#[async_trait]
impl AnnouncementRepository for MockAnnouncementRepository {
    async fn create(&self, announcement: Announcement) -> Result<Announcement, DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Repository {
                message: "Announcement store unavailable".to_string(),
            });
        }
        let mut announcements = self.announcements.write().await;
        announcements.insert(announcement.id, announcement.clone());
        Ok(announcement)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>, DomainError> {
        let announcements = self.announcements.read().await;
        Ok(announcements.get(&id).cloned())
    }
}
