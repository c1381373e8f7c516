//! Announcement repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::announcement::Announcement;
use crate::errors::DomainError;

/// Repository trait for Announcement persistence operations
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    /// Store a new announcement
    ///
    /// # Returns
    /// * `Ok(Announcement)` - The stored announcement
    /// * `Err(DomainError)` - The write failed; nothing was stored
    async fn create(&self, announcement: Announcement) -> Result<Announcement, DomainError>;

    /// Find an announcement by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>, DomainError>;
}
