//! Announcement repository module.

mod r#trait;
pub use r#trait::AnnouncementRepository;

mod mock;
pub use mock::MockAnnouncementRepository;
