//! Domain entities representing core business objects.

pub mod announcement;
pub mod subscriber;

// Re-export commonly used types
pub use announcement::{Announcement, AnnouncementDraft};
pub use subscriber::Subscriber;
