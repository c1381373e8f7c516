pub mod announcement;
pub mod subscriber;

pub use announcement::{AnnouncementRepository, MockAnnouncementRepository};
pub use subscriber::{MockSubscriberRepository, SubscriberRepository};
