//! Subscriber repository module.

mod r#trait;
pub use r#trait::SubscriberRepository;

mod mock;
pub use mock::MockSubscriberRepository;
