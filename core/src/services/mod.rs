//! Business services containing domain logic and use cases.

pub mod notification;

// Re-export commonly used types
pub use notification::{
    AnnouncementBroadcaster, AnnouncementService, PublishOutcome, SmsProvider,
    SmsProviderFactory, SubscriberNotifier, SubscriptionOutcome,
};
