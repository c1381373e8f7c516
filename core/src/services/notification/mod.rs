//! SMS notification module
//!
//! This module holds the provider contract and the flows that use it:
//! - Broadcasting one message to every subscriber
//! - Subscribing a member and sending them a confirmation
//! - Publishing an announcement with an optional SMS broadcast

mod announcement;
mod broadcaster;
mod notifier;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use announcement::AnnouncementService;
pub use broadcaster::AnnouncementBroadcaster;
pub use notifier::{SubscriberNotifier, DEFAULT_WELCOME_MESSAGE};
pub use traits::{SmsProvider, SmsProviderFactory};
pub use types::{PublishOutcome, SubscriptionOutcome};
