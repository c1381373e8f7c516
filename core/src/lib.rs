//! # Masjid Notify Core
//!
//! Core business logic and domain layer for the mosque administration portal's
//! outbound SMS notifications. This crate contains the domain types, the SMS
//! provider contract, repository interfaces for the document store, the
//! broadcast and publishing services, and error types.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::{
    Announcement, AnnouncementDraft, BroadcastReport, FailedDelivery, SendResult, Subscriber,
};
pub use errors::{DomainError, DomainResult};
pub use repositories::{
    AnnouncementRepository, MockAnnouncementRepository, MockSubscriberRepository,
    SubscriberRepository,
};
pub use services::{
    AnnouncementBroadcaster, AnnouncementService, PublishOutcome, SmsProvider,
    SmsProviderFactory, SubscriberNotifier, SubscriptionOutcome,
};
