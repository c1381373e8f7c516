//! Types for notification flow results

use serde::Serialize;

use crate::domain::entities::{Announcement, Subscriber};
use crate::domain::value_objects::{BroadcastReport, SendResult};

/// Result of publishing an announcement
#[derive(Debug, Clone, Serialize)]
pub struct PublishOutcome {
    /// The stored announcement
    pub announcement: Announcement,
    /// Broadcast report, when subscribers were notified and the broadcast ran
    pub broadcast: Option<BroadcastReport>,
    /// Message shown to the administrator
    pub feedback: String,
    /// Whether the SMS side fell short while the announcement itself was stored
    pub sms_degraded: bool,
}

/// Result of subscribing a member
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionOutcome {
    /// The stored subscriber
    pub subscriber: Subscriber,
    /// Outcome of the confirmation SMS
    pub confirmation: SendResult,
}
