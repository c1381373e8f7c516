//! Subscriber entity: a congregation member who opted in to SMS announcements.

use chrono::{DateTime, Utc};
use mn_shared::PhoneNumber;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recipient of SMS broadcasts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    /// Unique identifier for the subscriber
    pub id: Uuid,

    /// Display name, used in personalised notifications
    pub name: String,

    /// Phone number as entered, in any of the local, bare or E.164 shapes
    pub phone: String,

    /// Timestamp when the subscriber opted in
    pub subscribed_at: DateTime<Utc>,
}

impl Subscriber {
    /// Creates a new Subscriber instance
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: phone.into(),
            subscribed_at: Utc::now(),
        }
    }

    pub fn phone_number(&self) -> PhoneNumber {
        PhoneNumber::new(self.phone.clone())
    }
}
