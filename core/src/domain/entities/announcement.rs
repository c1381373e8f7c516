//! Announcement entity posted by mosque administrators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Announcement content submitted by an administrator, before it is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementDraft {
    pub title: String,
    pub body: String,
}

impl AnnouncementDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Title and body must both be non-blank
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Announcement title is required".to_string(),
            });
        }
        if self.body.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Announcement body is required".to_string(),
            });
        }
        Ok(())
    }
}

/// A stored announcement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Unique identifier for the announcement
    pub id: Uuid,

    pub title: String,

    pub body: String,

    /// Timestamp when the announcement was posted
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    /// Creates a new Announcement from a validated draft
    pub fn from_draft(draft: AnnouncementDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            body: draft.body,
            created_at: Utc::now(),
        }
    }

    /// Text sent to subscribers when the announcement is broadcast
    pub fn sms_text(&self) -> String {
        format!("{}\n\n{}", self.title.trim(), self.body.trim())
    }
}
