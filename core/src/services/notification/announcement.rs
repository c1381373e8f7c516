//! Publishing announcements with an accompanying SMS broadcast

use std::sync::Arc;
use tracing::{error, info};

use crate::domain::entities::{Announcement, AnnouncementDraft};
use crate::domain::value_objects::BroadcastReport;
use crate::errors::DomainResult;
use crate::repositories::{AnnouncementRepository, SubscriberRepository};

use super::broadcaster::AnnouncementBroadcaster;
use super::traits::SmsProviderFactory;
use super::types::PublishOutcome;

/// Stores announcements and optionally texts them to subscribers
///
/// The stored announcement is the primary result. SMS problems only change
/// the feedback shown to the administrator; they never undo the write.
pub struct AnnouncementService<F, S, A>
where
    F: SmsProviderFactory,
    S: SubscriberRepository,
    A: AnnouncementRepository,
{
    announcements: Arc<A>,
    broadcaster: AnnouncementBroadcaster<F, S>,
}

impl<F, S, A> AnnouncementService<F, S, A>
where
    F: SmsProviderFactory,
    S: SubscriberRepository,
    A: AnnouncementRepository,
{
    pub fn new(factory: Arc<F>, subscribers: Arc<S>, announcements: Arc<A>) -> Self {
        Self {
            announcements,
            broadcaster: AnnouncementBroadcaster::new(factory, subscribers),
        }
    }

    /// Store an announcement and, when `notify_subscribers` is set, broadcast it
    ///
    /// # Returns
    ///
    /// * `Ok(PublishOutcome)` - The announcement was stored
    /// * `Err(DomainError)` - Validation or the store write failed; no SMS was sent
    pub async fn publish(
        &self,
        draft: AnnouncementDraft,
        notify_subscribers: bool,
    ) -> DomainResult<PublishOutcome> {
        draft.validate()?;

        let announcement = self
            .announcements
            .create(Announcement::from_draft(draft))
            .await?;
        info!(announcement_id = %announcement.id, "Announcement stored");

        if !notify_subscribers {
            return Ok(PublishOutcome {
                announcement,
                broadcast: None,
                feedback: "Announcement posted.".to_string(),
                sms_degraded: false,
            });
        }

        match self.broadcaster.broadcast(&announcement.sms_text()).await {
            Ok(report) => {
                let (feedback, sms_degraded) = feedback_for(&report);
                Ok(PublishOutcome {
                    announcement,
                    broadcast: Some(report),
                    feedback,
                    sms_degraded,
                })
            }
            Err(e) => {
                error!(
                    announcement_id = %announcement.id,
                    error = %e,
                    "SMS broadcast could not start"
                );
                Ok(PublishOutcome {
                    announcement,
                    broadcast: None,
                    feedback: format!(
                        "Announcement posted, but the SMS broadcast could not be started: {}",
                        e
                    ),
                    sms_degraded: true,
                })
            }
        }
    }
}

fn feedback_for(report: &BroadcastReport) -> (String, bool) {
    if report.total == 0 {
        ("Announcement posted. No subscribers to notify.".to_string(), false)
    } else if report.all_sent() {
        (
            format!("Announcement posted and sent to {} subscribers.", report.total),
            false,
        )
    } else {
        (
            format!("Announcement posted, but SMS was only {}.", report.summary()),
            true,
        )
    }
}
