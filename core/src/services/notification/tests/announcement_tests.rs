//! Unit tests for announcement publishing

use std::sync::Arc;

use crate::domain::entities::{AnnouncementDraft, Subscriber};
use crate::errors::DomainError;
use crate::repositories::{AnnouncementRepository, MockAnnouncementRepository, MockSubscriberRepository};
use crate::services::notification::AnnouncementService;

use super::mocks::{ScriptedFactory, ScriptedProvider};

fn subscribers(count: usize) -> Vec<Subscriber> {
    (0..count)
        .map(|i| Subscriber::new(format!("Member {}", i), format!("0917000000{}", i)))
        .collect()
}

#[tokio::test]
async fn test_publish_without_sms() {
    let factory = Arc::new(ScriptedFactory::new(ScriptedProvider::new()));
    let announcements = Arc::new(MockAnnouncementRepository::new());
    let service = AnnouncementService::new(
        factory.clone(),
        Arc::new(MockSubscriberRepository::with_subscribers(subscribers(2))),
        announcements.clone(),
    );

    let outcome = service
        .publish(AnnouncementDraft::new("Cleanup", "Saturday 8 AM"), false)
        .await
        .unwrap();

    assert_eq!(outcome.feedback, "Announcement posted.");
    assert!(outcome.broadcast.is_none());
    assert!(!outcome.sms_degraded);
    assert_eq!(announcements.count().await, 1);
    assert_eq!(factory.requests(), 0);
}

#[tokio::test]
async fn test_publish_with_full_broadcast() {
    let provider = ScriptedProvider::new();
    let factory = Arc::new(ScriptedFactory::new(provider.clone()));
    let service = AnnouncementService::new(
        factory,
        Arc::new(MockSubscriberRepository::with_subscribers(subscribers(3))),
        Arc::new(MockAnnouncementRepository::new()),
    );

    let outcome = service
        .publish(AnnouncementDraft::new("Iftar", "Community iftar at sunset"), true)
        .await
        .unwrap();

    assert_eq!(outcome.feedback, "Announcement posted and sent to 3 subscribers.");
    assert!(!outcome.sms_degraded);
    let sent = provider.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[0].1, "Iftar\n\nCommunity iftar at sunset");
}

#[tokio::test]
async fn test_partial_sms_failure_downgrades_feedback_only() {
    let factory = Arc::new(ScriptedFactory::new(ScriptedProvider::failing_on(&[0, 4])));
    let announcements = Arc::new(MockAnnouncementRepository::new());
    let service = AnnouncementService::new(
        factory,
        Arc::new(MockSubscriberRepository::with_subscribers(subscribers(10))),
        announcements.clone(),
    );

    let outcome = service
        .publish(AnnouncementDraft::new("Eid", "Eid prayer at 7 AM"), true)
        .await
        .unwrap();

    assert!(outcome.sms_degraded);
    assert_eq!(
        outcome.feedback,
        "Announcement posted, but SMS was only sent to 8 of 10 subscribers."
    );
    let stored = announcements.find_by_id(outcome.announcement.id).await.unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn test_subscriber_store_failure_does_not_fail_publish() {
    let subscriber_repo = Arc::new(MockSubscriberRepository::new());
    subscriber_repo.set_should_fail(true);
    let announcements = Arc::new(MockAnnouncementRepository::new());
    let service = AnnouncementService::new(
        Arc::new(ScriptedFactory::new(ScriptedProvider::new())),
        subscriber_repo,
        announcements.clone(),
    );

    let outcome = service
        .publish(AnnouncementDraft::new("Notice", "Parking closed"), true)
        .await
        .unwrap();

    assert!(outcome.sms_degraded);
    assert!(outcome.feedback.contains("could not be started"));
    assert_eq!(announcements.count().await, 1);
}

#[tokio::test]
async fn test_store_failure_sends_nothing() {
    let factory = Arc::new(ScriptedFactory::new(ScriptedProvider::new()));
    let announcements = Arc::new(MockAnnouncementRepository::new());
    announcements.set_should_fail(true);
    let service = AnnouncementService::new(
        factory.clone(),
        Arc::new(MockSubscriberRepository::with_subscribers(subscribers(2))),
        announcements,
    );

    let result = service
        .publish(AnnouncementDraft::new("Notice", "Parking closed"), true)
        .await;

    assert!(matches!(result, Err(DomainError::Repository { .. })));
    assert_eq!(factory.requests(), 0);
}

#[tokio::test]
async fn test_invalid_draft_rejected() {
    let service = AnnouncementService::new(
        Arc::new(ScriptedFactory::new(ScriptedProvider::new())),
        Arc::new(MockSubscriberRepository::new()),
        Arc::new(MockAnnouncementRepository::new()),
    );

    let result = service.publish(AnnouncementDraft::new("", "body"), true).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}
