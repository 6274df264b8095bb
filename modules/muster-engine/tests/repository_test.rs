//! Integration tests for the repository over the in-memory store.

use std::sync::Arc;

use chrono::{Duration, Utc};

use muster_common::{ChannelId, GatheringId, MessageId, MusterError, Role, Rsvp, UserId};
use muster_engine::{GatheringDraft, Repository};
use muster_store::MemoryStore;

fn user(raw: &str) -> UserId {
    UserId::from(raw)
}

fn draft(capacity: &str) -> GatheringDraft {
    let start = Utc::now() + Duration::hours(2);
    GatheringDraft {
        title: "Friday Catan".into(),
        date: start.format("%d.%m.%Y").to_string(),
        time: start.format("%H:%M").to_string(),
        game: "Catan".into(),
        capacity: capacity.into(),
        duration_minutes: Some("120".into()),
        description: "Bring snacks".into(),
        link: None,
        channel: ChannelId::from("tabletop"),
    }
}

async fn repo_with_admin(admin: &str) -> Repository {
    let repo = Repository::new(Arc::new(MemoryStore::new()));
    repo.bootstrap(Some(&user(admin))).await.unwrap();
    repo
}

#[tokio::test]
async fn bootstrap_seeds_only_a_fresh_registry() {
    let repo = repo_with_admin("root").await;
    // A second bootstrap with a different user changes nothing.
    repo.bootstrap(Some(&user("other"))).await.unwrap();

    let registry = repo.registry().await.unwrap();
    assert!(registry.admins.contains(&user("root")));
    assert!(!registry.admins.contains(&user("other")));
}

#[tokio::test]
async fn create_requires_the_moderator_role() {
    let repo = repo_with_admin("root").await;

    let err = repo
        .create(&user("rando"), None, &draft("4"), Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, MusterError::Unauthorized(Role::Moderator)));
    assert!(repo.registry().await.unwrap().gatherings.is_empty());
}

#[tokio::test]
async fn moderators_and_admins_can_create() {
    let repo = repo_with_admin("root").await;
    repo.grant_role(&user("root"), &user("mod"), Role::Moderator)
        .await
        .unwrap();

    repo.create(&user("root"), None, &draft("4"), Utc::now())
        .await
        .unwrap();
    repo.create(&user("mod"), None, &draft("4"), Utc::now())
        .await
        .unwrap();
    assert_eq!(repo.registry().await.unwrap().gatherings.len(), 2);
}

#[tokio::test]
async fn create_keeps_the_supplied_id_and_mints_when_absent() {
    let repo = repo_with_admin("root").await;

    let supplied = repo
        .create(
            &user("root"),
            Some(GatheringId::from("interaction-42")),
            &draft("4"),
            Utc::now(),
        )
        .await
        .unwrap();
    assert_eq!(supplied.as_str(), "interaction-42");

    let minted = repo
        .create(&user("root"), None, &draft("4"), Utc::now())
        .await
        .unwrap();
    assert!(!minted.as_str().is_empty());
    assert_ne!(minted, supplied);
}

#[tokio::test]
async fn duplicate_ids_are_rejected() {
    let repo = repo_with_admin("root").await;
    let id = GatheringId::from("interaction-42");
    repo.create(&user("root"), Some(id.clone()), &draft("4"), Utc::now())
        .await
        .unwrap();

    let err = repo
        .create(&user("root"), Some(id), &draft("4"), Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, MusterError::Validation(_)));
}

#[tokio::test]
async fn invalid_draft_creates_nothing() {
    let repo = repo_with_admin("root").await;
    let err = repo
        .create(&user("root"), None, &draft("zero?"), Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, MusterError::Validation(_)));
    assert!(repo.registry().await.unwrap().gatherings.is_empty());
}

#[tokio::test]
async fn rsvp_against_a_missing_gathering_is_not_found() {
    let repo = repo_with_admin("root").await;
    let err = repo
        .rsvp(&GatheringId::from("nope"), &user("u1"), Rsvp::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, MusterError::NotFound(_)));
}

#[tokio::test]
async fn record_message_sets_the_render_reference() {
    let repo = repo_with_admin("root").await;
    let id = repo
        .create(&user("root"), None, &draft("4"), Utc::now())
        .await
        .unwrap();

    repo.record_message(&id, MessageId::from("msg-9")).await.unwrap();
    let gathering = repo.get(&id).await.unwrap();
    assert_eq!(gathering.message, Some(MessageId::from("msg-9")));
}

#[tokio::test]
async fn set_notification_channel_is_admin_gated() {
    let repo = repo_with_admin("root").await;
    repo.grant_role(&user("root"), &user("mod"), Role::Moderator)
        .await
        .unwrap();

    let err = repo
        .set_notification_channel(&user("mod"), ChannelId::from("announce"))
        .await
        .unwrap_err();
    assert!(matches!(err, MusterError::Unauthorized(Role::Admin)));

    repo.set_notification_channel(&user("root"), ChannelId::from("announce"))
        .await
        .unwrap();
    assert_eq!(
        repo.registry().await.unwrap().notification_channel,
        Some(ChannelId::from("announce"))
    );
}

#[tokio::test]
async fn capacity_overflow_and_promotion_flow() {
    // Capacity 2: U1 and U2 confirm, U3 overflows to the waitlist, U1
    // declines and U3 takes the freed slot.
    let repo = repo_with_admin("root").await;
    let id = repo
        .create(&user("root"), None, &draft("2"), Utc::now())
        .await
        .unwrap();

    repo.rsvp(&id, &user("u1"), Rsvp::Confirmed).await.unwrap();
    repo.rsvp(&id, &user("u2"), Rsvp::Confirmed).await.unwrap();

    let (gathering, outcome) = repo.rsvp(&id, &user("u3"), Rsvp::Confirmed).await.unwrap();
    assert!(outcome.notice.is_some());
    assert_eq!(gathering.roster.confirmed, vec![user("u1"), user("u2")]);
    assert_eq!(gathering.roster.waitlisted, vec![user("u3")]);

    let (gathering, outcome) = repo.rsvp(&id, &user("u1"), Rsvp::Declined).await.unwrap();
    assert_eq!(outcome.promoted, Some(user("u3")));
    assert_eq!(gathering.roster.confirmed, vec![user("u2"), user("u3")]);
    assert!(gathering.roster.waitlisted.is_empty());

    // The mutation committed, not just the returned copy.
    let persisted = repo.get(&id).await.unwrap();
    assert_eq!(persisted.roster, gathering.roster);
}
