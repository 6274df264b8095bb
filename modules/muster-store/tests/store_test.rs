use chrono::{Duration, Utc};

use muster_common::{ChannelId, Gathering, GatheringId, Registry, Roster, UserId};
use muster_store::{DocumentStore, JsonFileStore, MemoryStore};

fn sample_registry() -> Registry {
    let mut registry = Registry::default();
    registry.admins.insert(UserId::from("admin-1"));
    registry.notification_channel = Some(ChannelId::from("announce"));

    let id = GatheringId::from("g-1");
    let mut roster = Roster::default();
    roster.confirmed.push(UserId::from("u-1"));
    roster.waitlisted.push(UserId::from("u-2"));
    registry.gatherings.insert(
        id.clone(),
        Gathering {
            id,
            title: "Friday Catan".into(),
            start: Utc::now() + Duration::hours(3),
            end: Some(Utc::now() + Duration::hours(5)),
            game: "Catan".into(),
            description: "Bring snacks".into(),
            link: Some("https://example.com/rules".into()),
            capacity: 4,
            channel: ChannelId::from("tabletop"),
            message: None,
            reminder_sent: false,
            roster,
        },
    );
    registry
}

#[tokio::test]
async fn missing_file_loads_as_empty_registry() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("registry.json"));

    let registry = store.load().await.unwrap();
    assert!(registry.gatherings.is_empty());
    assert!(registry.admins.is_empty());
    assert!(registry.notification_channel.is_none());
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("registry.json"));

    let registry = sample_registry();
    store.save(&registry).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, registry);
}

#[tokio::test]
async fn save_replaces_the_whole_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("registry.json"));

    store.save(&sample_registry()).await.unwrap();

    let mut second = sample_registry();
    second.gatherings.clear();
    store.save(&second).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert!(loaded.gatherings.is_empty());
    // The rest of the document survived the replace.
    assert!(loaded.admins.contains(&UserId::from("admin-1")));
}

#[tokio::test]
async fn save_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.json");
    let store = JsonFileStore::new(&path);

    store.save(&sample_registry()).await.unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("registry.json")]);
}

#[tokio::test]
async fn memory_store_round_trips() {
    let store = MemoryStore::new();
    assert!(store.load().await.unwrap().gatherings.is_empty());

    let registry = sample_registry();
    store.save(&registry).await.unwrap();
    assert_eq!(store.load().await.unwrap(), registry);
}
