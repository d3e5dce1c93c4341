//! Concurrency and composition tests against the in-process store.
//! Database-backed equivalents live next to the PostgreSQL repository and
//! run ignored.

use std::sync::Arc;

use subscription_service::domain::models::UserRecord;
use subscription_service::repository::{
    InMemoryContentCatalog, InMemorySubscriptionStore, InMemoryUserDirectory, SubscriptionStore,
};
use subscription_service::{
    ServiceError, SubscriptionService, ToggleAction, UserId, ViewService,
};

fn user_record(username: &str) -> UserRecord {
    UserRecord {
        id: UserId::random(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        full_name: format!("{} Fullname", username),
        avatar: None,
        cover_image: None,
        created_at: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn concurrent_creates_yield_exactly_one_edge() {
    subscription_service::init_tracing();

    let store = Arc::new(InMemorySubscriptionStore::new());
    let subscriber = UserId::random();
    let channel = UserId::random();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.create_edge(subscriber, channel).await
        }));
    }

    let mut created = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(ServiceError::DuplicateEdge { .. }) => duplicates += 1,
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(duplicates, 15);
    assert_eq!(store.count_by_channel(channel).await.unwrap(), 1);
}

#[tokio::test]
async fn concurrent_toggles_never_leave_more_than_one_edge() {
    let store = Arc::new(InMemorySubscriptionStore::new());
    let service = SubscriptionService::new(store.clone());
    let subscriber = UserId::random();
    let channel = UserId::random();

    let mut handles = Vec::new();
    for _ in 0..25 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.toggle(Some(subscriber), channel).await
        }));
    }

    for handle in handles {
        // every racing toggle resolves to one of the two actions, never an error
        let action = handle.await.unwrap().unwrap();
        assert!(matches!(
            action,
            ToggleAction::Subscribed | ToggleAction::Unsubscribed
        ));
    }

    // the pair invariant holds regardless of interleaving
    let count = store.count_by_channel(channel).await.unwrap();
    assert!(count <= 1, "expected at most one edge, found {}", count);
    assert_eq!(
        count,
        store.edges_by_channel(channel).await.unwrap().len() as i64
    );
}

#[tokio::test]
async fn counts_track_edge_lists_through_toggle_sequences() {
    let store = Arc::new(InMemorySubscriptionStore::new());
    let service = SubscriptionService::new(store.clone());

    let channel = UserId::random();
    let fans: Vec<UserId> = (0..5).map(|_| UserId::random()).collect();

    // subscribe everyone, unsubscribe two, resubscribe one
    for fan in &fans {
        service.toggle(Some(*fan), channel).await.unwrap();
    }
    service.toggle(Some(fans[0]), channel).await.unwrap();
    service.toggle(Some(fans[1]), channel).await.unwrap();
    service.toggle(Some(fans[0]), channel).await.unwrap();

    let edges = store.edges_by_channel(channel).await.unwrap();
    assert_eq!(edges.len(), 4);
    assert_eq!(store.count_by_channel(channel).await.unwrap(), 4);

    for fan in &fans {
        assert_eq!(
            store.count_by_subscriber(*fan).await.unwrap(),
            store.edges_by_subscriber(*fan).await.unwrap().len() as i64
        );
    }
}

#[tokio::test]
async fn toggle_then_views_compose_end_to_end() {
    let store = Arc::new(InMemorySubscriptionStore::new());
    let users = Arc::new(InMemoryUserDirectory::new());
    let contents = Arc::new(InMemoryContentCatalog::new());
    let service = SubscriptionService::new(store.clone());
    let views = ViewService::new(store.clone(), users.clone(), contents);

    let channel = user_record("channel");
    let fan = user_record("fan");
    users.insert(channel.clone()).await;
    users.insert(fan.clone()).await;

    assert!(matches!(
        service.toggle(Some(fan.id), channel.id).await.unwrap(),
        ToggleAction::Subscribed
    ));

    let profile = views
        .channel_profile(channel.id, Some(fan.id))
        .await
        .unwrap();
    assert_eq!(profile.subscribers_count, 1);
    assert!(profile.is_subscribed);

    let subscribers = views.channel_subscribers(channel.id).await.unwrap();
    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers[0].username, "fan");

    // flip back: the view reflects the new edge set immediately
    service.toggle(Some(fan.id), channel.id).await.unwrap();
    let profile = views
        .channel_profile(channel.id, Some(fan.id))
        .await
        .unwrap();
    assert_eq!(profile.subscribers_count, 0);
    assert!(!profile.is_subscribed);
    assert!(views.channel_subscribers(channel.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn purging_a_user_clears_their_presence_in_views() {
    let store = Arc::new(InMemorySubscriptionStore::new());
    let users = Arc::new(InMemoryUserDirectory::new());
    let contents = Arc::new(InMemoryContentCatalog::new());
    let service = SubscriptionService::new(store.clone());
    let views = ViewService::new(store.clone(), users.clone(), contents);

    let channel = user_record("channel");
    let doomed = user_record("doomed");
    users.insert(channel.clone()).await;
    users.insert(doomed.clone()).await;

    service.toggle(Some(doomed.id), channel.id).await.unwrap();
    service.toggle(Some(channel.id), doomed.id).await.unwrap();

    assert_eq!(service.purge_user(doomed.id).await.unwrap(), 2);

    assert!(views.channel_subscribers(channel.id).await.unwrap().is_empty());
    assert!(views.subscribed_channels(channel.id).await.unwrap().is_empty());
}
