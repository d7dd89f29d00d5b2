//! Tests for the presence registry and its REST roster view.
//!
//! The registry tests exercise connect/disconnect semantics, roster
//! replacement on reconnect, and broadcast delivery directly, without
//! performing HTTP upgrades.

mod common;

use assert_matches::assert_matches;
use axum::extract::ws::Message;
use axum::http::StatusCode;
use common::{body_json, get, get_auth};
use hrsadmin_api::ws::PresenceRegistry;
use sqlx::PgPool;
use std::sync::Arc;

/// Decode an `online-users-update` frame into its list of emails.
fn roster_from(msg: Message) -> Vec<String> {
    let Message::Text(text) = msg else {
        panic!("expected a Text frame, got: {msg:?}");
    };
    let json: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
    assert_eq!(json["type"], "online-users-update");
    json["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Registry semantics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_registry_is_empty() {
    let registry = PresenceRegistry::new();

    assert_eq!(registry.connection_count().await, 0);
    assert!(registry.roster().await.is_empty());
}

#[tokio::test]
async fn anonymous_connection_never_joins_roster() {
    let registry = PresenceRegistry::new();

    let _rx = registry.add("conn-1".to_string(), None).await;

    assert_eq!(registry.connection_count().await, 1);
    assert!(
        registry.roster().await.is_empty(),
        "anonymous connections must not be listed"
    );
}

#[tokio::test]
async fn identified_connection_joins_roster_and_hears_broadcast() {
    let registry = PresenceRegistry::new();

    let mut anon_rx = registry.add("conn-anon".to_string(), None).await;
    let mut id_rx = registry
        .add("conn-1".to_string(), Some("a@test.com".to_string()))
        .await;

    assert_eq!(registry.roster().await, vec!["a@test.com".to_string()]);
    assert!(registry.is_online("a@test.com").await);

    // Both the anonymous channel and the new one receive the update.
    let emails = roster_from(anon_rx.recv().await.unwrap());
    assert_eq!(emails, vec!["a@test.com"]);
    let emails = roster_from(id_rx.recv().await.unwrap());
    assert_eq!(emails, vec!["a@test.com"]);
}

#[tokio::test]
async fn reconnect_replaces_roster_entry() {
    let registry = PresenceRegistry::new();

    let _rx_old = registry
        .add("conn-old".to_string(), Some("a@test.com".to_string()))
        .await;
    let _rx_new = registry
        .add("conn-new".to_string(), Some("a@test.com".to_string()))
        .await;

    // Two live connections, but exactly one roster entry.
    assert_eq!(registry.connection_count().await, 2);
    assert_eq!(registry.roster().await, vec!["a@test.com".to_string()]);
}

#[tokio::test]
async fn closing_a_stale_channel_marks_user_offline() {
    let registry = PresenceRegistry::new();

    let _rx_old = registry
        .add("conn-old".to_string(), Some("a@test.com".to_string()))
        .await;
    let _rx_new = registry
        .add("conn-new".to_string(), Some("a@test.com".to_string()))
        .await;

    // The stale channel closing still removes the entry: either channel
    // disconnecting takes the user out of the roster.
    registry.remove("conn-old").await;

    assert!(!registry.is_online("a@test.com").await);
    assert_eq!(registry.connection_count().await, 1);
}

#[tokio::test]
async fn each_connect_fans_out_the_full_roster() {
    let registry = PresenceRegistry::new();

    let mut rx_a = registry
        .add("conn-a".to_string(), Some("a@test.com".to_string()))
        .await;
    let mut rx_b = registry
        .add("conn-b".to_string(), Some("b@test.com".to_string()))
        .await;
    let mut rx_c = registry
        .add("conn-c".to_string(), Some("c@test.com".to_string()))
        .await;

    // Skip the frames from the first two connects; a heard both, b one.
    let _ = rx_a.recv().await;
    let _ = rx_a.recv().await;
    let _ = rx_b.recv().await;

    // After the third connect every channel hears all three identities,
    // sorted, exactly once each.
    let expected = ["a@test.com", "b@test.com", "c@test.com"];
    for rx in [&mut rx_a, &mut rx_b, &mut rx_c] {
        let emails = roster_from(rx.recv().await.unwrap());
        assert_eq!(emails, expected);
    }
}

#[tokio::test]
async fn disconnect_broadcasts_updated_roster() {
    let registry = PresenceRegistry::new();

    let mut rx_a = registry
        .add("conn-a".to_string(), Some("a@test.com".to_string()))
        .await;
    let _rx_b = registry
        .add("conn-b".to_string(), Some("b@test.com".to_string()))
        .await;

    // Drain the connect-time updates on a's channel.
    let _ = rx_a.recv().await;
    let _ = rx_a.recv().await;

    registry.remove("conn-b").await;

    let emails = roster_from(rx_a.recv().await.unwrap());
    assert_eq!(emails, vec!["a@test.com"], "b must be gone after disconnect");
}

#[tokio::test]
async fn remove_unknown_id_is_noop() {
    let registry = PresenceRegistry::new();

    let _rx = registry
        .add("conn-1".to_string(), Some("a@test.com".to_string()))
        .await;
    registry.remove("nonexistent").await;

    assert_eq!(registry.connection_count().await, 1);
    assert!(registry.is_online("a@test.com").await);
}

#[tokio::test]
async fn broadcast_skips_closed_channels() {
    let registry = PresenceRegistry::new();

    let rx1 = registry.add("conn-1".to_string(), None).await;
    let mut rx2 = registry.add("conn-2".to_string(), None).await;

    // Drop rx1 to close its channel.
    drop(rx1);

    // Broadcast should not panic even though conn-1's channel is closed.
    let payload = Message::Text("still alive".into());
    registry.broadcast(payload).await;

    // conn-2 should still receive the message.
    let msg = rx2.recv().await.expect("rx2 should receive broadcast");
    assert_matches!(&msg, Message::Text(t) if *t == "still alive");
}

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let registry = PresenceRegistry::new();

    let mut rx1 = registry
        .add("conn-1".to_string(), Some("a@test.com".to_string()))
        .await;
    let mut rx2 = registry.add("conn-2".to_string(), None).await;
    assert_eq!(registry.connection_count().await, 2);

    registry.shutdown_all().await;

    assert_eq!(registry.connection_count().await, 0);
    assert!(registry.roster().await.is_empty());

    // Skip the roster update rx1 got at connect time; the final message on
    // both channels must be Close.
    let mut last1 = rx1.recv().await;
    while let Some(msg) = rx1.recv().await {
        last1 = Some(msg);
    }
    assert_matches!(last1, Some(Message::Close(None)));

    let mut last2 = rx2.recv().await;
    while let Some(msg) = rx2.recv().await {
        last2 = Some(msg);
    }
    assert_matches!(last2, Some(Message::Close(None)));
}

// ---------------------------------------------------------------------------
// REST roster view
// ---------------------------------------------------------------------------

/// `/online-users` requires auth and enriches roster entries from the
/// database, listing unknown emails with empty details.
#[sqlx::test(migrations = "../db/migrations")]
async fn online_users_enriches_roster(pool: PgPool) {
    let hr = common::seed_user(&pool, "hr@test.com", "hr").await;
    let token = common::auth_token(&hr, "hr");

    let presence = Arc::new(PresenceRegistry::new());
    let _rx1 = presence
        .add("conn-1".to_string(), Some("hr@test.com".to_string()))
        .await;
    let _rx2 = presence
        .add("conn-2".to_string(), Some("stranger@test.com".to_string()))
        .await;

    let app = common::build_test_app_with_presence(pool, presence);

    let response = get(app.clone(), "/api/v1/online-users").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/online-users", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let users = json.as_array().unwrap();
    assert_eq!(users.len(), 2);

    // Sorted by email: hr@test.com before stranger@test.com.
    assert_eq!(users[0]["email"], "hr@test.com");
    assert_eq!(users[0]["role"], "hr");
    assert_eq!(users[0]["first_name"], "Test");

    assert_eq!(users[1]["email"], "stranger@test.com");
    assert_eq!(users[1]["role"], "", "unknown accounts carry empty details");
}
