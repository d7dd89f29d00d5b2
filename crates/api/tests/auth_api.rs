//! HTTP-level integration tests for the auth endpoints.
//!
//! Tests cover login (including the generic-401 behaviour for unknown,
//! wrong-password, and banned accounts), token verification, logout, and
//! the first-run owner bootstrap.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth, TEST_PASSWORD};
use hrsadmin_db::models::user::UpdateUser;
use hrsadmin_db::repositories::{RoleRepo, UserRepo};
use sqlx::PgPool;

/// Log in via the API and return the JSON response containing `token`
/// and `user` info.
async fn login_user(app: axum::Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns 200 with a token and safe user info, and flips
/// the online flag.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_success(pool: PgPool) {
    let user = common::seed_user(&pool, "hr@test.com", "hr").await;
    let app = common::build_test_app(pool.clone());

    let json = login_user(app, "hr@test.com", TEST_PASSWORD).await;

    assert!(json["token"].is_string(), "response must contain token");
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["email"], "hr@test.com");
    assert_eq!(json["user"]["role"], "hr");
    assert_eq!(json["user"]["is_online"], true);
    assert!(
        json["user"]["password_hash"].is_null(),
        "password hash must never be serialized"
    );

    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(stored.is_online, "login must set is_online");
    assert!(stored.last_seen_at.is_some(), "login must stamp last_seen_at");
}

/// Email matching is case-insensitive.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_email_is_case_insensitive(pool: PgPool) {
    common::seed_user(&pool, "mixed@test.com", "trainee").await;
    let app = common::build_test_app(pool);

    let json = login_user(app, "MIXED@Test.Com", TEST_PASSWORD).await;
    assert_eq!(json["user"]["email"], "mixed@test.com");
}

/// Missing email or password is a validation error, not a 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_missing_fields_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "someone@test.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(app, "/api/v1/auth/login", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Wrong password, unknown email, and a banned account all return the same
/// generic 401 body so the endpoint does not reveal which accounts exist.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_failures_are_indistinguishable(pool: PgPool) {
    let banned = common::seed_user(&pool, "banned@test.com", "trainee").await;
    common::seed_user(&pool, "known@test.com", "trainee").await;
    UserRepo::update(
        &pool,
        banned.id,
        &UpdateUser {
            is_banned: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);

    let wrong_pw = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "known@test.com", "password": "incorrect" }),
    )
    .await;
    let unknown = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "ghost@test.com", "password": TEST_PASSWORD }),
    )
    .await;
    let banned = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "banned@test.com", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(wrong_pw.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(banned.status(), StatusCode::UNAUTHORIZED);

    let body_a = body_json(wrong_pw).await;
    let body_b = body_json(unknown).await;
    let body_c = body_json(banned).await;
    assert_eq!(body_a, body_b, "failure bodies must be identical");
    assert_eq!(body_b, body_c, "failure bodies must be identical");
}

// ---------------------------------------------------------------------------
// Verify
// ---------------------------------------------------------------------------

/// A valid token resolves to the current profile.
#[sqlx::test(migrations = "../db/migrations")]
async fn verify_returns_current_profile(pool: PgPool) {
    let user = common::seed_user(&pool, "verify@test.com", "admin").await;
    let token = common::auth_token(&user, "admin");
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/auth/verify", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "admin");
}

/// A token held by a user banned after issuance stops working immediately.
#[sqlx::test(migrations = "../db/migrations")]
async fn verify_rejects_banned_account(pool: PgPool) {
    let user = common::seed_user(&pool, "revoked@test.com", "trainee").await;
    let token = common::auth_token(&user, "trainee");

    UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            is_banned: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/verify", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A token held by a deleted user stops working immediately.
#[sqlx::test(migrations = "../db/migrations")]
async fn verify_rejects_deleted_account(pool: PgPool) {
    let user = common::seed_user(&pool, "gone@test.com", "trainee").await;
    let token = common::auth_token(&user, "trainee");

    UserRepo::delete(&pool, user.id).await.unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/verify", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A role change applies on the next request, even for tokens issued
/// before the change: the gate reads the account's current role, not the
/// role baked into the token.
#[sqlx::test(migrations = "../db/migrations")]
async fn role_change_applies_to_existing_tokens(pool: PgPool) {
    let user = common::seed_user(&pool, "demoted@test.com", "admin").await;
    let token = common::auth_token(&user, "admin");
    let app = common::build_test_app(pool.clone());

    let response = get_auth(app.clone(), "/api/v1/analytics/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let trainee = RoleRepo::find_by_name(&pool, "trainee")
        .await
        .unwrap()
        .unwrap();
    UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            role_id: Some(trainee.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let response = get_auth(app, "/api/v1/analytics/dashboard", &token).await;
    assert_eq!(
        response.status(),
        StatusCode::FORBIDDEN,
        "a demoted account must not keep its old privileges"
    );
}

/// Garbage tokens and missing headers are rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn verify_rejects_bad_tokens(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/v1/auth/verify", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = common::get(app, "/api/v1/auth/verify").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

/// Logout clears the online flag; the stateless token keeps working.
#[sqlx::test(migrations = "../db/migrations")]
async fn logout_clears_online_flag(pool: PgPool) {
    let user = common::seed_user(&pool, "bye@test.com", "hr").await;
    let app = common::build_test_app(pool.clone());

    let json = login_user(app.clone(), "bye@test.com", TEST_PASSWORD).await;
    let token = json["token"].as_str().unwrap().to_string();

    let response =
        post_json_auth(app.clone(), "/api/v1/auth/logout", serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(!stored.is_online, "logout must clear is_online");

    // Stateless tokens are not revoked by logout.
    let response = get_auth(app, "/api/v1/auth/verify", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Setup-admin
// ---------------------------------------------------------------------------

/// First call creates the owner and returns a usable token.
#[sqlx::test(migrations = "../db/migrations")]
async fn setup_admin_creates_owner(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "boss@test.com",
        "password": "a-strong-password",
        "first_name": "Big",
        "last_name": "Boss",
    });
    let response = post_json(app.clone(), "/api/v1/auth/setup-admin", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["user"]["role"], "owner");
    let token = json["token"].as_str().unwrap();

    let response = get_auth(app, "/api/v1/auth/verify", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Once an owner exists the endpoint is inert.
#[sqlx::test(migrations = "../db/migrations")]
async fn setup_admin_rejected_when_owner_exists(pool: PgPool) {
    common::seed_user(&pool, "existing-owner@test.com", "owner").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "usurper@test.com",
        "password": "a-strong-password",
    });
    let response = post_json(app, "/api/v1/auth/setup-admin", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A weak password is rejected before any account is created.
#[sqlx::test(migrations = "../db/migrations")]
async fn setup_admin_rejects_weak_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "boss@test.com",
        "password": "short",
    });
    let response = post_json(app, "/api/v1/auth/setup-admin", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
