//! HTTP-level integration tests for the auth endpoints.
//!
//! Tests cover login, invitation-gated registration (including the
//! code-not-burned-on-failure guarantee), token refresh and rotation,
//! logout, password changes, and the /me profile endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, get_auth, login_token, post_json};
use sqlx::PgPool;

use riskmatrix_db::models::invitation_code::CreateInvitationCode;
use riskmatrix_db::repositories::InvitationCodeRepo;

/// Seed an unused invitation code directly in the database.
async fn seed_code(pool: &PgPool, code: &str, email: Option<&str>) {
    let (admin, _) = create_test_user(pool, &format!("admin-{code}@test.com"), "admin").await;
    let input = CreateInvitationCode {
        code: Some(code.to_string()),
        email: email.map(str::to_string),
        notes: None,
        expires_at: None,
    };
    InvitationCodeRepo::create(pool, &input, admin.id)
        .await
        .expect("code creation should succeed");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "login@test.com", "user").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "login@test.com", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["email"], "login@test.com");
    // The password hash must never leak into the response.
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    create_test_user(&pool, "wrongpw@test.com", "user").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "wrongpw@test.com", "password": "incorrect" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@test.com", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_with_valid_code(pool: PgPool) {
    seed_code(&pool, "GOODCODE", None).await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "email": "fresh@test.com",
        "password": "secret-pass",
        "full_name": "Fresh User",
        "invitation_code": "GOODCODE",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["email"], "fresh@test.com");
    assert_eq!(json["role"], "user");

    // The code is burned and attributed to the new user.
    let code = InvitationCodeRepo::find_by_code(&pool, "GOODCODE")
        .await
        .unwrap()
        .unwrap();
    assert!(code.used);
    assert_eq!(code.used_by, json["id"].as_i64());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_with_invalid_code(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "nobody@test.com",
        "password": "secret-pass",
        "full_name": "Nobody",
        "invitation_code": "NOPE",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid invitation code");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_used_code_rejected(pool: PgPool) {
    seed_code(&pool, "ONESHOT", None).await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "email": "first@test.com",
        "password": "secret-pass",
        "full_name": "First",
        "invitation_code": "ONESHOT",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "second@test.com",
        "password": "secret-pass",
        "full_name": "Second",
        "invitation_code": "ONESHOT",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A registration that fails at user creation must leave the code redeemable.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_failed_registration_does_not_burn_code(pool: PgPool) {
    create_test_user(&pool, "taken@test.com", "user").await;
    seed_code(&pool, "KEEPME", None).await;
    let app = common::build_test_app(pool.clone());

    // Duplicate email: user creation fails with 409.
    let body = serde_json::json!({
        "email": "taken@test.com",
        "password": "secret-pass",
        "full_name": "Imposter",
        "invitation_code": "KEEPME",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let code = InvitationCodeRepo::find_by_code(&pool, "KEEPME")
        .await
        .unwrap()
        .unwrap();
    assert!(!code.used, "code must survive a failed registration");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_email_reserved_code(pool: PgPool) {
    seed_code(&pool, "VIPONLY", Some("vip@test.com")).await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "email": "crasher@test.com",
        "password": "secret-pass",
        "full_name": "Crasher",
        "invitation_code": "VIPONLY",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The reserved email registers fine.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "vip@test.com",
        "password": "secret-pass",
        "full_name": "VIP",
        "invitation_code": "VIPONLY",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_short_password_rejected(pool: PgPool) {
    seed_code(&pool, "SHORTPW", None).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "short@test.com",
        "password": "abc",
        "full_name": "Short",
        "invitation_code": "SHORTPW",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Refresh / logout / me
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_refresh_rotates(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "refresh@test.com", "user").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "refresh@test.com", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    let login_json = body_json(response).await;
    let refresh_token = login_json["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_ne!(
        json["refresh_token"].as_str().unwrap(),
        refresh_token,
        "refresh token must rotate on use"
    );

    // The old token is dead after rotation.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_with_garbage_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": "not-a-real-token" });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_sessions(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "logout@test.com", "user").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "logout@test.com", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    let login_json = body_json(response).await;
    let access_token = login_json["access_token"].as_str().unwrap().to_string();
    let refresh_token = login_json["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = common::post_json_auth(
        app,
        "/api/v1/auth/logout",
        &access_token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The refresh token no longer works.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Change password
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_password(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "rotate@test.com", "user").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "rotate@test.com", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    let login_json = body_json(response).await;
    let access_token = login_json["access_token"].as_str().unwrap().to_string();
    let refresh_token = login_json["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "current_password": password,
        "new_password": "brand-new-pass",
    });
    let response =
        common::post_json_auth(app, "/api/v1/auth/change-password", &access_token, body).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The old password is dead.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "rotate@test.com", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The new password works.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "rotate@test.com", "password": "brand-new-pass" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Every pre-change session was revoked.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_password_wrong_current(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "wrongcur@test.com", "user").await;

    let app = common::build_test_app(pool.clone());
    let token = login_token(app, "wrongcur@test.com", &password).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "current_password": "not-my-password",
        "new_password": "brand-new-pass",
    });
    let response = common::post_json_auth(app, "/api/v1/auth/change-password", &token, body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The original password still works.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "wrongcur@test.com", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_password_short_new_rejected(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "shortnew@test.com", "user").await;

    let app = common::build_test_app(pool.clone());
    let token = login_token(app, "shortnew@test.com", &password).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "current_password": password,
        "new_password": "abc",
    });
    let response = common::post_json_auth(app, "/api/v1/auth/change-password", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_password_without_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "current_password": "whatever",
        "new_password": "brand-new-pass",
    });
    let response = post_json(app, "/api/v1/auth/change-password", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_returns_profile(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "me@test.com", "user").await;

    let app = common::build_test_app(pool.clone());
    let token = login_token(app, "me@test.com", &password).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], user.id);
    assert_eq!(json["email"], "me@test.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_without_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
