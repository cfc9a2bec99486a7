//! HTTP-level tests for admin login and token enforcement.

mod common;

use assert_matches::assert_matches;
use axum::http::{Method, StatusCode};
use common::{admin_token, body_json, get, get_auth, post_json, send_auth};
use serde_json::json;
use sqlx::PgPool;
use vibevote_api::bootstrap::ensure_admin_user;
use vibevote_api::config::AdminBootstrapConfig;
use vibevote_api::error::AppError;
use vibevote_core::error::CoreError;

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_token_and_account(pool: PgPool) {
    let token = admin_token(&pool).await;
    assert!(!token.is_empty());

    let response = get_auth(common::build_test_app(pool), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], common::ADMIN_USERNAME);
    assert!(json["data"]["last_login_at"].is_string());
    assert!(json["data"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_is_unauthorized(pool: PgPool) {
    admin_token(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/login",
        json!({ "username": common::ADMIN_USERNAME, "password": "not-the-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_need_a_valid_token(pool: PgPool) {
    let response = get(common::build_test_app(pool.clone()), "/api/v1/admin/votes").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/votes",
        "not-a-jwt",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send_auth(
        common::build_test_app(pool),
        Method::POST,
        "/api/v1/movies",
        "not-a-jwt",
        Some(json!({ "title": "Heat" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bootstrap_is_idempotent_and_optional(pool: PgPool) {
    let config = AdminBootstrapConfig {
        username: "owner".to_string(),
        password: Some("long-enough-password".to_string()),
    };
    assert!(ensure_admin_user(&pool, &config).await.unwrap());
    assert!(!ensure_admin_user(&pool, &config).await.unwrap());

    let unset = AdminBootstrapConfig {
        username: "nobody".to_string(),
        password: None,
    };
    assert!(!ensure_admin_user(&pool, &unset).await.unwrap());

    let weak = AdminBootstrapConfig {
        username: "weak".to_string(),
        password: Some("short".to_string()),
    };
    assert_matches!(
        ensure_admin_user(&pool, &weak).await,
        Err(AppError::Core(CoreError::Validation(_)))
    );
}
