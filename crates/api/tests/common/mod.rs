#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use vibevote_api::auth::jwt::JwtConfig;
use vibevote_api::config::{AdminBootstrapConfig, ServerConfig};
use vibevote_api::middleware::voter::{DEVICE_ID_HEADER, VOTER_NAME_HEADER};
use vibevote_api::routes;
use vibevote_api::state::AppState;
use vibevote_core::appeal::AppealConfig;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "test-admin-password";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        appeal: AppealConfig::default(),
        movie_limit: 25,
        admin: AdminBootstrapConfig {
            username: ADMIN_USERNAME.to_string(),
            password: Some(ADMIN_PASSWORD.to_string()),
        },
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with the same middleware stack as
/// `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static(DEVICE_ID_HEADER),
            HeaderName::from_static(VOTER_NAME_HEADER),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// A voter as identified by the request headers.
#[derive(Clone, Copy)]
pub struct Voter<'a> {
    pub name: &'a str,
    pub device: &'a str,
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_as(app: Router, uri: &str, voter: Voter<'_>) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(DEVICE_ID_HEADER, voter.device)
        .header(VOTER_NAME_HEADER, voter.name)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_as(
    app: Router,
    uri: &str,
    voter: Voter<'_>,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(DEVICE_ID_HEADER, voter.device)
        .header(VOTER_NAME_HEADER, voter.name)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST with only the device header, as the onboarding flow does.
pub async fn post_json_device(
    app: Router,
    uri: &str,
    device: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(DEVICE_ID_HEADER, device)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn send_auth(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"));
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create the admin account and return a valid access token.
pub async fn admin_token(pool: &PgPool) -> String {
    let config = test_config();
    vibevote_api::bootstrap::ensure_admin_user(pool, &config.admin)
        .await
        .unwrap();
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/login",
        serde_json::json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Insert a movie directly and return its id.
pub async fn seed_movie(pool: &PgPool, title: &str) -> i64 {
    let input = vibevote_db::models::movie::CreateMovie {
        title: title.to_string(),
        ..Default::default()
    };
    vibevote_db::repositories::MovieRepo::create(pool, &input)
        .await
        .unwrap()
        .id
}

/// Cast a vote through the API and return the response.
pub async fn cast(
    pool: &PgPool,
    voter: Voter<'_>,
    movie_id: i64,
    judgment: serde_json::Value,
) -> Response {
    post_json_as(
        build_test_app(pool.clone()),
        "/api/v1/votes",
        voter,
        serde_json::json!({ "movie_id": movie_id, "judgment": judgment }),
    )
    .await
}
