//! HTTP-level tests for catalog management and admin maintenance.

mod common;

use axum::http::{Method, StatusCode};
use common::{admin_token, body_json, cast, get, get_auth, seed_movie, send_auth, Voter};
use serde_json::json;
use sqlx::PgPool;
use vibevote_db::repositories::{MovieRepo, VoteRepo};

fn seen_4() -> serde_json::Value {
    json!({ "kind": "seen", "rating": 4 })
}

fn voter(name: &'static str, device: &'static str) -> Voter<'static> {
    Voter { name, device }
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_manages_catalog(pool: PgPool) {
    let token = admin_token(&pool).await;

    let response = send_auth(
        common::build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/movies",
        &token,
        Some(json!({ "title": "  Arrival ", "year": 2016, "tmdb_id": 329865 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let movie = body_json(response).await["data"].clone();
    assert_eq!(movie["title"], "Arrival");
    let id = movie["id"].as_i64().unwrap();

    // Same catalog id again.
    let response = send_auth(
        common::build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/movies",
        &token,
        Some(json!({ "title": "Arrival (again)", "tmdb_id": 329865 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let response = send_auth(
        common::build_test_app(pool.clone()),
        Method::PUT,
        &format!("/api/v1/movies/{id}"),
        &token,
        Some(json!({ "overview": "Linguist meets heptapods." })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["title"], "Arrival");
    assert_eq!(updated["overview"], "Linguist meets heptapods.");

    let response = get(common::build_test_app(pool.clone()), "/api/v1/movies").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = send_auth(
        common::build_test_app(pool.clone()),
        Method::DELETE,
        &format!("/api/v1/movies/{id}"),
        &token,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/movies/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_movie_title_is_rejected(pool: PgPool) {
    let token = admin_token(&pool).await;
    let response = send_auth(
        common::build_test_app(pool),
        Method::POST,
        "/api/v1/movies",
        &token,
        Some(json!({ "title": "   " })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn movie_list_honours_limit(pool: PgPool) {
    for title in ["A", "B", "C"] {
        seed_movie(&pool, title).await;
    }
    let response = get(
        common::build_test_app(pool),
        "/api/v1/movies?limit=2&offset=1",
    )
    .await;
    let data = body_json(response).await["data"].clone();
    let titles: Vec<&str> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["B", "C"]);
}

// ---------------------------------------------------------------------------
// Votes and voters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_sees_votes_and_voters(pool: PgPool) {
    let token = admin_token(&pool).await;
    let heat = seed_movie(&pool, "Heat").await;
    let alien = seed_movie(&pool, "Alien").await;

    cast(&pool, voter("Sam", "phone"), heat, seen_4()).await;
    cast(&pool, voter("Sam", "phone"), alien, json!({ "kind": "interested", "level": 2 })).await;
    cast(&pool, voter("Sam", "laptop"), heat, seen_4()).await;

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/admin/votes", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 3);

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/admin/voters", &token).await;
    let voters = body_json(response).await["data"].clone();
    let voters = voters.as_array().unwrap();
    // Same name on two devices is two voters.
    assert_eq!(voters.len(), 2);
    let phone = voters
        .iter()
        .find(|v| v["device_id"] == "phone")
        .unwrap();
    assert_eq!(phone["vote_count"], 2);
    assert_eq!(phone["seen_count"], 1);
    assert_eq!(phone["not_seen_count"], 1);
    assert!((phone["average_vibe"].as_f64().unwrap() - 3.0).abs() < 1e-9);

    let uri = format!("/api/v1/admin/movies/{heat}/votes");
    let response = get_auth(common::build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/admin/movies/999999/votes",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_all_votes_keeps_movies(pool: PgPool) {
    let token = admin_token(&pool).await;
    let heat = seed_movie(&pool, "Heat").await;
    cast(&pool, voter("A", "d1"), heat, seen_4()).await;
    cast(&pool, voter("B", "d2"), heat, seen_4()).await;

    let response = send_auth(
        common::build_test_app(pool.clone()),
        Method::DELETE,
        "/api/v1/admin/votes",
        &token,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["deleted"], 2);

    assert_eq!(VoteRepo::count(&pool).await.unwrap(), 0);
    assert_eq!(MovieRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_deletes_one_voter(pool: PgPool) {
    let token = admin_token(&pool).await;
    let heat = seed_movie(&pool, "Heat").await;
    cast(&pool, voter("Sam", "phone"), heat, seen_4()).await;
    cast(&pool, voter("Sam", "laptop"), heat, seen_4()).await;

    let response = send_auth(
        common::build_test_app(pool.clone()),
        Method::DELETE,
        "/api/v1/admin/voters?user_name=Sam&device_id=phone",
        &token,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["votes"], 1);
    assert_eq!(data["device_names"], 1);

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/admin/voters", &token).await;
    let voters = body_json(response).await["data"].clone();
    assert_eq!(voters.as_array().unwrap().len(), 1);
    assert_eq!(voters[0]["device_id"], "laptop");

    let response = send_auth(
        common::build_test_app(pool.clone()),
        Method::DELETE,
        "/api/v1/admin/voters?user_name=%20&device_id=phone",
        &token,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = send_auth(
        common::build_test_app(pool),
        Method::DELETE,
        "/api/v1/admin/voters?user_name=Sam&device_id=laptop",
        "not-a-jwt",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Appeal
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn recompute_returns_fresh_snapshot(pool: PgPool) {
    let token = admin_token(&pool).await;
    let heat = seed_movie(&pool, "Heat").await;
    for (name, device) in [("A", "d1"), ("B", "d2"), ("C", "d3")] {
        cast(&pool, voter(name, device), heat, seen_4()).await;
    }

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/admin/appeal", &token).await;
    assert_eq!(body_json(response).await["data"], json!([]));

    let response = send_auth(
        common::build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/admin/appeal/recompute",
        &token,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let appeals = body_json(response).await["data"].clone();
    assert_eq!(appeals.as_array().unwrap().len(), 1);
    assert_eq!(appeals[0]["movie_id"], heat);
    assert!(appeals[0]["appeal_score"].as_f64().unwrap() > 0.0);

    let response = get_auth(common::build_test_app(pool), "/api/v1/admin/appeal", &token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Duplicates and reset
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_cleanup_merges_votes(pool: PgPool) {
    let token = admin_token(&pool).await;
    let a = seed_movie(&pool, "The Thing").await;
    let b = seed_movie(&pool, "the thing").await;
    let c = seed_movie(&pool, "THE  THING ").await;

    for i in 0..5 {
        let name = format!("a{i}");
        cast(&pool, Voter { name: &name, device: "d" }, a, seen_4()).await;
    }
    for i in 0..2 {
        let name = format!("b{i}");
        cast(&pool, Voter { name: &name, device: "d" }, b, seen_4()).await;
    }

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/admin/duplicates", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let groups = body_json(response).await["data"].clone();
    assert_eq!(groups.as_array().unwrap().len(), 1);
    assert_eq!(groups[0]["canonical_id"], a);
    assert_eq!(groups[0]["duplicate_ids"], json!([b, c]));
    assert_eq!(groups[0]["total_votes"], 7);

    let response = send_auth(
        common::build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/admin/duplicates/cleanup",
        &token,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await["data"].clone();
    assert_eq!(summary["groups_merged"], 1);
    assert_eq!(summary["movies_removed"], 2);
    assert_eq!(summary["votes_moved"], 2);
    assert_eq!(summary["votes_dropped"], 0);

    assert_eq!(MovieRepo::count(&pool).await.unwrap(), 1);
    assert_eq!(VoteRepo::list_for_movie(&pool, a).await.unwrap().len(), 7);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reset_clears_everything_but_admins(pool: PgPool) {
    let token = admin_token(&pool).await;
    let heat = seed_movie(&pool, "Heat").await;
    cast(&pool, voter("Sam", "phone"), heat, seen_4()).await;

    let response = send_auth(
        common::build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/admin/reset",
        &token,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await["data"].clone();
    assert_eq!(summary["votes"], 1);
    assert_eq!(summary["movies"], 1);
    assert_eq!(summary["device_names"], 1);

    assert_eq!(MovieRepo::count(&pool).await.unwrap(), 0);

    // The token still works after a reset.
    let response = get_auth(common::build_test_app(pool), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
