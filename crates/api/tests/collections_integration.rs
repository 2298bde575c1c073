//! Integration tests for the collection endpoints (users, payouts, help desk).
//!
//! Run with: cargo test --test collections_integration

mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use common::{get_request, json_request, memory_app, parse_response_body, seed, unconfigured_app};
use domain::models::{StoredDocument, User, UserStatus};
use domain::services::fallback;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::json;
use tower::ServiceExt;

fn fake_user(index: i64) -> User {
    let created = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap() + Duration::hours(index);
    User {
        id: format!("user_{:03}", index),
        name: Name().fake(),
        email: SafeEmail().fake(),
        gender: None,
        country: Some("US".to_string()),
        coins: index * 10,
        is_host: index % 2 == 0,
        status: UserStatus::Active,
        created_at: created,
        updated_at: created,
    }
}

async fn seeded_users(count: i64) -> (axum::Router, std::sync::Arc<persistence::store::InMemoryDocumentStore>) {
    let (app, store) = memory_app();
    for i in 0..count {
        let user = fake_user(i);
        seed(&store, User::COLLECTION, &user.id, &user).await;
    }
    (app, store)
}

fn ids(page: &serde_json::Value) -> Vec<String> {
    page["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_list_users_walks_all_pages() {
    let (app, _store) = seeded_users(5).await;

    let mut seen = Vec::new();
    let mut uri = "/api/v1/users?limit=2".to_string();
    loop {
        let response = app.clone().oneshot(get_request(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let page = parse_response_body(response).await;
        seen.extend(ids(&page));

        match page["nextCursor"].as_str() {
            Some(cursor) => uri = format!("/api/v1/users?limit=2&cursor={}", cursor),
            None => break,
        }
    }

    assert_eq!(
        seen,
        vec!["user_004", "user_003", "user_002", "user_001", "user_000"]
    );
}

#[tokio::test]
async fn test_list_rejects_out_of_range_limit() {
    let app = unconfigured_app();

    for limit in ["0", "101"] {
        let response = app
            .clone()
            .oneshot(get_request(&format!("/api/v1/users?limit={}", limit)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_list_rejects_cursor_from_other_collection() {
    let app = unconfigured_app();

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/payout-methods?limit=1"))
        .await
        .unwrap();
    let page = parse_response_body(response).await;
    let cursor = page["nextCursor"].as_str().unwrap().to_string();

    let response = app
        .oneshot(get_request(&format!("/api/v1/users?cursor={}", cursor)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("payoutMethods"));
}

#[tokio::test]
async fn test_list_transport_failure_is_empty_page() {
    let (app, store) = seeded_users(3).await;
    store.set_failing(true);

    let response = app.oneshot(get_request("/api/v1/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = parse_response_body(response).await;
    assert_eq!(page["items"], json!([]));
    assert!(page.get("nextCursor").is_none());
}

#[tokio::test]
async fn test_unconfigured_collections_serve_fallback() {
    let app = unconfigured_app();

    let cases = [
        ("/api/v1/users", fallback::users().len()),
        ("/api/v1/payout-requests", fallback::payout_requests().len()),
        ("/api/v1/payout-methods", fallback::payout_methods().len()),
        ("/api/v1/help-requests", fallback::help_requests().len()),
    ];
    for (uri, expected) in cases {
        let response = app.clone().oneshot(get_request(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let page = parse_response_body(response).await;
        assert_eq!(ids(&page).len(), expected, "{}", uri);
    }

    let response = app.oneshot(get_request("/api/v1/users")).await.unwrap();
    let page = parse_response_body(response).await;
    assert_eq!(ids(&page)[0], "user_5");
}

#[tokio::test]
async fn test_get_user_found_and_missing() {
    let (app, _store) = seeded_users(2).await;

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/users/user_001"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["id"], "user_001");
    assert_eq!(body["status"], "active");

    let response = app
        .oneshot(get_request("/api/v1/users/nobody"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(parse_response_body(response).await["error"], "not_found");
}

#[tokio::test]
async fn test_update_user_status_persists() {
    let (app, _store) = seeded_users(2).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/users/user_000/status",
            json!({"status": "blocked"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["status"], "blocked");

    let response = app
        .oneshot(get_request("/api/v1/users/user_000"))
        .await
        .unwrap();
    assert_eq!(parse_response_body(response).await["status"], "blocked");
}

#[tokio::test]
async fn test_update_help_request_status_uses_snake_case() {
    let app = unconfigured_app();

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/help-requests/help_3/status",
            json!({"status": "in_progress"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["id"], "help_3");
    assert_eq!(body["status"], "in_progress");
}

#[tokio::test]
async fn test_update_status_rejects_unknown_value() {
    let app = unconfigured_app();

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/payout-requests/payout_3/status",
            json!({"status": "teleported"}),
        ))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_update_status_unknown_id_is_not_found() {
    let (app, _store) = seeded_users(1).await;

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/users/nobody/status",
            json!({"status": "blocked"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
