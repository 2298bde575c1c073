//! Common test utilities for integration tests.
//!
//! Tests drive the router in-process with `tower::ServiceExt::oneshot`, backed
//! either by no store at all or by the in-memory document store.

// Not every integration test binary uses every helper.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use std::sync::Arc;

use persistence::store::{to_fields, DocumentStore, InMemoryDocumentStore};
use persistence::ConnectionState;
use streamdash_api::{app::create_app, config::Config};

/// Test configuration: no database, pretty logs, canonical settings key.
pub fn test_config() -> Config {
    Config::load_for_test(&[]).expect("Failed to load test config")
}

/// App served entirely from fallback data.
pub fn unconfigured_app() -> Router {
    create_app(test_config(), ConnectionState::Unconfigured)
}

/// App backed by a fresh in-memory store, returned alongside the store.
pub fn memory_app() -> (Router, Arc<InMemoryDocumentStore>) {
    memory_app_with(test_config())
}

pub fn memory_app_with(config: Config) -> (Router, Arc<InMemoryDocumentStore>) {
    let store = Arc::new(InMemoryDocumentStore::new());
    let app = create_app(config, ConnectionState::configured(store.clone()));
    (app, store)
}

/// Writes `value` straight into the store, bypassing the API.
pub async fn seed<T: serde::Serialize>(
    store: &InMemoryDocumentStore,
    collection: &str,
    key: &str,
    value: &T,
) {
    store
        .set(collection, key, to_fields(value).expect("Failed to encode seed"))
        .await
        .expect("Failed to seed document");
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn parse_response_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}
