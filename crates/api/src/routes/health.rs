//! Health check endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::app::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: StoreHealth,
}

/// Document store status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StoreHealth {
    /// `configured` or `unconfigured`.
    pub connection: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    pub reachable: bool,
    pub latency_ms: Option<u64>,
}

/// Simple status response for liveness/readiness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

async fn store_health(state: &AppState) -> StoreHealth {
    let Some(store) = state.connection.store() else {
        return StoreHealth {
            connection: state.connection.as_str().to_string(),
            backend: None,
            reachable: false,
            latency_ms: None,
        };
    };

    let start = std::time::Instant::now();
    let reachable = store.ping().await.is_ok();
    let latency_ms = start.elapsed().as_millis() as u64;

    StoreHealth {
        connection: state.connection.as_str().to_string(),
        backend: Some(store.backend().to_string()),
        reachable,
        latency_ms: reachable.then_some(latency_ms),
    }
}

/// Full health check endpoint.
///
/// An unconfigured store is `degraded`, not unhealthy: the dashboard still
/// works on fallback data. A configured store that stops answering is unhealthy.
pub async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let store = store_health(&state).await;

    let (status_code, status) = match (state.connection.is_configured(), store.reachable) {
        (true, true) => (StatusCode::OK, "healthy"),
        (false, _) => (StatusCode::OK, "degraded"),
        (true, false) => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy"),
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store,
        }),
    )
}

/// Liveness probe endpoint.
///
/// Returns 200 OK if the process is running.
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}

/// Readiness probe endpoint.
///
/// Ready when serving fallback data or when the configured store answers.
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, StatusCode> {
    let ready = match state.connection.store() {
        Some(store) => store.ping().await.is_ok(),
        None => true,
    };

    if ready {
        Ok(Json(StatusResponse {
            status: "ready".to_string(),
        }))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}
