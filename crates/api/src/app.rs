use axum::{extract::FromRef, middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::models::{HelpRequest, PayoutMethod, PayoutRequest, User};
use persistence::repositories::{CollectionRepository, SettingsRepository};
use persistence::ConnectionState;

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, security_headers_middleware, trace_id};
use crate::routes::{collections, health, settings};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub connection: ConnectionState,
    pub settings: SettingsRepository,
    pub users: CollectionRepository<User>,
    pub payout_requests: CollectionRepository<PayoutRequest>,
    pub payout_methods: CollectionRepository<PayoutMethod>,
    pub help_requests: CollectionRepository<HelpRequest>,
}

impl AppState {
    /// Builds every repository over the one shared connection.
    pub fn new(config: Arc<Config>, connection: ConnectionState) -> Self {
        Self {
            settings: SettingsRepository::new(
                connection.clone(),
                config.settings.document_key.clone(),
            ),
            users: CollectionRepository::new(connection.clone()),
            payout_requests: CollectionRepository::new(connection.clone()),
            payout_methods: CollectionRepository::new(connection.clone()),
            help_requests: CollectionRepository::new(connection.clone()),
            connection,
            config,
        }
    }
}

macro_rules! repository_from_state {
    ($($field:ident: $model:ty),* $(,)?) => {
        $(
            impl FromRef<AppState> for CollectionRepository<$model> {
                fn from_ref(state: &AppState) -> Self {
                    state.$field.clone()
                }
            }
        )*
    };
}

repository_from_state!(
    users: User,
    payout_requests: PayoutRequest,
    payout_methods: PayoutMethod,
    help_requests: HelpRequest,
);

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn create_app(config: Config, connection: ConnectionState) -> Router {
    let config = Arc::new(config);
    let state = AppState::new(config.clone(), connection);

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    let api_routes = Router::new()
        .nest("/api/v1/settings", settings::router())
        .nest("/api/v1/users", collections::router::<User>())
        .nest("/api/v1/payout-requests", collections::router::<PayoutRequest>())
        .nest("/api/v1/payout-methods", collections::router::<PayoutMethod>())
        .nest("/api/v1/help-requests", collections::router::<HelpRequest>());

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config))
        .with_state(state)
}
