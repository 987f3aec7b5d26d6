use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::database::Store;
use crate::handlers::{protected, public};
use crate::middleware::basic_auth_middleware;

/// Shared request context; the store is injected here and nowhere else
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: impl Store + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build the full router over `state`
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Protected API
        .merge(protected_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new().route("/api/things", get(public::things_get))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/things/:thing_id", get(protected::thing_get))
        .route("/api/things/:thing_id/reviews", get(protected::thing_reviews_get))
        .route("/api/reviews", post(protected::review_post))
        .route("/api/reviews/:review_id", get(protected::review_get))
        // route_layer so unknown paths still 404 instead of 401
        .route_layer(from_fn_with_state(state, basic_auth_middleware))
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Thingful API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "things": "/api/things (public)",
            "thing": "/api/things/:thing_id (protected)",
            "thing_reviews": "/api/things/:thing_id/reviews (protected)",
            "reviews": "/api/reviews (protected)",
            "review": "/api/reviews/:review_id (protected)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": now, "error": "database unavailable" })),
            )
        }
    }
}
