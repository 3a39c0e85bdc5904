//! Root-level meta endpoints: status, version, readiness

use axum::{Json, Router, extract::State, routing::get};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    mongodb: bool,
}

/// Create the meta router (mounted at the root, not under /api)
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/version", get(version))
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Service status message
async fn status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": state.config.app.name,
    }))
}

/// Version and current server date
async fn version(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "version": state.config.app.version,
        "date": Utc::now().format("%Y-%m-%d").to_string(),
    }))
}

/// Readiness check - verifies MongoDB connection
async fn readiness_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mongodb_healthy = match state.store.database() {
        Ok(db) => database::mongodb::check_health(db.client()).await,
        Err(_) => false,
    };

    Json(HealthResponse {
        status: if mongodb_healthy {
            "ready"
        } else {
            "unhealthy"
        }
        .to_string(),
        mongodb: mongodb_healthy,
    })
}
