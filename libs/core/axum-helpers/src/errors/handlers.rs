//! Fallback handlers producing the standard error envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::ErrorResponse;

/// Handler for 404 Not Found errors (unmatched routes).
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("The requested resource was not found")),
    )
        .into_response()
}
