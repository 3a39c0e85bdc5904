use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::mongodb::StoreError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database not ready")]
    NotReady,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            ItemError::Validation(msg) => AppError::BadRequest(msg),
            ItemError::NotReady => AppError::ServiceUnavailable("Database not ready".to_string()),
            ItemError::Database(msg) => AppError::InternalServerError(msg),
            ItemError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ItemError {
    fn from(err: mongodb::error::Error) -> Self {
        ItemError::Database(err.to_string())
    }
}

impl From<StoreError> for ItemError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotReady => ItemError::NotReady,
        }
    }
}

impl From<field_selector::FieldSelectionError> for ItemError {
    fn from(err: field_selector::FieldSelectionError) -> Self {
        ItemError::Internal(err.to_string())
    }
}
