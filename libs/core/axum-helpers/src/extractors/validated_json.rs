//! JSON extractor with automatic validation using the validator crate.

use crate::errors::ErrorResponse;
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Deserializes the request body and validates it with the `validator`
/// crate's `Validate` trait. Any body problem — unparseable JSON, a missing
/// required field, a type mismatch, or a failed validation rule — is
/// rejected with 400 and the standard error envelope.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateProduct {
///     #[validate(length(min = 1))]
///     name: String,
///     price: f64,
/// }
///
/// async fn create_product(ValidatedJson(payload): ValidatedJson<CreateProduct>) -> String {
///     format!("Creating product: {}", payload.name)
/// }
///
/// let app = Router::new().route("/products", post(create_product));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::info!("Request body rejected: {}", e.body_text());
            (
                StatusCode::BAD_REQUEST,
                axum::Json(ErrorResponse::new(e.body_text())),
            )
                .into_response()
        })?;

        data.validate().map_err(|e| {
            let message = e
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let reasons: Vec<String> = errors
                        .iter()
                        .map(|err| {
                            err.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| err.code.to_string())
                        })
                        .collect();
                    format!("{}: {}", field, reasons.join(", "))
                })
                .collect::<Vec<_>>()
                .join("; ");

            tracing::info!("Request validation failed: {}", message);
            (
                StatusCode::BAD_REQUEST,
                axum::Json(ErrorResponse::new(message)),
            )
                .into_response()
        })?;

        Ok(ValidatedJson(data))
    }
}
