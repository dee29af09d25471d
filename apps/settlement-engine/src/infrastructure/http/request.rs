//! HTTP request extraction.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::ServiceError;

/// JSON body extractor whose rejections use the service error body.
///
/// Axum's own `Json` rejects malformed bodies with plain text and mixed
/// status codes. Here client faults become `INVALID_REQUEST` / 400 and a
/// body that could not be read becomes `INTERNAL_ERROR` / 500.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

fn rejection_to_error(rejection: &JsonRejection) -> ServiceError {
    let status = rejection.status();
    let error = if status.is_server_error() {
        ServiceError::internal(rejection.body_text())
    } else {
        ServiceError::invalid_request(rejection.body_text())
    };
    error.with_context("status", status.as_str())
}
