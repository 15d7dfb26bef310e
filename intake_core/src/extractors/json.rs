//! JSON body extractor whose rejections match the API error shape

use crate::error::AppError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// Like `axum::Json`, but a body that cannot be decoded is rejected with a
/// 400 `{ "error": ... }` response.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "rejected request body");
                Err(AppError::BadRequest(rejection_message(&rejection).to_string()))
            }
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::JsonDataError(_) => "Request body fields have the wrong type",
        JsonRejection::JsonSyntaxError(_) => "Invalid JSON format",
        JsonRejection::MissingJsonContentType(_) => {
            "Expected request with `Content-Type: application/json`"
        }
        JsonRejection::BytesRejection(_) => "Failed to read request body",
        _ => "Failed to parse JSON request",
    }
}
