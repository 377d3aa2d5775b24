//! JSON body extractor answering in the API envelope

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use shared::error::AppError;

/// `Json<T>` whose rejection is an [`AppError`] with `InvalidRequest`
///
/// Malformed bodies, wrong content types and missing fields all come back
/// as `{ "success": false, "error": { "code": 5, ... } }`.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(status = %rejection.status(), "Rejected request body");
                Err(AppError::invalid_request(rejection.body_text()))
            }
        }
    }
}
