//! Request extractors that reject with [`ApiError`] bodies.

use crate::error::ApiError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Json, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

/// JSON body extractor with validation.
///
/// Malformed JSON, a wrong content type, and rule violations all reject
/// with `400`; rule violations carry per-field details.
///
/// ```ignore
/// async fn create_task(ValidatedJson(body): ValidatedJson<TaskCreate>) -> ... { ... }
/// ```
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        data.validate()?;

        Ok(ValidatedJson(data))
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

/// Task ID path parameter.
///
/// Anything that isn't a UUID rejects with `400 Invalid task ID format`.
pub struct TaskIdPath(pub Uuid);

#[axum::async_trait]
impl<S> FromRequestParts<S> for TaskIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let invalid = || ApiError::BadRequest("Invalid task ID format".to_string());

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;

        Uuid::parse_str(&raw).map(TaskIdPath).map_err(|_| invalid())
    }
}
