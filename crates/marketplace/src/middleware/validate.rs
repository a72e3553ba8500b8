use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use shared::errors::HttpError;
use tracing::warn;

/// JSON body whose every rejection, syntax or shape, is answered with a 400.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                warn!("⚠️ Rejected request body: {}", rejection.body_text());
                HttpError::BadRequest(rejection.body_text())
            })?;

        Ok(Self(value))
    }
}

/// Numeric `{id}` path segment; anything else is a 400.
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;

        raw.parse::<i32>().map(IdPath).map_err(|_| {
            warn!("⚠️ Rejected non-numeric id {raw:?}");
            HttpError::BadRequest(format!("invalid id: {raw}"))
        })
    }
}
