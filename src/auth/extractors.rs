use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::jwt::SessionKeys;
use crate::error::ApiError;

/// Proof of a validated owner session. Add as a handler argument to guard a
/// route.
pub struct OwnerSession;

#[async_trait]
impl<S> FromRequestParts<S> for OwnerSession
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);

        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".into()))?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or_else(|| ApiError::Unauthorized("Invalid auth scheme".into()))?;

        if keys.verify(token).is_err() {
            warn!("invalid or expired owner session");
            return Err(ApiError::Unauthorized("Invalid or expired session".into()));
        }

        Ok(OwnerSession)
    }
}
