use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{LoginRequest, SessionResponse};
use super::jwt::SessionKeys;
use super::password::verify_password;

pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/owner/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let ok = verify_password(&payload.passcode, &state.config.owner_passcode_hash)?;
    if !ok {
        warn!("owner login with wrong passcode");
        return Err(ApiError::Unauthorized("Incorrect passcode".into()));
    }

    let keys = SessionKeys::from_ref(&state);
    let (token, expires_at) = keys.sign()?;

    info!("owner session issued");
    Ok(Json(SessionResponse { token, expires_at }))
}
