use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/admin/reset", post(reset))
}

/// Irreversible wipe of the whole ledger and catalog, including the daily token
/// counters. Gated by an out-of-band shared secret header, not a personal
/// credential.
#[instrument(skip(state, headers))]
pub async fn reset(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ResetResponse>, ApiError> {
    let provided = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if provided != state.config.admin_reset_token {
        warn!("reset attempt with missing or wrong admin token");
        return Err(ApiError::Unauthorized("Invalid admin token".into()));
    }

    let mut tx = state.db.begin().await?;
    sqlx::query("DELETE FROM orders").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM menu_items")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM daily_tokens")
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    info!("database reset");
    Ok(Json(ResetResponse {
        success: true,
        message: "Database reset successfully".into(),
    }))
}
