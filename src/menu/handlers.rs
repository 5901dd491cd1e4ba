use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::OwnerSession;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{CreateMenuItemRequest, DeleteResponse, UpdateMenuItemRequest};
use super::repo_types::MenuItem;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/menu", get(list_menu))
}

/// Catalog mutations require an owner session.
pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/menu", post(create_menu_item))
        .route("/menu/:id", put(update_menu_item).delete(delete_menu_item))
}

#[instrument(skip(state))]
pub async fn list_menu(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>, ApiError> {
    let items = MenuItem::list(&state.db).await?;
    Ok(Json(items))
}

#[instrument(skip(state, _session, payload))]
pub async fn create_menu_item(
    State(state): State<AppState>,
    _session: OwnerSession,
    Json(payload): Json<CreateMenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItem>), ApiError> {
    payload.validate()?;
    let item = MenuItem::create(&state.db, &payload).await?;
    info!(item_id = %item.id, name = %item.name, "menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state, _session, payload))]
pub async fn update_menu_item(
    State(state): State<AppState>,
    _session: OwnerSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMenuItemRequest>,
) -> Result<Json<MenuItem>, ApiError> {
    payload.validate()?;
    let item = MenuItem::update(&state.db, id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Menu item"))?;
    info!(item_id = %item.id, "menu item updated");
    Ok(Json(item))
}

#[instrument(skip(state, _session))]
pub async fn delete_menu_item(
    State(state): State<AppState>,
    _session: OwnerSession,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !MenuItem::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Menu item"));
    }
    info!(item_id = %id, "menu item deleted");
    Ok(Json(DeleteResponse {
        message: "Menu item deleted".into(),
    }))
}
