use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::billing;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{
    CreateOrderRequest, CustomerStats, CustomerStatsQuery, ListOrdersQuery, ReceiptResponse,
    UpdateOrderRequest, UpdateOrderResponse,
};
use super::lifecycle;
use super::repo::{OrderListFilter, StatusFilter};
use super::repo_types::{Order, OrderStatus};
use super::token;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/receipt", get(get_receipt))
        .route("/customer-stats", get(customer_stats))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/:id", put(update_order))
}

#[instrument(skip(state))]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(q): Query<ListOrdersQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let status = match q.status.as_deref() {
        None | Some("") => None,
        Some("active") => Some(StatusFilter::Active),
        Some(other) => Some(StatusFilter::Exact(OrderStatus::parse(other).ok_or_else(
            || ApiError::Validation(format!("unknown status filter '{other}'")),
        )?)),
    };

    let since = match q.date.as_deref() {
        Some("today") => Some(token::start_of_day(
            OffsetDateTime::now_utc(),
            state.config.tz_offset,
        )),
        _ => None,
    };

    let filter = OrderListFilter {
        status,
        since,
        limit: q.limit.clamp(1, 1000),
    };

    let orders = Order::list(&state.db, filter).await?;
    Ok(Json(orders))
}

#[instrument(skip(state, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    payload.validate()?;

    // Blank contact fields from the POS form mean "not given".
    let customer_name = payload.customer_name.filter(|s| !s.trim().is_empty());
    let customer_phone = payload.customer_phone.filter(|s| !s.trim().is_empty());

    let order = Order::create(
        &state.db,
        state.config.tz_offset,
        payload.items,
        payload.total_amount,
        customer_name,
        customer_phone,
    )
    .await?;

    info!(order_id = %order.id, token = order.token_number, "order placed");
    Ok((StatusCode::CREATED, Json(order)))
}

#[instrument(skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    let order = Order::get(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Order"))?;
    Ok(Json(order))
}

#[instrument(skip(state, payload))]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<UpdateOrderResponse>, ApiError> {
    let current = Order::get(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Order"))?;

    if !lifecycle::transition_allowed(current.status, payload.status) {
        return Err(ApiError::Validation(format!(
            "illegal status transition {} -> {}",
            current.status.as_str(),
            payload.status.as_str()
        )));
    }

    let order = Order::set_status(&state.db, id, payload.status)
        .await?
        .ok_or(ApiError::NotFound("Order"))?;

    // Customers are notified when the kitchen finishes an order, not when an
    // operator undoes a completion back to ready.
    let mut notified = false;
    if payload.status == OrderStatus::Ready
        && matches!(current.status, OrderStatus::Pending | OrderStatus::Cooking)
    {
        if let Some(n) = lifecycle::ready_notification(&order) {
            match state.notifier.send(&n.phone, &n.message).await {
                Ok(()) => notified = true,
                Err(e) => {
                    // The transition already happened; a lost notification is
                    // not worth failing the request over.
                    warn!(error = %e, order_id = %order.id, "ready notification failed");
                }
            }
        }
    }

    info!(order_id = %order.id, from = current.status.as_str(), to = order.status.as_str(), notified, "order transitioned");
    Ok(Json(UpdateOrderResponse { order, notified }))
}

#[instrument(skip(state))]
pub async fn get_receipt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReceiptResponse>, ApiError> {
    let order = Order::get(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Order"))?;

    let (subtotal, cgst, sgst) = billing::receipt_totals(&order.items);
    Ok(Json(ReceiptResponse {
        order_id: order.id,
        token_number: order.token_number,
        created_at: order.created_at,
        customer_name: order.customer_name,
        items: order.items.0,
        subtotal,
        cgst,
        sgst,
        // The stored total is authoritative; receipts never recompute it.
        grand_total: order.total_amount,
    }))
}

#[instrument(skip(state))]
pub async fn customer_stats(
    State(state): State<AppState>,
    Query(q): Query<CustomerStatsQuery>,
) -> Result<Json<CustomerStats>, ApiError> {
    let visits = match q.phone.as_deref().filter(|p| !p.is_empty()) {
        Some(phone) => Order::count_by_phone(&state.db, phone).await?,
        None => 0,
    };
    Ok(Json(CustomerStats { visits }))
}
