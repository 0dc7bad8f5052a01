//! /v2/store handlers for inventory and orders.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use crate::api;
use crate::error::ApiError;
use crate::models::Order;
use crate::services::store::StoreError;
use crate::AppState;

/// GET /v2/store/inventory - pet counts keyed by status
pub async fn inventory(State(state): State<AppState>) -> Result<Response, ApiError> {
    let counts = state.store.inventory().await?;
    api::entity(&counts)
}

/// POST /v2/store/order - place an order for a pet
pub async fn place_order(
    State(state): State<AppState>,
    payload: Result<Json<Order>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(order) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let placed = state.store.place_order(order).await?;
    api::entity(&placed)
}

/// GET /v2/store/order/{orderId} - single order by id
pub async fn get_order_by_id(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let order = state.store.get_order_by_id(id).await?;
    api::entity(&order)
}

/// DELETE /v2/store/order/{orderId} - soft delete. Unknown ids answer 400
/// here, unlike the GET route.
pub async fn delete_order(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;

    state.store.delete_order(id).await.map_err(|e| match e {
        StoreError::NotFound => ApiError::bad_request(e.to_string()),
        other => other.into(),
    })?;

    Ok(api::success(id.to_string()))
}
