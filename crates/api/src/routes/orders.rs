//! Order endpoints, each a thin adapter over one use case.

use std::sync::Arc;

use application::{
    AddItemInput, CreateOrderInput, ListOrdersInput, OrderLookup, OrderService, UpdateStatusInput,
};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::OrderId;
use domain::{DomainError, OrderRepository, OrderResponse, PaginatedResponse, RetailerRepository};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<O, R> {
    pub service: OrderService<O, R>,
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// POST /orders: open a new order.
#[tracing::instrument(skip_all)]
pub async fn create<O, R>(
    State(state): State<Arc<AppState<O, R>>>,
    payload: Result<Json<CreateOrderInput>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError>
where
    O: OrderRepository + 'static,
    R: RetailerRepository + 'static,
{
    let Json(input) = payload?;
    let order = state.service.create_order.execute(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders: filtered, paginated listing.
#[tracing::instrument(skip_all)]
pub async fn list<O, R>(
    State(state): State<Arc<AppState<O, R>>>,
    query: Result<Query<ListOrdersInput>, QueryRejection>,
) -> ApiResult<PaginatedResponse<OrderResponse>>
where
    O: OrderRepository + 'static,
    R: RetailerRepository + 'static,
{
    let Query(input) = query?;
    Ok(Json(state.service.list_orders.execute(input).await?))
}

/// GET /orders/{id}
#[tracing::instrument(skip(state))]
pub async fn get<O, R>(
    State(state): State<Arc<AppState<O, R>>>,
    Path(id): Path<String>,
) -> ApiResult<OrderResponse>
where
    O: OrderRepository + 'static,
    R: RetailerRepository + 'static,
{
    let lookup = OrderLookup::Id(parse_order_id(&id)?);
    Ok(Json(state.service.get_order.execute(lookup).await?))
}

/// GET /orders/by-number/{order_number}
#[tracing::instrument(skip(state))]
pub async fn get_by_number<O, R>(
    State(state): State<Arc<AppState<O, R>>>,
    Path(order_number): Path<String>,
) -> ApiResult<OrderResponse>
where
    O: OrderRepository + 'static,
    R: RetailerRepository + 'static,
{
    let lookup = OrderLookup::OrderNumber(order_number);
    Ok(Json(state.service.get_order.execute(lookup).await?))
}

/// PATCH /orders/{id}/status
#[tracing::instrument(skip(state, payload))]
pub async fn update_status<O, R>(
    State(state): State<Arc<AppState<O, R>>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusInput>, JsonRejection>,
) -> ApiResult<OrderResponse>
where
    O: OrderRepository + 'static,
    R: RetailerRepository + 'static,
{
    let id = parse_order_id(&id)?;
    let Json(input) = payload?;
    Ok(Json(state.service.update_order_status.execute(id, input).await?))
}

/// POST /orders/{id}/items
#[tracing::instrument(skip(state, payload))]
pub async fn add_item<O, R>(
    State(state): State<Arc<AppState<O, R>>>,
    Path(id): Path<String>,
    payload: Result<Json<AddItemInput>, JsonRejection>,
) -> ApiResult<OrderResponse>
where
    O: OrderRepository + 'static,
    R: RetailerRepository + 'static,
{
    let id = parse_order_id(&id)?;
    let Json(input) = payload?;
    Ok(Json(state.service.add_order_item.execute(id, input).await?))
}

/// DELETE /orders/{id}/items/{product_id}
#[tracing::instrument(skip(state))]
pub async fn remove_item<O, R>(
    State(state): State<Arc<AppState<O, R>>>,
    Path((id, product_id)): Path<(String, String)>,
) -> ApiResult<OrderResponse>
where
    O: OrderRepository + 'static,
    R: RetailerRepository + 'static,
{
    let id = parse_order_id(&id)?;
    Ok(Json(
        state
            .service
            .remove_order_item
            .execute(id, &product_id)
            .await?,
    ))
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    id.parse::<OrderId>().map_err(|e| {
        ApiError::from(DomainError::validation(
            "id",
            format!("'{id}' is not a valid order id: {e}"),
        ))
    })
}
