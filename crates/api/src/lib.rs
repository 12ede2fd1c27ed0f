//! HTTP transport for the delivery order service.
//!
//! Routes requests onto the order use cases, maps domain error kinds to HTTP
//! status codes, and exposes health and Prometheus metrics endpoints.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use application::OrderService;
use axum::Router;
use axum::routing::{delete, get, patch, post};
use common::RetailerId;
use domain::{OrderRepository, RetailerRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::{InMemoryOrderRepository, InMemoryRetailerRepository};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::{self, AppState};

/// State backed by the in-memory repositories.
pub type InMemoryState = AppState<InMemoryOrderRepository, InMemoryRetailerRepository>;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<O, R>(state: Arc<AppState<O, R>>, metrics_handle: PrometheusHandle) -> Router
where
    O: OrderRepository + 'static,
    R: RetailerRepository + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/orders",
            post(orders::create::<O, R>).get(orders::list::<O, R>),
        )
        .route("/orders/{id}", get(orders::get::<O, R>))
        .route(
            "/orders/by-number/{order_number}",
            get(orders::get_by_number::<O, R>),
        )
        .route("/orders/{id}/status", patch(orders::update_status::<O, R>))
        .route("/orders/{id}/items", post(orders::add_item::<O, R>))
        .route(
            "/orders/{id}/items/{product_id}",
            delete(orders::remove_item::<O, R>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates state over fresh in-memory repositories, registering the given retailers.
///
/// The repositories are returned alongside the state so callers can inspect
/// or seed them directly.
pub fn create_default_state(
    retailer_ids: &[RetailerId],
) -> (
    Arc<InMemoryState>,
    InMemoryOrderRepository,
    InMemoryRetailerRepository,
) {
    let orders = InMemoryOrderRepository::new();
    let retailers = InMemoryRetailerRepository::with_retailers(retailer_ids.iter().copied());
    let state = Arc::new(AppState {
        service: OrderService::new(orders.clone(), retailers.clone()),
    });
    (state, orders, retailers)
}
