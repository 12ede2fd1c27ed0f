//! Persistence collaborators consumed by the order use cases.

use std::collections::HashMap;

use async_trait::async_trait;
use common::{OrderId, RetailerId};

use crate::error::Result;
use crate::order::{Order, OrderStatus};
use crate::query::{OrderFilters, Page, Pagination};

/// Storage for order aggregates.
///
/// Writes use the order's `version` as an optimistic concurrency token:
/// `update` must fail with [`DomainError::Conflict`](crate::DomainError::Conflict)
/// when the stored version differs from the one the order was loaded at, and
/// every successful write returns the order at `version + 1`.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists a new order. Duplicate ids or order numbers are conflicts.
    async fn create(&self, order: Order) -> Result<Order>;

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>>;

    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>>;

    async fn find_all(&self, filters: &OrderFilters, pagination: &Pagination)
    -> Result<Page<Order>>;

    async fn find_by_retailer_id(
        &self,
        retailer_id: RetailerId,
        pagination: &Pagination,
    ) -> Result<Page<Order>>;

    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Vec<Order>>;

    /// Replaces a stored order, checking its version first.
    async fn update(&self, order: Order) -> Result<Order>;

    async fn delete(&self, id: OrderId) -> Result<()>;

    async fn exists(&self, id: OrderId) -> Result<bool>;

    /// Counts orders per status, optionally for one retailer. Every status is present.
    async fn count_by_status(
        &self,
        retailer_id: Option<RetailerId>,
    ) -> Result<HashMap<OrderStatus, u64>>;
}

/// The slice of retailer storage the order core needs.
#[async_trait]
pub trait RetailerRepository: Send + Sync {
    async fn exists(&self, id: RetailerId) -> Result<bool>;
}
