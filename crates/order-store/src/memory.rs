use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{OrderId, OrderItemId, RetailerId};
use domain::{
    DomainError, Order, OrderFilters, OrderRecord, OrderRepository, OrderStatus, Page, Pagination,
    Result, SortField, SortOrder,
};
use tokio::sync::RwLock;

/// In-memory order repository.
///
/// Stores orders in their record form and provides the same contract a
/// database-backed repository would, including version checks on update.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, OrderRecord>>>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

/// Gives unsaved items an id and ties every item to its order.
fn assign_item_ids(record: &mut OrderRecord) {
    let order_id = record.id;
    for item in &mut record.items {
        item.id.get_or_insert_with(OrderItemId::new);
        item.order_id = Some(order_id);
    }
}

fn matches(record: &OrderRecord, filters: &OrderFilters) -> bool {
    if let Some(retailer_id) = filters.retailer_id
        && record.retailer_id != retailer_id
    {
        return false;
    }
    if let Some(ref customer_id) = filters.customer_id
        && &record.customer_id != customer_id
    {
        return false;
    }
    if let Some(status) = filters.status
        && record.status != status
    {
        return false;
    }
    if let Some(ref fragment) = filters.order_number
        && !record
            .order_number
            .to_lowercase()
            .contains(&fragment.to_lowercase())
    {
        return false;
    }
    if let Some(from) = filters.created_from
        && record.created_at < from
    {
        return false;
    }
    if let Some(to) = filters.created_to
        && record.created_at > to
    {
        return false;
    }
    true
}

fn compare(a: &OrderRecord, b: &OrderRecord, pagination: &Pagination) -> Ordering {
    let ordering = match pagination.sort_by() {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::OrderNumber => a.order_number.cmp(&b.order_number),
        SortField::Status => a.status.cmp(&b.status),
        SortField::CustomerName => a.customer_name.cmp(&b.customer_name),
    }
    .then_with(|| a.order_number.cmp(&b.order_number));

    match pagination.sort_order() {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn paginate(mut records: Vec<OrderRecord>, pagination: &Pagination) -> Page<Order> {
    records.sort_by(|a, b| compare(a, b, pagination));
    let total = records.len() as u64;
    let items = records
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.limit() as usize)
        .map(Order::reconstitute)
        .collect();
    Page::new(items, total, pagination)
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: Order) -> Result<Order> {
        let mut record = order.to_record();
        let mut store = self.orders.write().await;

        if store.contains_key(&record.id) {
            return Err(DomainError::Conflict(format!(
                "order {} already exists",
                record.id
            )));
        }
        if store
            .values()
            .any(|existing| existing.order_number == record.order_number)
        {
            return Err(DomainError::Conflict(format!(
                "order number {} is already taken",
                record.order_number
            )));
        }

        assign_item_ids(&mut record);
        record.version += 1;
        store.insert(record.id, record.clone());

        tracing::debug!(order_id = %record.id, order_number = %record.order_number, "order stored");
        Ok(Order::reconstitute(record))
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        let store = self.orders.read().await;
        Ok(store.get(&id).cloned().map(Order::reconstitute))
    }

    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>> {
        let store = self.orders.read().await;
        Ok(store
            .values()
            .find(|record| record.order_number == order_number)
            .cloned()
            .map(Order::reconstitute))
    }

    async fn find_all(
        &self,
        filters: &OrderFilters,
        pagination: &Pagination,
    ) -> Result<Page<Order>> {
        let store = self.orders.read().await;
        let records: Vec<_> = store
            .values()
            .filter(|record| matches(record, filters))
            .cloned()
            .collect();
        Ok(paginate(records, pagination))
    }

    async fn find_by_retailer_id(
        &self,
        retailer_id: RetailerId,
        pagination: &Pagination,
    ) -> Result<Page<Order>> {
        self.find_all(&OrderFilters::new().retailer_id(retailer_id), pagination)
            .await
    }

    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Vec<Order>> {
        let store = self.orders.read().await;
        let mut records: Vec<_> = store
            .values()
            .filter(|record| record.customer_id == customer_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records.into_iter().map(Order::reconstitute).collect())
    }

    async fn update(&self, order: Order) -> Result<Order> {
        let mut record = order.to_record();
        let mut store = self.orders.write().await;

        let stored_version = store
            .get(&record.id)
            .map(|existing| existing.version)
            .ok_or_else(|| DomainError::not_found("Order", record.id))?;

        if stored_version != record.version {
            metrics::counter!("order_repository_conflicts_total").increment(1);
            tracing::warn!(
                order_id = %record.id,
                expected = record.version,
                actual = stored_version,
                "stale order update rejected"
            );
            return Err(DomainError::Conflict(format!(
                "order {} was modified concurrently: expected version {}, found {}",
                record.id, record.version, stored_version
            )));
        }

        assign_item_ids(&mut record);
        record.version += 1;
        store.insert(record.id, record.clone());

        tracing::debug!(order_id = %record.id, version = record.version, "order updated");
        Ok(Order::reconstitute(record))
    }

    async fn delete(&self, id: OrderId) -> Result<()> {
        self.orders
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Order", id))
    }

    async fn exists(&self, id: OrderId) -> Result<bool> {
        Ok(self.orders.read().await.contains_key(&id))
    }

    async fn count_by_status(
        &self,
        retailer_id: Option<RetailerId>,
    ) -> Result<HashMap<OrderStatus, u64>> {
        let mut counts: HashMap<_, _> = OrderStatus::ALL.iter().map(|s| (*s, 0)).collect();
        let store = self.orders.read().await;
        for record in store
            .values()
            .filter(|record| retailer_id.is_none_or(|id| record.retailer_id == id))
        {
            *counts.entry(record.status).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
