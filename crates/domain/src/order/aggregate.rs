//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::{OrderId, RetailerId};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{DomainError, Result};

use super::{
    Address, DEFAULT_CURRENCY, Money, OrderItem, OrderItemRecord, OrderStatus, ProductId,
};

/// Fields required to open a new order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub retailer_id: RetailerId,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub delivery_address: Address,
    pub notes: Option<String>,
}

/// Stored form of an order, as written and read by a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub id: OrderId,
    pub order_number: String,
    pub retailer_id: RetailerId,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub delivery_address: Address,
    pub items: Vec<OrderItemRecord>,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub dispatched_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Order aggregate root.
///
/// Represents a delivery order from creation to delivery or cancellation.
/// All changes to the order and its items go through the methods below; a
/// rejected operation leaves the order untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    order_number: String,
    retailer_id: RetailerId,
    customer_id: String,
    customer_name: String,
    customer_email: String,
    delivery_address: Address,
    items: Vec<OrderItem>,
    status: OrderStatus,
    notes: Option<String>,

    /// Optimistic concurrency token, advanced by the repository on every write.
    version: u64,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    confirmed_at: Option<DateTime<Utc>>,
    dispatched_at: Option<DateTime<Utc>>,
    delivered_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "is required"));
    }
    Ok(trimmed.to_string())
}

fn clean_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_string();
    }
    let mut reversed = String::new();
    while value > 0 {
        reversed.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    reversed.chars().rev().collect()
}

fn currency_of(items: &[OrderItem]) -> &str {
    items
        .first()
        .map(|item| item.unit_price().currency())
        .unwrap_or(DEFAULT_CURRENCY)
}

/// Sums line totals, failing if any line or the sum leaves `Decimal` range.
fn sum_items(items: &[OrderItem]) -> Result<Money> {
    let zero = Money::from_trusted(Decimal::ZERO, currency_of(items).to_string());
    items
        .iter()
        .try_fold(zero, |total, item| total.add(&item.total_price()?))
}

/// Builds `ORD-<millis base36>-<random hex>`. Unique in practice, not guaranteed.
fn generate_order_number(now: DateTime<Utc>) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    let random = Uuid::new_v4().simple().to_string();
    format!("ORD-{}-{}", to_base36(millis), random[..6].to_uppercase())
}

impl Order {
    /// Opens a new order in `CREATED` status with a generated order number.
    pub fn create(props: NewOrder) -> Result<Self> {
        let customer_id = required("customerId", &props.customer_id)?;
        let customer_name = required("customerName", &props.customer_name)?;
        let customer_email = required("customerEmail", &props.customer_email)?;

        let now = Utc::now();
        Ok(Self {
            id: OrderId::new(),
            order_number: generate_order_number(now),
            retailer_id: props.retailer_id,
            customer_id,
            customer_name,
            customer_email,
            delivery_address: props.delivery_address,
            items: Vec::new(),
            status: OrderStatus::Created,
            notes: clean_notes(props.notes),
            version: 0,
            created_at: now,
            updated_at: now,
            confirmed_at: None,
            dispatched_at: None,
            delivered_at: None,
            cancelled_at: None,
        })
    }

    /// Rebuilds an order from storage. No validation is applied.
    pub fn reconstitute(record: OrderRecord) -> Self {
        Self {
            id: record.id,
            order_number: record.order_number,
            retailer_id: record.retailer_id,
            customer_id: record.customer_id,
            customer_name: record.customer_name,
            customer_email: record.customer_email,
            delivery_address: record.delivery_address,
            items: record
                .items
                .into_iter()
                .map(OrderItem::reconstitute)
                .collect(),
            status: record.status,
            notes: record.notes,
            version: record.version,
            created_at: record.created_at,
            updated_at: record.updated_at,
            confirmed_at: record.confirmed_at,
            dispatched_at: record.dispatched_at,
            delivered_at: record.delivered_at,
            cancelled_at: record.cancelled_at,
        }
    }

    /// Returns the stored form of this order.
    pub fn to_record(&self) -> OrderRecord {
        OrderRecord {
            id: self.id,
            order_number: self.order_number.clone(),
            retailer_id: self.retailer_id,
            customer_id: self.customer_id.clone(),
            customer_name: self.customer_name.clone(),
            customer_email: self.customer_email.clone(),
            delivery_address: self.delivery_address.clone(),
            items: self.items.iter().map(OrderItem::to_record).collect(),
            status: self.status,
            notes: self.notes.clone(),
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
            confirmed_at: self.confirmed_at,
            dispatched_at: self.dispatched_at,
            delivered_at: self.delivered_at,
            cancelled_at: self.cancelled_at,
        }
    }
}

// Query methods
impl Order {
    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn retailer_id(&self) -> RetailerId {
        self.retailer_id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    pub fn delivery_address(&self) -> &Address {
        &self.delivery_address
    }

    /// Returns the items in display order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns an item by product ID.
    pub fn get_item(&self, product_id: &ProductId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        self.confirmed_at
    }

    pub fn dispatched_at(&self) -> Option<DateTime<Utc>> {
        self.dispatched_at
    }

    pub fn delivered_at(&self) -> Option<DateTime<Utc>> {
        self.delivered_at
    }

    pub fn cancelled_at(&self) -> Option<DateTime<Utc>> {
        self.cancelled_at
    }

    /// Returns the number of item lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Returns true if the order has items.
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns true if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Currency shared by all items, or the default for an empty order.
    pub fn currency(&self) -> &str {
        currency_of(&self.items)
    }

    /// Sum of `quantity * unit_price` over all items; zero when empty.
    ///
    /// Item changes keep this within range, so it only fails for records
    /// that were stored with out-of-range totals.
    pub fn total_amount(&self) -> Result<Money> {
        sum_items(&self.items)
    }
}

// Command methods
impl Order {
    fn touch(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        self.updated_at = now;
        now
    }

    fn ensure_items_mutable(&self, action: &str) -> Result<()> {
        if self.status.is_terminal() {
            return Err(DomainError::business_rule(format!(
                "cannot {action}: order {} is {} and can no longer change",
                self.order_number, self.status
            )));
        }
        if !self.status.can_modify_items() {
            return Err(DomainError::business_rule(format!(
                "cannot {action}: items can only change while the order is {}, order {} is {}",
                OrderStatus::Created,
                self.order_number,
                self.status
            )));
        }
        Ok(())
    }

    fn ensure_transition(&self, target: OrderStatus) -> Result<()> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::InvalidStateTransition {
                from: self.status,
                to: target.to_string(),
            });
        }
        Ok(())
    }

    fn position_of(&self, product_id: &ProductId) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.product_id() == product_id)
            .ok_or_else(|| DomainError::not_found("Order item", product_id))
    }

    /// Adds an item to the order.
    ///
    /// If an item for the same product already exists, its quantity grows instead.
    pub fn add_item(&mut self, mut item: OrderItem) -> Result<()> {
        self.ensure_items_mutable("add item")?;

        if let Some(existing) = self.items.first()
            && existing.unit_price().currency() != item.unit_price().currency()
        {
            return Err(DomainError::validation(
                "currency",
                format!(
                    "order is priced in {}, item is priced in {}",
                    existing.unit_price().currency(),
                    item.unit_price().currency()
                ),
            ));
        }

        let mut items = self.items.clone();
        match items
            .iter()
            .position(|existing| existing.same_identity_as(&item))
        {
            Some(index) => {
                let existing = &mut items[index];
                let merged = existing
                    .quantity()
                    .checked_add(item.quantity())
                    .ok_or_else(|| DomainError::validation("quantity", "is too large"))?;
                existing.update_quantity(merged)?;
            }
            None => {
                item.attach_to(self.id);
                items.push(item);
            }
        }
        sum_items(&items)?;

        self.items = items;
        self.touch();
        Ok(())
    }

    /// Removes the item for a product, returning it.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<OrderItem> {
        self.ensure_items_mutable("remove item")?;
        let index = self.position_of(product_id)?;
        let removed = self.items.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Replaces the quantity of an existing item.
    pub fn update_item_quantity(&mut self, product_id: &ProductId, quantity: u32) -> Result<()> {
        self.ensure_items_mutable("update item quantity")?;
        let index = self.position_of(product_id)?;
        let mut items = self.items.clone();
        items[index].update_quantity(quantity)?;
        sum_items(&items)?;

        self.items = items;
        self.touch();
        Ok(())
    }

    /// Replaces the free-text notes while the order is still open.
    pub fn update_notes(&mut self, notes: Option<String>) -> Result<()> {
        if self.status.is_terminal() {
            return Err(DomainError::business_rule(format!(
                "cannot update notes: order {} is {}",
                self.order_number, self.status
            )));
        }
        self.notes = clean_notes(notes);
        self.touch();
        Ok(())
    }

    /// Confirms the order. Requires at least one item.
    pub fn confirm(&mut self) -> Result<()> {
        if !self.has_items() {
            return Err(DomainError::business_rule(format!(
                "order {} cannot be confirmed without items",
                self.order_number
            )));
        }
        self.ensure_transition(OrderStatus::Confirmed)?;

        let now = self.touch();
        self.status = OrderStatus::Confirmed;
        self.confirmed_at = Some(now);
        Ok(())
    }

    /// Marks the order as dispatched.
    pub fn dispatch(&mut self) -> Result<()> {
        self.ensure_transition(OrderStatus::Dispatched)?;

        let now = self.touch();
        self.status = OrderStatus::Dispatched;
        self.dispatched_at = Some(now);
        Ok(())
    }

    /// Marks the order as delivered.
    pub fn deliver(&mut self) -> Result<()> {
        self.ensure_transition(OrderStatus::Delivered)?;

        let now = self.touch();
        self.status = OrderStatus::Delivered;
        self.delivered_at = Some(now);
        Ok(())
    }

    /// Cancels the order. Only `CREATED` and `CONFIRMED` orders can be cancelled.
    pub fn cancel(&mut self) -> Result<()> {
        if !self.status.is_cancellable() {
            return Err(DomainError::business_rule(format!(
                "order {} cannot be cancelled once {}",
                self.order_number, self.status
            )));
        }

        let now = self.touch();
        self.status = OrderStatus::Cancelled;
        self.cancelled_at = Some(now);
        Ok(())
    }

    /// Moves the order to the named status via the matching operation.
    pub fn transition_to(&mut self, target: &str) -> Result<()> {
        if self.status.is_terminal() {
            return Err(DomainError::business_rule(format!(
                "order {} is {} and can no longer change status",
                self.order_number, self.status
            )));
        }

        match target.parse::<OrderStatus>() {
            Ok(OrderStatus::Confirmed) => self.confirm(),
            Ok(OrderStatus::Dispatched) => self.dispatch(),
            Ok(OrderStatus::Delivered) => self.deliver(),
            Ok(OrderStatus::Cancelled) => self.cancel(),
            Ok(OrderStatus::Created) | Err(_) => Err(DomainError::InvalidStateTransition {
                from: self.status,
                to: target.trim().to_uppercase(),
            }),
        }
    }
}
