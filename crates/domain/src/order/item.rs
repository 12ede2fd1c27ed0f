//! Order line items.

use chrono::{DateTime, Utc};
use common::{OrderId, OrderItemId};

use crate::error::{DomainError, Result};

use super::{Money, ProductId};

/// Fields required to create a line item.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

/// Stored form of a line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub id: Option<OrderItemId>,
    pub order_id: Option<OrderId>,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item owned by exactly one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    id: Option<OrderItemId>,
    order_id: Option<OrderId>,
    product_id: ProductId,
    product_name: String,
    quantity: u32,
    unit_price: Money,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn ensure_quantity(quantity: u32) -> Result<()> {
    if quantity == 0 {
        return Err(DomainError::validation(
            "quantity",
            "must be a positive integer",
        ));
    }
    Ok(())
}

impl OrderItem {
    /// Creates a validated line item.
    pub fn new(props: NewOrderItem) -> Result<Self> {
        if props.product_id.is_blank() {
            return Err(DomainError::validation("productId", "is required"));
        }
        if props.product_name.trim().is_empty() {
            return Err(DomainError::validation("productName", "is required"));
        }
        ensure_quantity(props.quantity)?;
        if !props.unit_price.is_positive() {
            return Err(DomainError::validation(
                "unitPrice",
                format!("{} must be greater than 0", props.unit_price),
            ));
        }
        props.unit_price.times(props.quantity)?;

        let now = Utc::now();
        Ok(Self {
            id: None,
            order_id: None,
            product_id: ProductId::new(props.product_id.as_str().trim()),
            product_name: props.product_name.trim().to_string(),
            quantity: props.quantity,
            unit_price: props.unit_price,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds an item from storage without validation.
    pub fn reconstitute(record: OrderItemRecord) -> Self {
        Self {
            id: record.id,
            order_id: record.order_id,
            product_id: record.product_id,
            product_name: record.product_name,
            quantity: record.quantity,
            unit_price: record.unit_price,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    pub fn id(&self) -> Option<OrderItemId> {
        self.id
    }

    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> &Money {
        &self.unit_price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the total price for this item (quantity * unit_price).
    pub fn total_price(&self) -> Result<Money> {
        self.unit_price.times(self.quantity)
    }

    /// Replaces the quantity. The new line total must still be representable.
    pub fn update_quantity(&mut self, quantity: u32) -> Result<()> {
        ensure_quantity(quantity)?;
        self.unit_price.times(quantity)?;
        self.quantity = quantity;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Identity check: by `id` when both items are persisted, otherwise by product.
    pub fn same_identity_as(&self, other: &OrderItem) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.product_id == other.product_id,
        }
    }

    pub(crate) fn attach_to(&mut self, order_id: OrderId) {
        self.order_id = Some(order_id);
    }

    /// Returns the stored form of this item.
    pub fn to_record(&self) -> OrderItemRecord {
        OrderItemRecord {
            id: self.id,
            order_id: self.order_id,
            product_id: self.product_id.clone(),
            product_name: self.product_name.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn new_item(product_id: &str, quantity: u32, cents: i64) -> NewOrderItem {
        NewOrderItem {
            product_id: ProductId::new(product_id),
            product_name: "Widget".into(),
            quantity,
            unit_price: Money::from_cents(cents, "USD").unwrap(),
        }
    }

    #[test]
    fn test_order_item_total_price() {
        let item = OrderItem::new(new_item("SKU-001", 3, 1000)).unwrap();
        assert_eq!(
            item.total_price().unwrap(),
            Money::from_cents(3000, "USD").unwrap()
        );
        assert!(item.id().is_none());
        assert!(item.order_id().is_none());
    }

    #[test]
    fn test_zero_quantity_fails() {
        let err = OrderItem::new(new_item("SKU-001", 0, 1000)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_zero_price_fails() {
        let err = OrderItem::new(new_item("SKU-001", 1, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_line_total_must_fit() {
        let mut props = new_item("SKU-001", 3, 100);
        let half_max = rust_decimal::Decimal::MAX / rust_decimal::Decimal::TWO;
        props.unit_price = Money::new(half_max, "USD").unwrap();
        let err = OrderItem::new(props.clone()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        props.quantity = 1;
        let mut item = OrderItem::new(props).unwrap();
        let err = item.update_quantity(3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn test_blank_product_fields_fail() {
        assert!(OrderItem::new(new_item(" ", 1, 100)).is_err());

        let mut props = new_item("SKU-001", 1, 100);
        props.product_name = String::new();
        assert!(OrderItem::new(props).is_err());
    }

    #[test]
    fn test_update_quantity() {
        let mut item = OrderItem::new(new_item("SKU-001", 1, 250)).unwrap();
        let before = item.updated_at();

        item.update_quantity(4).unwrap();
        assert_eq!(item.quantity(), 4);
        assert!(item.updated_at() >= before);
        assert_eq!(
            item.total_price().unwrap().amount(),
            rust_decimal::Decimal::new(1000, 2)
        );

        assert!(item.update_quantity(0).is_err());
        assert_eq!(item.quantity(), 4);
    }

    #[test]
    fn test_identity_by_product_until_persisted() {
        let a = OrderItem::new(new_item("SKU-001", 1, 100)).unwrap();
        let b = OrderItem::new(new_item("SKU-001", 2, 100)).unwrap();
        assert!(a.same_identity_as(&b));

        let persist = |item: &OrderItem| {
            let mut record = item.to_record();
            record.id = Some(OrderItemId::new());
            OrderItem::reconstitute(record)
        };
        assert!(!persist(&a).same_identity_as(&persist(&b)));
        assert!(persist(&a).same_identity_as(&a));
    }

    #[test]
    fn test_record_roundtrip() {
        let mut item = OrderItem::new(new_item("SKU-001", 2, 999)).unwrap();
        item.attach_to(OrderId::new());
        let rebuilt = OrderItem::reconstitute(item.to_record());
        assert_eq!(rebuilt, item);
    }
}
