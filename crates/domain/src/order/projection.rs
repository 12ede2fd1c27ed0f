//! Serializable read projections of an order.

use chrono::{DateTime, Utc};
use common::{OrderId, OrderItemId, RetailerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};
use crate::query::Page;

use super::{
    Address, AddressProps, Money, Order, OrderItem, OrderItemRecord, OrderRecord, OrderStatus,
    ProductId,
};

/// A line item as exposed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: Option<OrderItemId>,
    pub order_id: Option<OrderId>,
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub currency: String,
    pub created_at: String,
    pub updated_at: String,
}

/// An order as exposed to callers. Dates are RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub order_number: String,
    pub retailer_id: RetailerId,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub delivery_address: AddressProps,
    pub items: Vec<OrderItemResponse>,
    pub status: String,
    pub notes: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub currency: String,
    pub item_count: usize,
    pub version: u64,
    pub created_at: String,
    pub updated_at: String,
    pub confirmed_at: Option<String>,
    pub dispatched_at: Option<String>,
    pub delivered_at: Option<String>,
    pub cancelled_at: Option<String>,
}

/// One page of projected results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> PaginatedResponse<T> {
    /// Projects every item of a page, stopping at the first failure.
    pub fn try_from_page<S>(page: Page<S>, project: impl Fn(&S) -> Result<T>) -> Result<Self> {
        Ok(Self {
            has_next: page.has_next(),
            has_previous: page.has_previous(),
            data: page.items.iter().map(project).collect::<Result<_>>()?,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        })
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339()
}

fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DomainError::validation(field, format!("'{value}' is not RFC 3339: {e}")))
}

fn parse_optional_timestamp(field: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    value.map(|v| parse_timestamp(field, v)).transpose()
}

impl TryFrom<&OrderItem> for OrderItemResponse {
    type Error = DomainError;

    fn try_from(item: &OrderItem) -> Result<Self> {
        Ok(Self {
            id: item.id(),
            order_id: item.order_id(),
            product_id: item.product_id().to_string(),
            product_name: item.product_name().to_string(),
            quantity: item.quantity(),
            unit_price: item.unit_price().amount(),
            total_price: item.total_price()?.amount(),
            currency: item.unit_price().currency().to_string(),
            created_at: format_timestamp(item.created_at()),
            updated_at: format_timestamp(item.updated_at()),
        })
    }
}

/// Fails only when a stored order's totals are out of range.
impl TryFrom<&Order> for OrderResponse {
    type Error = DomainError;

    fn try_from(order: &Order) -> Result<Self> {
        let total = order.total_amount()?;
        Ok(Self {
            id: order.id(),
            order_number: order.order_number().to_string(),
            retailer_id: order.retailer_id(),
            customer_id: order.customer_id().to_string(),
            customer_name: order.customer_name().to_string(),
            customer_email: order.customer_email().to_string(),
            delivery_address: order.delivery_address().to_props(),
            items: order
                .items()
                .iter()
                .map(OrderItemResponse::try_from)
                .collect::<Result<_>>()?,
            status: order.status().to_string(),
            notes: order.notes().map(str::to_string),
            total_amount: total.amount(),
            currency: total.currency().to_string(),
            item_count: order.item_count(),
            version: order.version(),
            created_at: format_timestamp(order.created_at()),
            updated_at: format_timestamp(order.updated_at()),
            confirmed_at: order.confirmed_at().map(format_timestamp),
            dispatched_at: order.dispatched_at().map(format_timestamp),
            delivered_at: order.delivered_at().map(format_timestamp),
            cancelled_at: order.cancelled_at().map(format_timestamp),
        })
    }
}

impl TryFrom<OrderItemResponse> for OrderItemRecord {
    type Error = DomainError;

    fn try_from(item: OrderItemResponse) -> Result<Self> {
        Ok(Self {
            id: item.id,
            order_id: item.order_id,
            product_id: ProductId::new(item.product_id),
            product_name: item.product_name,
            quantity: item.quantity,
            unit_price: Money::new(item.unit_price, &item.currency)?,
            created_at: parse_timestamp("createdAt", &item.created_at)?,
            updated_at: parse_timestamp("updatedAt", &item.updated_at)?,
        })
    }
}

/// Parses a projection back into the stored form, for re-hydration.
impl TryFrom<OrderResponse> for OrderRecord {
    type Error = DomainError;

    fn try_from(order: OrderResponse) -> Result<Self> {
        Ok(Self {
            id: order.id,
            order_number: order.order_number,
            retailer_id: order.retailer_id,
            customer_id: order.customer_id,
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            delivery_address: Address::new(order.delivery_address)?,
            items: order
                .items
                .into_iter()
                .map(OrderItemRecord::try_from)
                .collect::<Result<_>>()?,
            status: order.status.parse::<OrderStatus>()?,
            notes: order.notes,
            version: order.version,
            created_at: parse_timestamp("createdAt", &order.created_at)?,
            updated_at: parse_timestamp("updatedAt", &order.updated_at)?,
            confirmed_at: parse_optional_timestamp("confirmedAt", order.confirmed_at.as_deref())?,
            dispatched_at: parse_optional_timestamp(
                "dispatchedAt",
                order.dispatched_at.as_deref(),
            )?,
            delivered_at: parse_optional_timestamp("deliveredAt", order.delivered_at.as_deref())?,
            cancelled_at: parse_optional_timestamp("cancelledAt", order.cancelled_at.as_deref())?,
        })
    }
}
