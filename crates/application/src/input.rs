//! Input contracts accepted by the use cases.
//!
//! Raw inputs arrive loosely typed (strings, signed integers) so that bad
//! values surface as validation errors rather than decoding failures. Each
//! input implements [`Validate`], turning it into a typed command.

use chrono::{DateTime, Utc};
use common::RetailerId;
use domain::{
    AddressProps, DEFAULT_CURRENCY, DomainError, Money, NewOrderItem, OrderFilters, OrderStatus,
    Pagination, ProductId, Result, SortField, SortOrder,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Checks an input's shape and converts it into its typed form.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output>;
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "is required"));
    }
    Ok(trimmed.to_string())
}

fn parse_retailer_id(value: &str) -> Result<RetailerId> {
    value.parse().map_err(|e| {
        DomainError::validation("retailerId", format!("'{value}' is not a valid id: {e}"))
    })
}

fn validate_email(value: &str) -> Result<String> {
    let email = required("customerEmail", value)?;
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && domain.contains('.') && !domain.contains('@') =>
        {
            Ok(email)
        }
        _ => Err(DomainError::validation(
            "customerEmail",
            format!("'{email}' is not a valid email address"),
        )),
    }
}

/// A single order line as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Input for adding an item to an existing order.
pub type AddItemInput = OrderItemInput;

impl Validate for OrderItemInput {
    type Output = NewOrderItem;

    fn validate(self) -> Result<NewOrderItem> {
        let product_id = required("productId", &self.product_id)?;
        let product_name = required("productName", &self.product_name)?;
        let quantity = u32::try_from(self.quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| {
                DomainError::validation(
                    "quantity",
                    format!("{} is not a positive integer", self.quantity),
                )
            })?;
        if self.unit_price <= Decimal::ZERO {
            return Err(DomainError::validation(
                "unitPrice",
                format!("{} must be greater than 0", self.unit_price),
            ));
        }

        Ok(NewOrderItem {
            product_id: ProductId::new(product_id),
            product_name,
            quantity,
            unit_price: Money::new(self.unit_price, &self.currency)?,
        })
    }
}

/// Input for opening a new order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderInput {
    pub retailer_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub delivery_address: AddressProps,
    #[serde(default)]
    pub items: Option<Vec<OrderItemInput>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A validated [`CreateOrderInput`].
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub retailer_id: RetailerId,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub delivery_address: AddressProps,
    pub items: Vec<NewOrderItem>,
    pub notes: Option<String>,
}

impl Validate for CreateOrderInput {
    type Output = CreateOrderCommand;

    fn validate(self) -> Result<CreateOrderCommand> {
        let retailer_id = parse_retailer_id(&self.retailer_id)?;
        let customer_id = required("customerId", &self.customer_id)?;
        let customer_name = required("customerName", &self.customer_name)?;
        let customer_email = validate_email(&self.customer_email)?;
        let items = self
            .items
            .unwrap_or_default()
            .into_iter()
            .map(Validate::validate)
            .collect::<Result<Vec<_>>>()?;

        Ok(CreateOrderCommand {
            retailer_id,
            customer_id,
            customer_name,
            customer_email,
            delivery_address: self.delivery_address,
            items,
            notes: self.notes,
        })
    }
}

/// Input for moving an order to a new status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusInput {
    pub status: String,
}

impl UpdateStatusInput {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

impl Validate for UpdateStatusInput {
    type Output = OrderStatus;

    /// Accepts any status a caller may request; `CREATED` is never a target.
    fn validate(self) -> Result<OrderStatus> {
        match self.status.parse::<OrderStatus>()? {
            OrderStatus::Created => Err(DomainError::validation(
                "status",
                "must be one of CONFIRMED, DISPATCHED, DELIVERED, CANCELLED",
            )),
            status => Ok(status),
        }
    }
}

/// Filters and paging for listing orders. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersInput {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub retailer_id: Option<String>,
    pub customer_id: Option<String>,
    pub status: Option<String>,
    pub order_number: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl Validate for ListOrdersInput {
    type Output = (OrderFilters, Pagination);

    fn validate(self) -> Result<(OrderFilters, Pagination)> {
        let defaults = Pagination::default();
        let sort_by = self
            .sort_by
            .as_deref()
            .map(str::parse::<SortField>)
            .transpose()?
            .unwrap_or_default();
        let sort_order = self
            .sort_order
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();
        let pagination = Pagination::new(
            self.page.unwrap_or(defaults.page()),
            self.limit.unwrap_or(defaults.limit()),
        )?
        .sorted_by(sort_by, sort_order);

        if let (Some(from), Some(to)) = (self.created_from, self.created_to)
            && from > to
        {
            return Err(DomainError::validation(
                "createdFrom",
                "must not be after createdTo",
            ));
        }

        let filters = OrderFilters {
            retailer_id: self
                .retailer_id
                .as_deref()
                .map(parse_retailer_id)
                .transpose()?,
            customer_id: self
                .customer_id
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            status: self
                .status
                .as_deref()
                .map(str::parse::<OrderStatus>)
                .transpose()?,
            order_number: self
                .order_number
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            created_from: self.created_from,
            created_to: self.created_to,
        };

        Ok((filters, pagination))
    }
}
