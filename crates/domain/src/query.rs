//! Filtering and pagination for order queries.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use common::RetailerId;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};
use crate::order::OrderStatus;

/// Largest page size a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Page size used when a caller does not choose one.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Filters applied when listing orders.
///
/// Every populated field must match; `order_number` matches as a
/// case-insensitive substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilters {
    pub retailer_id: Option<RetailerId>,
    pub customer_id: Option<String>,
    pub status: Option<OrderStatus>,
    pub order_number: Option<String>,

    /// Orders created at or after this timestamp.
    pub created_from: Option<DateTime<Utc>>,

    /// Orders created at or before this timestamp.
    pub created_to: Option<DateTime<Utc>>,
}

impl OrderFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn retailer_id(mut self, retailer_id: RetailerId) -> Self {
        self.retailer_id = Some(retailer_id);
        self
    }

    pub fn customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn order_number(mut self, fragment: impl Into<String>) -> Self {
        self.order_number = Some(fragment.into());
        self
    }

    pub fn created_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_from = from;
        self.created_to = to;
        self
    }
}

/// Field to sort listed orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    OrderNumber,
    Status,
    CustomerName,
}

const SORT_FIELDS: &str = "createdAt, updatedAt, orderNumber, status, customerName";

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "createdAt" => Ok(SortField::CreatedAt),
            "updatedAt" => Ok(SortField::UpdatedAt),
            "orderNumber" => Ok(SortField::OrderNumber),
            "status" => Ok(SortField::Status),
            "customerName" => Ok(SortField::CustomerName),
            other => Err(DomainError::validation(
                "sortBy",
                format!("'{other}' is not one of {SORT_FIELDS}"),
            )),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DomainError::validation(
                "sortOrder",
                format!("'{other}' is not one of asc, desc"),
            )),
        }
    }
}

/// Page selection and ordering. Defaults to page 1, 10 per page, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
    sort_by: SortField,
    sort_order: SortOrder,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl Pagination {
    /// Creates a pagination, requiring `page >= 1` and `1 <= limit <= 100`.
    pub fn new(page: u32, limit: u32) -> Result<Self> {
        if page < 1 {
            return Err(DomainError::validation("page", "must be at least 1"));
        }
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(DomainError::validation(
                "limit",
                format!("must be between 1 and {MAX_PAGE_LIMIT}"),
            ));
        }
        Ok(Self {
            page,
            limit,
            ..Self::default()
        })
    }

    pub fn sorted_by(mut self, sort_by: SortField, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn sort_by(&self) -> SortField {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Number of items to skip before this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }
}

/// One page of results plus the totals needed to navigate.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Builds a page from its items and the unpaged total.
    pub fn new(items: Vec<T>, total: u64, pagination: &Pagination) -> Self {
        let limit = u64::from(pagination.limit());
        let total_pages = u32::try_from(total.div_ceil(limit)).unwrap_or(u32::MAX);
        Self {
            items,
            total,
            page: pagination.page(),
            limit: pagination.limit(),
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
