//! Domain error types.

use thiserror::Error;

use crate::order::OrderStatus;

/// The category of a [`DomainError`], used by transports to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    InvalidStateTransition,
    BusinessRuleViolation,
    Internal,
}

impl ErrorKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorKind::BusinessRuleViolation => "BUSINESS_RULE_VIOLATION",
            ErrorKind::Internal => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur during order operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed or missing input.
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// A referenced order or retailer does not exist.
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// A uniqueness or version check failed in a collaborator.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The status table forbids the requested transition.
    #[error("Invalid state transition: cannot move from {from} to {to}")]
    InvalidStateTransition { from: OrderStatus, to: String },

    /// The transition is table-legal but a domain rule blocks it.
    #[error("Business rule violation: {0}")]
    BusinessRuleViolation(String),

    /// Unexpected failure outside the domain rules.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Creates a validation error for a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a not-found error for a resource and identifier.
    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        DomainError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Creates a business rule violation.
    pub fn business_rule(message: impl Into<String>) -> Self {
        DomainError::BusinessRuleViolation(message.into())
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation { .. } => ErrorKind::Validation,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Conflict(_) => ErrorKind::Conflict,
            DomainError::InvalidStateTransition { .. } => ErrorKind::InvalidStateTransition,
            DomainError::BusinessRuleViolation(_) => ErrorKind::BusinessRuleViolation,
            DomainError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
