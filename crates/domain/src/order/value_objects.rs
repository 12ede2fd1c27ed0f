//! Value objects for the order domain.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// Currency used when a caller does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Product identifier (SKU).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the ID is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A non-negative currency amount held to two decimal places.
///
/// Every constructor and arithmetic result is rounded half away from zero,
/// so `10.005` becomes `10.01` and `10.004` becomes `10.00`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Money {
    amount: Decimal,
    currency: String,
}

fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn too_large(operation: String) -> DomainError {
    DomainError::validation("amount", format!("{operation} is too large"))
}

fn normalize_currency(currency: &str) -> Result<String> {
    let code = currency.trim().to_uppercase();
    if code.is_empty() {
        return Err(DomainError::validation("currency", "must not be empty"));
    }
    Ok(code)
}

impl Money {
    /// Creates a money amount, rejecting negatives.
    pub fn new(amount: Decimal, currency: &str) -> Result<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::validation(
                "amount",
                format!("{amount} must not be negative"),
            ));
        }
        Ok(Self {
            amount: round_amount(amount),
            currency: normalize_currency(currency)?,
        })
    }

    /// Creates an amount from minor units (cents).
    pub fn from_cents(cents: i64, currency: &str) -> Result<Self> {
        Self::new(Decimal::new(cents, 2), currency)
    }

    /// Returns zero in the given currency.
    pub fn zero(currency: &str) -> Result<Self> {
        Self::new(Decimal::ZERO, currency)
    }

    // Callers guarantee a non-negative amount and a normalized currency.
    pub(crate) fn from_trusted(amount: Decimal, currency: String) -> Self {
        Self {
            amount: round_amount(amount),
            currency,
        }
    }

    /// Returns the amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency code.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<()> {
        if self.currency != other.currency {
            return Err(DomainError::validation(
                "currency",
                format!(
                    "cannot combine {} with {}",
                    self.currency, other.currency
                ),
            ));
        }
        Ok(())
    }

    /// Adds another money amount of the same currency.
    pub fn add(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| too_large(format!("{self} + {other}")))?;
        Ok(Money::from_trusted(amount, self.currency.clone()))
    }

    /// Subtracts another money amount of the same currency.
    ///
    /// Fails if the result would be negative.
    pub fn subtract(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other)?;
        let amount = self.amount - other.amount;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::validation(
                "amount",
                format!("subtracting {other} from {self} would be negative"),
            ));
        }
        Ok(Money::from_trusted(amount, self.currency.clone()))
    }

    /// Multiplies by a non-negative factor.
    pub fn multiply(&self, factor: Decimal) -> Result<Money> {
        if factor.is_sign_negative() && !factor.is_zero() {
            return Err(DomainError::validation(
                "factor",
                format!("{factor} must not be negative"),
            ));
        }
        let amount = self
            .amount
            .checked_mul(factor)
            .ok_or_else(|| too_large(format!("{self} * {factor}")))?;
        Ok(Money::from_trusted(amount, self.currency.clone()))
    }

    /// Multiplies by a quantity.
    pub fn times(&self, quantity: u32) -> Result<Money> {
        let amount = self
            .amount
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| too_large(format!("{self} * {quantity}")))?;
        Ok(Money::from_trusted(amount, self.currency.clone()))
    }

    /// Compares amounts; fails if the currencies differ.
    pub fn equals(&self, other: &Money) -> Result<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.amount == other.amount)
    }

    /// Returns true if this amount is larger; fails if the currencies differ.
    pub fn greater_than(&self, other: &Money) -> Result<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.amount > other.amount)
    }

    /// Returns true if this amount is smaller; fails if the currencies differ.
    pub fn less_than(&self, other: &Money) -> Result<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.amount < other.amount)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

/// Raw address fields as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressProps {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// A validated delivery address. All fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    street: String,
    city: String,
    state: String,
    postal_code: String,
    country: String,
}

impl Address {
    /// Validates and trims the supplied fields.
    pub fn new(props: AddressProps) -> Result<Self> {
        fn required(field: &str, value: String) -> Result<String> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(DomainError::validation(
                    format!("deliveryAddress.{field}"),
                    "is required",
                ));
            }
            Ok(trimmed.to_string())
        }

        Ok(Self {
            street: required("street", props.street)?,
            city: required("city", props.city)?,
            state: required("state", props.state)?,
            postal_code: required("postalCode", props.postal_code)?,
            country: required("country", props.country)?,
        })
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Returns the fields as a plain structure.
    pub fn to_props(&self) -> AddressProps {
        AddressProps {
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
        }
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {} {}, {}",
            self.street, self.city, self.state, self.postal_code, self.country
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn usd(cents: i64) -> Money {
        Money::from_cents(cents, "USD").unwrap()
    }

    fn props() -> AddressProps {
        AddressProps {
            street: " 1 Main St ".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            postal_code: "62701".into(),
            country: "US".into(),
        }
    }

    #[test]
    fn test_product_id_string_conversion() {
        let id = ProductId::new("SKU-001");
        assert_eq!(id.as_str(), "SKU-001");

        let id2: ProductId = "SKU-002".into();
        assert_eq!(id2.as_str(), "SKU-002");
        assert!(ProductId::new("  ").is_blank());
    }

    #[test]
    fn test_money_rejects_negative_amount() {
        let err = Money::new(Decimal::from(-1), "USD").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_money_rounds_half_away_from_zero() {
        let money = Money::new(Decimal::new(10005, 3), "USD").unwrap();
        assert_eq!(money.amount(), Decimal::new(1001, 2));

        let money = Money::new(Decimal::new(10004, 3), "USD").unwrap();
        assert_eq!(money.amount(), Decimal::new(1000, 2));
    }

    #[test]
    fn test_money_normalizes_currency() {
        let money = Money::new(Decimal::ONE, " eur ").unwrap();
        assert_eq!(money.currency(), "EUR");
        assert!(Money::new(Decimal::ONE, "  ").is_err());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(usd(1234).to_string(), "12.34 USD");
        assert_eq!(usd(5).to_string(), "0.05 USD");
        assert_eq!(Money::zero("USD").unwrap().to_string(), "0.00 USD");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = usd(1000);
        let b = usd(500);

        assert_eq!(a.add(&b).unwrap(), usd(1500));
        assert_eq!(a.subtract(&b).unwrap(), usd(500));
        assert_eq!(a.multiply(Decimal::from(3)).unwrap(), usd(3000));
        assert_eq!(a.times(3).unwrap(), usd(3000));
    }

    #[test]
    fn test_money_multiply_rounds_result() {
        let price = usd(333);
        let result = price.multiply(Decimal::new(5, 1)).unwrap();
        assert_eq!(result.amount(), Decimal::new(167, 2));
    }

    #[test]
    fn test_money_subtract_below_zero_fails() {
        let err = usd(100).subtract(&usd(101)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(usd(100).subtract(&usd(100)).unwrap().is_zero());
    }

    #[test]
    fn test_money_negative_factor_fails() {
        assert!(usd(100).multiply(Decimal::from(-2)).is_err());
    }

    #[test]
    fn test_money_overflow_is_validation_error() {
        let huge = Money::new(Decimal::MAX, "USD").unwrap();

        assert_eq!(huge.times(3).unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(huge.add(&usd(100)).unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(
            huge.multiply(Decimal::from(2)).unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(huge.times(1).unwrap(), huge);
    }

    #[test]
    fn test_money_currency_mismatch_fails() {
        let eur = Money::from_cents(100, "EUR").unwrap();
        assert!(usd(100).add(&eur).is_err());
        assert!(usd(100).subtract(&eur).is_err());
        assert!(usd(100).equals(&eur).is_err());
        assert!(usd(100).greater_than(&eur).is_err());
        assert!(usd(100).less_than(&eur).is_err());
    }

    #[test]
    fn test_money_comparison() {
        assert!(usd(200).greater_than(&usd(100)).unwrap());
        assert!(usd(100).less_than(&usd(200)).unwrap());
        assert!(usd(100).equals(&usd(100)).unwrap());
        assert!(usd(100).is_positive());
        assert!(!Money::zero("USD").unwrap().is_positive());
    }

    #[test]
    fn test_address_trims_fields() {
        let address = Address::new(props()).unwrap();
        assert_eq!(address.street(), "1 Main St");
        assert_eq!(address.to_props().street, "1 Main St");
    }

    #[test]
    fn test_address_requires_every_field() {
        let mut missing = props();
        missing.postal_code = "   ".into();
        let err = Address::new(missing).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("deliveryAddress.postalCode", "is required")
        );
    }

    #[test]
    fn test_address_structural_equality() {
        let a = Address::new(props()).unwrap();
        let b = Address::new(AddressProps {
            street: "1 Main St".into(),
            ..props()
        })
        .unwrap();
        assert_eq!(a, b);
    }
}
