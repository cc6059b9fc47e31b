use rust_decimal::Decimal;

use catalog_core::{DomainError, DomainResult, ValueObject, ValueObjectKind};

use super::Currency;

/// Non-negative decimal amount in a resolved ISO currency.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Price {
    value: Decimal,
    currency: Currency,
}

impl Price {
    pub fn new(value: Option<Decimal>, currency: Option<Currency>) -> DomainResult<Self> {
        let value = value.ok_or_else(|| {
            DomainError::required(ValueObjectKind::Price, "Price value is required")
        })?;
        let currency = currency.ok_or_else(|| {
            DomainError::required(ValueObjectKind::Price, "Currency is required")
        })?;
        if value < Decimal::ZERO {
            return Err(DomainError::invalid(
                ValueObjectKind::Price,
                "Price must be non-negative",
            ));
        }
        Ok(Self { value, currency })
    }

    /// Convenience constructor resolving the currency from its ISO code.
    pub fn of(value: Decimal, currency_code: &str) -> DomainResult<Self> {
        let currency = Currency::from_code(currency_code)?;
        Self::new(Some(value), Some(currency))
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Sum of two prices in the same currency.
    pub fn add(&self, other: &Price) -> DomainResult<Price> {
        if self.currency != other.currency {
            return Err(DomainError::invalid(
                ValueObjectKind::Price,
                format!(
                    "Cannot add prices with different currencies ({} and {})",
                    self.currency, other.currency
                ),
            ));
        }
        let value = self.value.checked_add(other.value).ok_or_else(|| {
            DomainError::invalid(ValueObjectKind::Price, "Price addition overflowed")
        })?;
        Ok(Self {
            value,
            currency: self.currency,
        })
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}
