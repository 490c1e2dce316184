//! Money value object.
//!
//! Amounts are stored in minor units (cents) as integers to avoid floating
//! point drift, together with an explicit currency code. Every operation
//! returns a new value; a `Money` is never mutated in place.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ISO-style currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// United States dollar (system default).
    #[default]
    Usd,
    /// Euro.
    Eur,
    /// Pound sterling.
    Gbp,
}

impl Currency {
    /// Returns the currency code as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur constructing or combining money values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// Amount would be negative.
    #[error("Invalid amount: {minor} minor units (must not be negative)")]
    InvalidAmount { minor: i64 },

    /// Arithmetic between two different currencies.
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: Currency, right: Currency },
}

/// A non-negative monetary amount in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in minor units (e.g. 1050 = 10.50).
    minor: i64,
    currency: Currency,
}

impl Money {
    /// Creates a money value in the default currency.
    ///
    /// Fails with [`MoneyError::InvalidAmount`] if `minor` is negative.
    pub fn of(minor: i64) -> Result<Self, MoneyError> {
        Self::from_minor(minor, Currency::default())
    }

    /// Creates a money value from minor units in the given currency.
    ///
    /// Fails with [`MoneyError::InvalidAmount`] if `minor` is negative.
    pub fn from_minor(minor: i64, currency: Currency) -> Result<Self, MoneyError> {
        if minor < 0 {
            return Err(MoneyError::InvalidAmount { minor });
        }
        Ok(Self { minor, currency })
    }

    /// Creates a money value from whole major units (e.g. dollars).
    pub fn from_major(major: u32, currency: Currency) -> Self {
        Self {
            minor: i64::from(major) * 100,
            currency,
        }
    }

    /// Returns zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self { minor: 0, currency }
    }

    /// Returns the amount in minor units.
    pub fn minor(&self) -> i64 {
        self.minor
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.minor == 0
    }

    /// Adds another amount of the same currency.
    ///
    /// Fails with [`MoneyError::CurrencyMismatch`] if the currencies differ.
    pub fn add(self, other: Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            });
        }
        Ok(Money {
            minor: self.minor + other.minor,
            currency: self.currency,
        })
    }

    /// Multiplies by a quantity.
    pub fn multiply(self, quantity: u32) -> Money {
        Money {
            minor: self.minor * i64::from(quantity),
            currency: self.currency,
        }
    }

    /// Returns the amount taken off when a discount of `percent` applies.
    ///
    /// Computed as `minor - minor * (100 - percent) / 100` in integer
    /// arithmetic, so any rounding remainder stays in the discount.
    pub fn percent_off(self, percent: u8) -> Money {
        let percent = i64::from(percent.min(100));
        let remaining = self.minor * (100 - percent) / 100;
        Money {
            minor: self.minor - remaining,
            currency: self.currency,
        }
    }

    /// Returns true if this amount is strictly greater than `other`.
    ///
    /// Amounts in different currencies are never comparable.
    pub fn exceeds(&self, other: &Money) -> bool {
        self.currency == other.currency && self.minor > other.minor
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{:02} {}",
            self.minor / 100,
            self.minor % 100,
            self.currency
        )
    }
}
