//! Monetary amounts in minor currency units.
//!
//! All stored amounts are integers in the smallest denomination (cents for
//! USD). Display conversion to major units goes through decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes supported for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

/// Error parsing a [`CurrencyCode`] from a string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unsupported currency code: {0}")]
pub struct CurrencyCodeError(pub String);

impl CurrencyCode {
    /// Returns the currency symbol used for display.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Returns the ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            other => Err(CurrencyCodeError(other.to_owned())),
        }
    }
}

/// A monetary amount in minor units with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the smallest currency unit (e.g., cents for USD).
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
}

impl Money {
    /// Create a `Money` from an amount already in minor units.
    #[must_use]
    pub const fn from_minor_units(amount: i64, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Create a `Money` from an amount in major units (e.g., dollars).
    ///
    /// Multiplies by 100 with native float arithmetic and truncates toward
    /// zero; there is no additional precision safeguard.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_major_units(value: f64, currency: CurrencyCode) -> Self {
        Self {
            amount: (value * 100.0) as i64,
            currency,
        }
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.amount > 0
    }

    /// Format for display in major units (e.g., `"$123.45"`).
    ///
    /// Negative amounts place the sign before the symbol (`"-$3.50"`).
    #[must_use]
    pub fn format(self) -> String {
        let major = Decimal::new(self.amount, 2);
        if major.is_sign_negative() {
            format!("-{}{}", self.currency.symbol(), major.abs())
        } else {
            format!("{}{}", self.currency.symbol(), major)
        }
    }
}

/// Format an amount in minor units for display.
///
/// Convenience wrapper over [`Money::format`].
#[must_use]
pub fn format_minor_units(amount: i64, currency: CurrencyCode) -> String {
    Money::from_minor_units(amount, currency).format()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_minor_units(12345, CurrencyCode::USD), "$123.45");
    }

    #[test]
    fn test_format_whole_amount_keeps_two_decimals() {
        assert_eq!(format_minor_units(100, CurrencyCode::USD), "$1.00");
        assert_eq!(format_minor_units(0, CurrencyCode::USD), "$0.00");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_minor_units(-350, CurrencyCode::USD), "-$3.50");
    }

    #[test]
    fn test_format_other_currencies() {
        assert_eq!(format_minor_units(995, CurrencyCode::EUR), "€9.95");
        assert_eq!(format_minor_units(995, CurrencyCode::GBP), "£9.95");
    }

    #[test]
    fn test_from_major_units() {
        let money = Money::from_major_units(123.45, CurrencyCode::USD);
        assert_eq!(money.amount, 12345);

        let money = Money::from_major_units(50.0, CurrencyCode::USD);
        assert_eq!(money.amount, 5000);
    }

    #[test]
    fn test_is_positive() {
        assert!(Money::from_minor_units(1, CurrencyCode::USD).is_positive());
        assert!(!Money::from_minor_units(0, CurrencyCode::USD).is_positive());
        assert!(!Money::from_minor_units(-5, CurrencyCode::USD).is_positive());
    }

    #[test]
    fn test_currency_code_from_str() {
        assert_eq!("usd".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert_eq!("EUR".parse::<CurrencyCode>().unwrap(), CurrencyCode::EUR);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_currency_code_serde() {
        let json = serde_json::to_string(&CurrencyCode::USD).unwrap();
        assert_eq!(json, "\"USD\"");
        let parsed: CurrencyCode = serde_json::from_str("\"GBP\"").unwrap();
        assert_eq!(parsed, CurrencyCode::GBP);
    }
}
