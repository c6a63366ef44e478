//! Fixed-point money
//!
//! Amounts are `rust_decimal::Decimal`, never floats. Each currency carries
//! its minor-unit precision; tier prices are rounded to it once, when a
//! rate table is built.

use rust_decimal::{Decimal, RoundingStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217 currency with its minor-unit precision
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Currency {
    /// Three-letter currency code (e.g. `EUR`)
    pub code: String,

    /// Digits after the decimal separator. Derived from the code when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor_units: Option<u32>,
}

impl Currency {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_ascii_uppercase(),
            minor_units: None,
        }
    }

    pub fn with_minor_units(code: &str, minor_units: u32) -> Self {
        Self {
            code: code.to_ascii_uppercase(),
            minor_units: Some(minor_units),
        }
    }

    /// Effective minor-unit precision
    pub fn precision(&self) -> u32 {
        self.minor_units
            .unwrap_or_else(|| default_minor_units(&self.code))
    }

    pub fn is_valid_code(&self) -> bool {
        self.code.len() == 3 && self.code.bytes().all(|b| b.is_ascii_uppercase())
    }

    /// Round an amount to this currency's precision (half away from zero)
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.precision(), RoundingStrategy::MidpointAwayFromZero)
    }

    /// Whether `amount` carries more fractional digits than the currency allows
    pub fn exceeds_precision(&self, amount: Decimal) -> bool {
        amount.normalize().scale() > self.precision()
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::new("EUR")
    }
}

fn default_minor_units(code: &str) -> u32 {
    match code {
        "BIF" | "CLP" | "ISK" | "JPY" | "KRW" | "PYG" | "UGX" | "VND" | "XAF" | "XOF" => 0,
        "BHD" | "JOD" | "KWD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

/// A monetary amount in a given currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Money {
    #[schemars(with = "String")]
    pub amount: Decimal,
    pub currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: &Currency) -> Self {
        Self {
            amount,
            currency: currency.code.clone(),
        }
    }

    /// Amount with trailing zeros removed, e.g. `10.00` -> `10`
    pub fn trimmed(&self) -> Decimal {
        self.amount.normalize()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
