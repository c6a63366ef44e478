//! Quote results

use crate::country::Country;
use crate::money::Money;
use crate::tier::WeightTier;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a weight/destination pair could not be quoted
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "detail")]
pub enum QuoteError {
    /// Destination missing or not enabled for the store
    #[error("unsupported destination '{0}'")]
    UnsupportedDestination(String),

    /// Negative, NaN, infinite, or unrepresentable weight
    #[error("invalid weight: {0}")]
    InvalidWeight(String),

    /// The country's tiers leave this weight uncovered. Configuration defect.
    #[error("no tier matches {grams} g for {country}")]
    NoMatchingTier {
        country: String,
        #[schemars(with = "String")]
        grams: Decimal,
    },
}

/// A successful quotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Quote {
    pub price: Money,
    pub country: Country,
    /// Weight the quote was computed for, in grams
    #[schemars(with = "String")]
    pub weight_grams: Decimal,
    pub tier: WeightTier,
    /// Position of the matched tier within the country's tiers
    pub tier_index: usize,
    /// Carrier label, e.g. "BPost"
    pub carrier: String,
    /// Service label, e.g. "Home delivery"
    pub service: String,
    /// Fingerprint of the rate table that produced this quote
    pub table_fingerprint: String,
}

impl Quote {
    pub fn amount(&self) -> Decimal {
        self.price.amount
    }

    pub fn currency(&self) -> &str {
        &self.price.currency
    }
}
