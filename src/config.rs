//! Rate configuration
//!
//! A `RatesConfig` is the externally supplied description of a carrier's
//! home delivery rates: currency, weight unit, and per-country tiers. It is
//! loaded from YAML or JSON and turned into an immutable
//! [`RateTable`](crate::table::RateTable) after validation.
//!
//! ```yaml
//! version: 1
//! carrier:
//!   name: BPost
//!   service: Home delivery
//! currency: { code: EUR }
//! countries:
//!   - code: BE
//!     name: Belgium
//!     tiers:
//!       - { min: 0, max: 3000, price: 10 }
//!       - { min: 3000, price: 20 }
//! ```

use crate::error::{Error, Result};
use crate::money::Currency;
use crate::weight::WeightUnit;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current config schema version
pub const CONFIG_VERSION: u32 = 1;

/// Root rate configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Rates Config", description = "Carrier home delivery rate table")]
pub struct RatesConfig {
    /// Schema version for migrations
    #[serde(default = "default_version")]
    pub version: u32,

    /// Carrier and service labels
    #[serde(default)]
    pub carrier: CarrierConfig,

    /// Currency of every tier price
    #[serde(default)]
    pub currency: Currency,

    /// Unit of tier bounds
    #[serde(default)]
    pub weight_unit: WeightUnit,

    /// Destination countries with their tiers
    #[serde(default)]
    pub countries: Vec<CountryConfig>,

    /// Validation rules
    #[serde(default)]
    pub validation: TableValidationConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_true() -> bool {
    true
}

/// Carrier labels attached to every quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CarrierConfig {
    /// Shipping method label (e.g. "BPost")
    #[serde(default = "default_carrier_name")]
    pub name: String,

    /// Service label (e.g. "Home delivery")
    #[serde(default = "default_service")]
    pub service: String,

    /// Default package type id
    #[serde(default = "default_package_type")]
    pub package_type: String,
}

fn default_carrier_name() -> String {
    "BPost".to_string()
}

fn default_service() -> String {
    "Home delivery".to_string()
}

fn default_package_type() -> String {
    "custom_box".to_string()
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            name: default_carrier_name(),
            service: default_service(),
            package_type: default_package_type(),
        }
    }
}

/// One destination country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CountryConfig {
    /// ISO-3166 alpha-2 code
    pub code: String,

    /// Display name
    pub name: String,

    /// Whether the store ships to this country
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Weight tiers, ascending by `min`
    #[serde(default)]
    pub tiers: Vec<TierConfig>,
}

/// One weight tier as written in config, in `weight_unit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TierConfig {
    /// Inclusive lower bound
    #[schemars(with = "DecimalValue")]
    pub min: Decimal,

    /// Exclusive upper bound; omitted for the open-ended top tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<DecimalValue>")]
    pub max: Option<Decimal>,

    /// Fixed price for the tier
    #[schemars(with = "DecimalValue")]
    pub price: Decimal,
}

/// Schema for decimal fields: written as a number, emitted as a string
#[derive(JsonSchema)]
#[serde(untagged)]
#[allow(dead_code)]
pub(crate) enum DecimalValue {
    Number(f64),
    Text(String),
}

/// Validation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableValidationConfig {
    /// Downgrade coverage gaps (and a bounded top tier) to warnings.
    /// Weights falling into a gap then fail with `NoMatchingTier`.
    #[serde(default)]
    pub allow_gaps: bool,
}

impl RatesConfig {
    /// Parse config from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Serialize config to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Parse config from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Serialize config to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a config file; `.json` is parsed as JSON, anything else as YAML
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        };
        parsed.map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn country(&self, code: &str) -> Option<&CountryConfig> {
        self.countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn enabled_countries(&self) -> impl Iterator<Item = &CountryConfig> {
        self.countries.iter().filter(|c| c.enabled)
    }
}
