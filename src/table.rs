//! Immutable rate tables
//!
//! A `RateTable` is built once from a validated [`RatesConfig`] and never
//! mutated. Reconfiguration produces a new table (see
//! [`RateTable::with_country_tiers`]) which the engine swaps in whole.

use crate::config::{CarrierConfig, CountryConfig, RatesConfig, TierConfig};
use crate::country::{Country, CountryCode};
use crate::error::{Error, Result};
use crate::money::{Currency, Money};
use crate::quote::{Quote, QuoteError};
use crate::tier::{find_tier, WeightTier};
use crate::validate::{validate_config, ValidationReport};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// Tiers of one enabled country, in grams, ascending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRates {
    pub country: Country,
    pub tiers: Vec<WeightTier>,
}

/// Enabled countries and their tiers
#[derive(Debug, Clone)]
pub struct RateTable {
    countries: BTreeMap<CountryCode, CountryRates>,
    currency: Currency,
    carrier: CarrierConfig,
    fingerprint: String,
    built_at: DateTime<Utc>,
    source: RatesConfig,
}

impl RateTable {
    /// Validate `config` and build a table from it.
    ///
    /// Fails with [`Error::InvalidTable`] when validation reports errors.
    /// Warnings are logged and the table is built anyway.
    pub fn from_config(config: RatesConfig) -> Result<Self> {
        let report = validate_config(&config);
        Self::from_validated(config, &report)
    }

    /// Build from a config and the report already computed for it
    pub fn from_validated(config: RatesConfig, report: &ValidationReport) -> Result<Self> {
        if report.has_errors() {
            return Err(Error::InvalidTable {
                errors: report.error_count(),
                summary: report.error_summary(),
            });
        }
        for issue in &report.issues {
            warn!(code = %issue.code, country = ?issue.country, "{}", issue.message);
        }

        let mut countries = BTreeMap::new();
        for country in config.enabled_countries() {
            let code = CountryCode::parse(&country.code)
                .ok_or_else(|| Error::Config(format!("bad country code '{}'", country.code)))?;
            let tiers = country
                .tiers
                .iter()
                .map(|t| convert_tier(&config, t))
                .collect::<Result<Vec<_>>>()?;
            countries.insert(
                code.clone(),
                CountryRates {
                    country: Country::new(code, country.name.clone()),
                    tiers,
                },
            );
        }

        Ok(Self {
            countries,
            currency: config.currency.clone(),
            carrier: config.carrier.clone(),
            fingerprint: fingerprint(&config)?,
            built_at: Utc::now(),
            source: config,
        })
    }

    /// Load, validate and build from a YAML or JSON file
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_config(RatesConfig::load(path)?)
    }

    /// New table identical to this one except for `code`'s tiers.
    ///
    /// The country is enabled if it was not. An unknown code requires a
    /// display `name`.
    pub fn with_country_tiers(
        &self,
        code: &str,
        name: Option<&str>,
        tiers: Vec<TierConfig>,
    ) -> Result<Self> {
        let mut config = self.source.clone();
        match config
            .countries
            .iter_mut()
            .find(|c| c.code.eq_ignore_ascii_case(code))
        {
            Some(country) => {
                country.enabled = true;
                country.tiers = tiers;
                if let Some(name) = name {
                    country.name = name.to_string();
                }
            }
            None => {
                let name = name.ok_or_else(|| {
                    Error::Config(format!("country '{}' is new and needs a name", code))
                })?;
                config.countries.push(CountryConfig {
                    code: code.to_string(),
                    name: name.to_string(),
                    enabled: true,
                    tiers,
                });
            }
        }
        Self::from_config(config)
    }

    /// Resolve a code or display name among enabled countries.
    /// A blank destination never resolves.
    pub fn resolve(&self, destination: &str) -> Option<&CountryRates> {
        if destination.trim().is_empty() {
            return None;
        }
        if let Some(rates) = CountryCode::parse(destination).and_then(|c| self.countries.get(&c)) {
            return Some(rates);
        }
        self.countries
            .values()
            .find(|r| r.country.matches(destination))
    }

    /// Quote a weight already expressed in grams.
    ///
    /// The destination is checked before the weight.
    pub fn quote_grams(
        &self,
        grams: Decimal,
        destination: &str,
    ) -> std::result::Result<Quote, QuoteError> {
        let rates = self
            .resolve(destination)
            .ok_or_else(|| QuoteError::UnsupportedDestination(destination.to_string()))?;

        if grams.is_sign_negative() && !grams.is_zero() {
            return Err(QuoteError::InvalidWeight(format!("{} g is negative", grams)));
        }

        let (tier_index, tier) =
            find_tier(&rates.tiers, grams).ok_or_else(|| QuoteError::NoMatchingTier {
                country: rates.country.code.to_string(),
                grams,
            })?;

        Ok(Quote {
            price: Money::new(tier.price, &self.currency),
            country: rates.country.clone(),
            weight_grams: grams,
            tier: tier.clone(),
            tier_index,
            carrier: self.carrier.name.clone(),
            service: self.carrier.service.clone(),
            table_fingerprint: self.fingerprint.clone(),
        })
    }

    /// Enabled countries in code order
    pub fn enabled_countries(&self) -> Vec<Country> {
        self.countries.values().map(|r| r.country.clone()).collect()
    }

    pub fn rates(&self, code: &CountryCode) -> Option<&CountryRates> {
        self.countries.get(code)
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn carrier(&self) -> &CarrierConfig {
        &self.carrier
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// The config this table was built from
    pub fn source(&self) -> &RatesConfig {
        &self.source
    }
}

fn convert_tier(config: &RatesConfig, tier: &TierConfig) -> Result<WeightTier> {
    let factor = config.weight_unit.grams_per_unit();
    let to_grams = |value: Decimal| {
        value.checked_mul(factor).ok_or_else(|| {
            Error::Config(format!("tier bound {} {} overflows", value, config.weight_unit))
        })
    };
    Ok(WeightTier::new(
        to_grams(tier.min)?,
        tier.max.map(to_grams).transpose()?,
        config.currency.round(tier.price),
    ))
}

fn fingerprint(config: &RatesConfig) -> Result<String> {
    let content = serde_json::to_vec(config)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("sha256:{}", hex::encode(&hasher.finalize()[..8])))
}
