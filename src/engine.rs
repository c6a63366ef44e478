//! Rate quotation engine
//!
//! Holds the current [`RateTable`] behind an [`ArcSwap`]. Quoting loads the
//! table without locking; reconfiguration builds a complete new table and
//! swaps it in atomically. Quotes own their data, so a swap never changes a
//! quote that was already returned.

use crate::config::{RatesConfig, TierConfig};
use crate::country::Country;
use crate::error::Result;
use crate::package::Package;
use crate::quote::{Quote, QuoteError};
use crate::table::RateTable;
use crate::weight::Weight;
use arc_swap::ArcSwap;
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

type QuoteResult = std::result::Result<Quote, QuoteError>;

#[derive(Debug)]
pub struct RateQuotationEngine {
    table: ArcSwap<RateTable>,
}

impl RateQuotationEngine {
    pub fn new(table: RateTable) -> Self {
        info!(
            fingerprint = %table.fingerprint(),
            countries = table.enabled_countries().len(),
            "rate table loaded"
        );
        Self {
            table: ArcSwap::from_pointee(table),
        }
    }

    pub fn from_config(config: RatesConfig) -> Result<Self> {
        Ok(Self::new(RateTable::from_config(config)?))
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(RateTable::load(path)?))
    }

    /// Quote a weight in grams for a destination code or name.
    ///
    /// Unknown destinations are rejected before the weight is looked at.
    pub fn quote(&self, weight_grams: f64, destination: &str) -> QuoteResult {
        let table = self.table.load();
        ensure_destination(&table, destination)?;

        let grams = grams_from_f64(weight_grams).map_err(reject)?;
        quote_on(&table, grams, destination)
    }

    /// Quote a weight in any unit
    pub fn quote_weight(&self, weight: &Weight, destination: &str) -> QuoteResult {
        let table = self.table.load();
        ensure_destination(&table, destination)?;

        let grams = match weight.to_grams() {
            Some(grams) => grams,
            None if weight.number.is_sign_positive() => Decimal::MAX,
            None => return Err(reject(QuoteError::InvalidWeight(format!("{} overflows", weight)))),
        };
        quote_on(&table, grams, destination)
    }

    /// Quote the total weight of a package
    pub fn quote_package(&self, package: &Package, destination: &str) -> QuoteResult {
        let table = self.table.load();
        ensure_destination(&table, destination)?;

        let grams = package.total_grams().ok_or_else(|| {
            reject(QuoteError::InvalidWeight(
                "package weight overflows".to_string(),
            ))
        })?;
        debug!(
            items = package.items.len(),
            package_type = package
                .package_type
                .as_deref()
                .unwrap_or(&table.carrier().package_type),
            grams = %grams,
            "package weighed"
        );
        quote_on(&table, grams, destination)
    }

    /// The table quotes are currently computed against
    pub fn snapshot(&self) -> Arc<RateTable> {
        self.table.load_full()
    }

    /// Enabled countries, for gating a destination selector
    pub fn enabled_countries(&self) -> Vec<Country> {
        self.table.load().enabled_countries()
    }

    /// Swap in a new table, returning the previous one
    pub fn replace_table(&self, table: RateTable) -> Arc<RateTable> {
        let new_fingerprint = table.fingerprint().to_string();
        let previous = self.table.swap(Arc::new(table));
        info!(
            from = %previous.fingerprint(),
            to = %new_fingerprint,
            "rate table replaced"
        );
        previous
    }

    /// Load a config file and swap it in. On failure the current table
    /// stays active.
    pub fn reload_from_path(&self, path: &Path) -> Result<()> {
        match RateTable::load(path) {
            Ok(table) => {
                self.replace_table(table);
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "rate table reload rejected");
                Err(e)
            }
        }
    }

    /// Replace one country's tiers by swapping in a rebuilt table.
    ///
    /// Retries if another writer swapped the table in between.
    pub fn replace_country(
        &self,
        code: &str,
        name: Option<&str>,
        tiers: Vec<TierConfig>,
    ) -> Result<()> {
        loop {
            let current = self.table.load_full();
            let next = Arc::new(current.with_country_tiers(code, name, tiers.clone())?);
            let next_fingerprint = next.fingerprint().to_string();
            let previous = self.table.compare_and_swap(&current, next);
            if Arc::ptr_eq(&*previous, &current) {
                info!(
                    country = %code,
                    from = %current.fingerprint(),
                    to = %next_fingerprint,
                    "country tiers replaced"
                );
                return Ok(());
            }
            debug!(country = %code, "rate table changed concurrently, retrying");
        }
    }
}

fn ensure_destination(table: &RateTable, destination: &str) -> std::result::Result<(), QuoteError> {
    match table.resolve(destination) {
        Some(_) => Ok(()),
        None => Err(reject(QuoteError::UnsupportedDestination(
            destination.to_string(),
        ))),
    }
}

/// Finite weights beyond the decimal range saturate: heavier than any
/// bounded tier, or below the smallest representable gram.
fn grams_from_f64(weight_grams: f64) -> std::result::Result<Decimal, QuoteError> {
    if !weight_grams.is_finite() {
        return Err(QuoteError::InvalidWeight(format!(
            "{} is not a finite number",
            weight_grams
        )));
    }
    match Decimal::try_from(weight_grams) {
        Ok(grams) => Ok(grams),
        Err(_) if weight_grams >= 1.0 => Ok(Decimal::MAX),
        Err(_) if weight_grams > 0.0 => Ok(Decimal::ZERO),
        Err(_) => Err(QuoteError::InvalidWeight(format!(
            "{:e} g is negative",
            weight_grams
        ))),
    }
}

fn quote_on(table: &RateTable, grams: Decimal, destination: &str) -> QuoteResult {
    match table.quote_grams(grams, destination) {
        Ok(quote) => {
            debug!(
                country = %quote.country.code,
                grams = %grams,
                tier = quote.tier_index,
                price = %quote.price,
                "quoted"
            );
            Ok(quote)
        }
        Err(e @ QuoteError::NoMatchingTier { .. }) => {
            error!(
                fingerprint = %table.fingerprint(),
                error = %e,
                "rate table does not cover weight"
            );
            Err(e)
        }
        Err(e) => Err(reject(e)),
    }
}

fn reject(e: QuoteError) -> QuoteError {
    debug!(error = %e, "quote rejected");
    e
}
