// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # bpost-rates: home delivery rate quotation
//!
//! Computes the price of the BPost "Home delivery" shipping method from a
//! package weight and a destination country, using a tiered rate table
//! supplied as configuration.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bpost_rates::{RateQuotationEngine, RatesConfig};
//!
//! let config = RatesConfig::from_yaml(r#"
//!   currency: { code: EUR }
//!   countries:
//!     - code: BE
//!       name: Belgium
//!       tiers:
//!         - { min: 0, max: 3000, price: 10 }
//!         - { min: 3000, price: 20 }
//!     - code: FR
//!       name: France
//!       tiers:
//!         - { min: 0, max: 400, price: 15 }
//!         - { min: 400, price: 25 }
//! "#)?;
//!
//! let engine = RateQuotationEngine::from_config(config)?;
//! let quote = engine.quote(1000.0, "Belgium")?;
//! assert_eq!(quote.price.to_string(), "10.00 EUR");
//!
//! // Countries the store has not enabled are rejected outright
//! assert!(engine.quote(1000.0, "DE").is_err());
//! ```
//!
//! ## Rate Tables
//!
//! Each enabled country owns an ordered list of weight tiers. A tier is the
//! half-open range `[min, max)` in grams with a fixed price; the top tier is
//! open-ended. Tiers must start at 0, touch end to end, and never overlap,
//! so every non-negative weight lands in exactly one tier:
//!
//! ```text
//!   BE   0 ───────── 3000 ─────────────▶
//!           10 EUR         20 EUR
//!   FR   0 ── 400 ─────────────────────▶
//!         15 EUR        25 EUR
//! ```
//!
//! Tables are immutable. [`RateQuotationEngine`] swaps whole tables on
//! reconfiguration, so concurrent quoting never observes a half-applied
//! change.

pub mod config;
pub mod country;
pub mod engine;
pub mod error;
pub mod logger;
pub mod money;
pub mod package;
pub mod quote;
pub mod table;
pub mod tier;
pub mod validate;
pub mod weight;

// Re-exports
pub use config::{CarrierConfig, CountryConfig, RatesConfig, TableValidationConfig, TierConfig};
pub use country::{Country, CountryCode};
pub use engine::RateQuotationEngine;
pub use error::{Error, Result};
pub use money::{Currency, Money};
pub use package::{Package, PackageItem};
pub use quote::{Quote, QuoteError};
pub use table::{CountryRates, RateTable};
pub use tier::WeightTier;
pub use validate::{validate_config, Severity, TableIssue, ValidationReport};
pub use weight::{Weight, WeightUnit};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
