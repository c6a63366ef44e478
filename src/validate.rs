//! Rate table validation
//!
//! Checks a [`RatesConfig`] before it may become a rate table:
//! - at least one enabled country, well-formed and unique codes
//! - enabled countries have distinct, non-blank display names
//! - tiers per country start at 0, are sorted, contiguous, non-overlapping
//!   and end unbounded (total coverage of `[0, inf)`)
//! - prices are non-negative and fit the currency precision

use crate::config::{CountryConfig, RatesConfig, CONFIG_VERSION};
use crate::country::CountryCode;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A validation issue found in a rates config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableIssue {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    /// Country the issue belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl TableIssue {
    pub fn error(code: &str, message: &str, country: Option<&str>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.to_string(),
            message: message.to_string(),
            country: country.map(str::to_string),
        }
    }

    pub fn warning(code: &str, message: &str, country: Option<&str>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            message: message.to_string(),
            country: country.map(str::to_string),
        }
    }
}

impl std::fmt::Display for TableIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.country {
            Some(country) => write!(f, "[{}] {}: {}", self.code, country, self.message),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Result of rate table validation
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    pub issues: Vec<TableIssue>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }

    /// Errors joined into one line
    pub fn error_summary(&self) -> String {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validate a rates config
pub fn validate_config(config: &RatesConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if config.version != CONFIG_VERSION {
        report.issues.push(TableIssue::error(
            "T013",
            &format!("Unsupported config version: {}", config.version),
            None,
        ));
    }

    if !config.currency.is_valid_code() {
        report.issues.push(TableIssue::error(
            "T014",
            &format!(
                "Currency code '{}' is not three upper-case ASCII letters",
                config.currency.code
            ),
            None,
        ));
    }

    if config.enabled_countries().next().is_none() {
        report
            .issues
            .push(TableIssue::error("T001", "No country is enabled", None));
    }

    let mut seen = HashSet::new();
    let mut names = HashSet::new();
    for country in &config.countries {
        let label = country.code.as_str();

        match CountryCode::parse(&country.code) {
            Some(code) => {
                if !seen.insert(code) {
                    report.issues.push(TableIssue::error(
                        "T003",
                        "Duplicate country code",
                        Some(label),
                    ));
                }
            }
            None => {
                report.issues.push(TableIssue::error(
                    "T002",
                    "Country code is not two ASCII letters",
                    Some(label),
                ));
            }
        }

        if country.enabled {
            let name = country.name.trim();
            if name.is_empty() {
                report.issues.push(TableIssue::error(
                    "T015",
                    "Enabled country has a blank display name",
                    Some(label),
                ));
            } else if !names.insert(name.to_lowercase()) {
                report.issues.push(TableIssue::error(
                    "T016",
                    &format!("Display name '{}' is used by another enabled country", name),
                    Some(label),
                ));
            }
            check_tiers(config, country, &mut report);
        } else if !country.tiers.is_empty() {
            report.issues.push(TableIssue::warning(
                "T012",
                "Country is disabled but still has tiers; they are ignored",
                Some(label),
            ));
        }
    }

    report
}

fn check_tiers(config: &RatesConfig, country: &CountryConfig, report: &mut ValidationReport) {
    let label = Some(country.code.as_str());
    let coverage = |code: &str, message: String| {
        if config.validation.allow_gaps {
            TableIssue::warning(code, &message, label)
        } else {
            TableIssue::error(code, &message, label)
        }
    };

    let Some(first) = country.tiers.first() else {
        report
            .issues
            .push(TableIssue::error("T004", "Enabled country has no tiers", label));
        return;
    };

    if !first.min.is_zero() {
        report.issues.push(TableIssue::error(
            "T005",
            &format!("First tier starts at {} instead of 0", first.min),
            label,
        ));
    }

    for (i, tier) in country.tiers.iter().enumerate() {
        if tier.min < Decimal::ZERO {
            report.issues.push(TableIssue::error(
                "T009",
                &format!("Tier {} has a negative lower bound {}", i + 1, tier.min),
                label,
            ));
        }
        if let Some(max) = tier.max {
            if max <= tier.min {
                report.issues.push(TableIssue::error(
                    "T009",
                    &format!("Tier {} is empty: max {} <= min {}", i + 1, max, tier.min),
                    label,
                ));
            }
        }
        if tier.price < Decimal::ZERO {
            report.issues.push(TableIssue::error(
                "T010",
                &format!("Tier {} has a negative price {}", i + 1, tier.price),
                label,
            ));
        } else if config.currency.exceeds_precision(tier.price) {
            report.issues.push(TableIssue::warning(
                "T011",
                &format!(
                    "Tier {} price {} exceeds {} precision and will be rounded",
                    i + 1,
                    tier.price,
                    config.currency.code
                ),
                label,
            ));
        }
    }

    for (i, pair) in country.tiers.windows(2).enumerate() {
        let (lower, upper) = (&pair[0], &pair[1]);
        match lower.max {
            None => {
                report.issues.push(TableIssue::error(
                    "T007",
                    &format!("Unbounded tier {} is followed by tier {}", i + 1, i + 2),
                    label,
                ));
            }
            Some(max) if upper.min < max => {
                report.issues.push(TableIssue::error(
                    "T007",
                    &format!(
                        "Tier {} starts at {} before tier {} ends at {}",
                        i + 2,
                        upper.min,
                        i + 1,
                        max
                    ),
                    label,
                ));
            }
            Some(max) if upper.min > max => {
                report.issues.push(coverage(
                    "T006",
                    format!("Weights in [{}, {}) match no tier", max, upper.min),
                ));
            }
            Some(_) => {}
        }
    }

    if let Some(last) = country.tiers.last() {
        if let Some(max) = last.max {
            report.issues.push(coverage(
                "T008",
                format!("Last tier is bounded at {}; heavier weights match no tier", max),
            ));
        }
    }
}
