//! Rate config commands

use bpost_rates::*;
use std::path::Path;

pub fn cmd_validate(config: &Path, json: bool) -> Result<()> {
    let rates = RatesConfig::load(config)?;
    let report = validate_config(&rates);

    if json {
        let output = serde_json::json!({
            "valid": !report.has_errors(),
            "errors": report.error_count(),
            "warnings": report.warning_count(),
            "issues": report.issues,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if report.issues.is_empty() {
        println!("✓ Rate table is valid");
    } else {
        for issue in &report.issues {
            let (prefix, level) = match issue.severity {
                Severity::Error => ("✗", "ERROR"),
                Severity::Warning => ("⚠", "WARN"),
            };
            println!("{} {} {}", prefix, level, issue);
        }

        println!();
        if report.has_errors() {
            println!(
                "✗ {} error(s), {} warning(s)",
                report.error_count(),
                report.warning_count()
            );
        } else {
            println!("✓ {} warning(s) (no errors)", report.warning_count());
        }
    }

    if report.has_errors() {
        return Err(Error::InvalidTable {
            errors: report.error_count(),
            summary: report.error_summary(),
        });
    }
    Ok(())
}

pub fn cmd_countries(config: &Path, json: bool) -> Result<()> {
    let table = RateTable::load(config)?;

    if json {
        let countries: Vec<_> = table
            .enabled_countries()
            .into_iter()
            .filter_map(|country| {
                let rates = table.rates(&country.code)?;
                Some(serde_json::json!({
                    "code": country.code,
                    "name": country.name,
                    "tiers": rates.tiers,
                }))
            })
            .collect();
        let output = serde_json::json!({
            "currency": table.currency().code,
            "fingerprint": table.fingerprint(),
            "built_at": table.built_at().to_rfc3339(),
            "countries": countries,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} ({}, built {})",
        table.carrier().service,
        table.fingerprint(),
        table.built_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
    for country in table.enabled_countries() {
        println!("{}", country);
        if let Some(rates) = table.rates(&country.code) {
            for tier in &rates.tiers {
                println!("  {:<24} {} {}", tier.to_string(), tier.price, table.currency().code);
            }
        }
    }
    Ok(())
}

pub fn cmd_schema() -> Result<()> {
    let schema = schemars::schema_for!(RatesConfig);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
