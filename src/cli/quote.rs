//! `quote` command

use bpost_rates::*;
use std::path::Path;

pub fn cmd_quote(config: &Path, weight: &str, country: &str, json: bool) -> Result<()> {
    let engine = RateQuotationEngine::load(config)?;
    let weight: Weight = weight.parse()?;
    let quote = engine.quote_weight(&weight, country)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        println!(
            "{} {} to {}: {}",
            quote.carrier, quote.service, quote.country, quote.price
        );
        println!(
            "  Weight: {} g (tier {} {})",
            quote.weight_grams,
            quote.tier_index + 1,
            quote.tier
        );
        println!("  Table:  {}", quote.table_fingerprint);
    }
    Ok(())
}
