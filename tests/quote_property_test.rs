//! Property-based tests for quoting
//!
//! Uses proptest to generate contiguous tier tables and weights

use bpost_rates::{
    CountryConfig, QuoteError, RateQuotationEngine, RatesConfig, TierConfig, Weight,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strictly increasing tier boundaries and one price per tier
fn any_tiers() -> impl Strategy<Value = Vec<TierConfig>> {
    prop::collection::vec((1u32..5_000, 0u32..10_000), 1..6).prop_map(|steps| {
        let mut tiers = Vec::with_capacity(steps.len());
        let mut min = Decimal::ZERO;
        let last = steps.len() - 1;
        for (i, (width, cents)) in steps.into_iter().enumerate() {
            let max = (i < last).then(|| min + Decimal::from(width));
            tiers.push(TierConfig {
                min,
                max,
                price: Decimal::new(i64::from(cents), 2),
            });
            if let Some(max) = max {
                min = max;
            }
        }
        tiers
    })
}

fn engine_with(tiers: Vec<TierConfig>) -> RateQuotationEngine {
    let config = RatesConfig {
        countries: vec![CountryConfig {
            code: "BE".into(),
            name: "Belgium".into(),
            enabled: true,
            tiers,
        }],
        ..RatesConfig::from_yaml("{}").unwrap()
    };
    RateQuotationEngine::from_config(config).unwrap()
}

proptest! {
    #[test]
    fn test_every_weight_matches_exactly_one_tier(
        tiers in any_tiers(),
        weight in 0.0f64..1_000_000.0,
    ) {
        let engine = engine_with(tiers.clone());
        let quote = engine.quote(weight, "BE").unwrap();

        let grams = quote.weight_grams;
        let matching = tiers
            .iter()
            .filter(|t| grams >= t.min && t.max.is_none_or(|max| grams < max))
            .count();
        prop_assert_eq!(matching, 1);
        prop_assert_eq!(quote.amount(), tiers[quote.tier_index].price);
    }

    #[test]
    fn test_boundaries_belong_to_upper_tier(tiers in any_tiers()) {
        let engine = engine_with(tiers.clone());
        for (i, tier) in tiers.iter().enumerate().skip(1) {
            let at = engine.quote_weight(&Weight::grams(tier.min), "BE").unwrap();
            prop_assert_eq!(at.tier_index, i);
            prop_assert_eq!(at.amount(), tier.price);

            let below = tier.min - Decimal::new(1, 3);
            let below = engine.quote_weight(&Weight::grams(below), "BE").unwrap();
            prop_assert_eq!(below.tier_index, i - 1);
        }
    }

    #[test]
    fn test_quotes_are_deterministic(tiers in any_tiers(), weight in 0.0f64..100_000.0) {
        let engine = engine_with(tiers);
        prop_assert_eq!(engine.quote(weight, "BE"), engine.quote(weight, "BE"));
    }

    #[test]
    fn test_unsupported_destination_for_any_weight(weight in any::<f64>()) {
        let engine = engine_with(vec![TierConfig {
            min: Decimal::ZERO,
            max: None,
            price: Decimal::TEN,
        }]);
        prop_assert_eq!(
            engine.quote(weight, "DE"),
            Err(QuoteError::UnsupportedDestination("DE".to_string()))
        );
    }
}
