//! Table replacement and reloading

use bpost_rates::{Error, QuoteError, RateQuotationEngine, RateTable, RatesConfig, TierConfig};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use std::io::Write;
use std::sync::Arc;

const HOME_DELIVERY: &str = include_str!("../rates/home_delivery.yaml");

fn engine() -> RateQuotationEngine {
    RateQuotationEngine::from_config(RatesConfig::from_yaml(HOME_DELIVERY).unwrap()).unwrap()
}

fn flat(price: rust_decimal::Decimal) -> Vec<TierConfig> {
    vec![TierConfig {
        min: dec!(0),
        max: None,
        price,
    }]
}

fn write_config(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_replace_country_changes_later_quotes_only() {
    let engine = engine();
    let before = engine.quote(1000.0, "BE").unwrap();

    engine.replace_country("BE", None, flat(dec!(12.50))).unwrap();

    let after = engine.quote(1000.0, "BE").unwrap();
    assert_eq!(after.amount(), dec!(12.50));
    assert_ne!(after.table_fingerprint, before.table_fingerprint);

    // The quote returned earlier is untouched
    assert_eq!(before.amount(), dec!(10));

    // Other countries keep their tiers
    assert_eq!(engine.quote(100.0, "FR").unwrap().amount(), dec!(15));
}

#[test]
fn test_replace_country_rejects_invalid_tiers() {
    let engine = engine();
    let fingerprint = engine.snapshot().fingerprint().to_string();

    let gap = vec![
        TierConfig {
            min: dec!(0),
            max: Some(dec!(100)),
            price: dec!(5),
        },
        TierConfig {
            min: dec!(200),
            max: None,
            price: dec!(9),
        },
    ];
    let err = engine.replace_country("BE", None, gap).unwrap_err();
    assert!(matches!(err, Error::InvalidTable { .. }));
    assert_eq!(engine.snapshot().fingerprint(), fingerprint);
}

#[test]
fn test_enabling_a_new_country() {
    let engine = engine();
    assert!(engine.quote(500.0, "NL").is_err());

    engine
        .replace_country("NL", Some("Netherlands"), flat(dec!(18)))
        .unwrap();

    assert_eq!(engine.quote(500.0, "Netherlands").unwrap().amount(), dec!(18));
    assert_eq!(engine.enabled_countries().len(), 4);
}

#[test]
fn test_snapshot_survives_swap() {
    let engine = engine();
    let old = engine.snapshot();

    let mut config = old.source().clone();
    config.countries.retain(|c| c.code != "IT");
    engine.replace_table(RateTable::from_config(config).unwrap());

    assert!(old.resolve("Italy").is_some());
    assert_eq!(
        engine.quote(400.0, "Italy"),
        Err(QuoteError::UnsupportedDestination("Italy".to_string()))
    );
}

#[test]
fn test_reload_from_yaml_and_json() {
    let engine = engine();

    let yaml = HOME_DELIVERY.replace("price: 45", "price: 50");
    let file = write_config(&yaml, ".yaml");
    engine.reload_from_path(file.path()).unwrap();
    assert_eq!(engine.quote(400.0, "IT").unwrap().amount(), dec!(50));

    let mut config = RatesConfig::from_yaml(HOME_DELIVERY).unwrap();
    config.countries[2].tiers = flat(dec!(55));
    let file = write_config(&config.to_json().unwrap(), ".json");
    engine.reload_from_path(file.path()).unwrap();
    assert_eq!(engine.quote(400.0, "IT").unwrap().amount(), dec!(55));
}

#[test]
fn test_failed_reload_keeps_current_table() {
    let engine = engine();
    let current = engine.snapshot();

    let file = write_config("countries:\n  - code: BE\n    name: Belgium\n", ".yaml");
    let err = engine.reload_from_path(file.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidTable { .. }));

    let missing = file.path().with_extension("missing");
    assert!(engine.reload_from_path(&missing).is_err());

    assert!(Arc::ptr_eq(&engine.snapshot(), &current));
    assert_eq!(engine.quote(1000.0, "BE").unwrap().amount(), dec!(10));
}

#[test]
fn test_concurrent_quotes_see_whole_tables() {
    let engine = engine();

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..500 {
                    let quote = engine.quote(3500.0, "BE").unwrap();
                    let price = quote.amount();
                    assert!(price == dec!(20) || price == dec!(30), "torn price {}", price);
                }
            });
        }
        s.spawn(|| {
            for i in 0..50 {
                let price = if i % 2 == 0 { dec!(30) } else { dec!(20) };
                let tiers = vec![
                    TierConfig {
                        min: dec!(0),
                        max: Some(dec!(3000)),
                        price: dec!(10),
                    },
                    TierConfig {
                        min: dec!(3000),
                        max: None,
                        price,
                    },
                ];
                engine.replace_country("BE", None, tiers).unwrap();
            }
        });
    });
}
