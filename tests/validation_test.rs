//! Coded rate table validation issues and their severities

use bpost_rates::{validate_config, RatesConfig, Severity, ValidationReport};
use rstest::rstest;

const BELGIUM: &str = r#"
  - code: BE
    name: Belgium
    tiers:
      - { min: 0, price: 10 }
"#;

fn report(yaml: &str) -> ValidationReport {
    validate_config(&RatesConfig::from_yaml(yaml).unwrap())
}

fn countries(entries: &str) -> String {
    format!("countries:{}", entries)
}

#[rstest]
#[case::duplicate_code(
    countries(&format!("{}{}", BELGIUM, "  - { code: be, name: Belgique, tiers: [{ min: 0, price: 11 }] }\n")),
    "T003",
    Severity::Error
)]
#[case::no_tiers(countries("\n  - { code: BE, name: Belgium }\n"), "T004", Severity::Error)]
#[case::bounded_top_tier(
    countries("\n  - { code: BE, name: Belgium, tiers: [{ min: 0, max: 100, price: 5 }] }\n"),
    "T008",
    Severity::Error
)]
#[case::bounded_top_tier_allowed(
    format!(
        "validation: {{ allow_gaps: true }}\n{}",
        countries("\n  - { code: BE, name: Belgium, tiers: [{ min: 0, max: 100, price: 5 }] }\n")
    ),
    "T008",
    Severity::Warning
)]
#[case::empty_tier(
    countries("\n  - { code: BE, name: Belgium, tiers: [{ min: 0, max: 0, price: 5 }, { min: 0, price: 9 }] }\n"),
    "T009",
    Severity::Error
)]
#[case::negative_price(
    countries("\n  - { code: BE, name: Belgium, tiers: [{ min: 0, price: -1 }] }\n"),
    "T010",
    Severity::Error
)]
#[case::unsupported_version(format!("version: 2\n{}", countries(BELGIUM)), "T013", Severity::Error)]
#[case::bad_currency(
    format!("currency: {{ code: EURO }}\n{}", countries(BELGIUM)),
    "T014",
    Severity::Error
)]
#[case::blank_name(
    countries("\n  - { code: BE, name: \"   \", tiers: [{ min: 0, price: 10 }] }\n"),
    "T015",
    Severity::Error
)]
#[case::empty_name(
    countries("\n  - { code: BE, name: \"\", tiers: [{ min: 0, price: 10 }] }\n"),
    "T015",
    Severity::Error
)]
#[case::shared_name(
    countries(&format!("{}{}", BELGIUM, "  - { code: FR, name: BELGIUM, tiers: [{ min: 0, price: 15 }] }\n")),
    "T016",
    Severity::Error
)]
fn test_issue_code_and_severity(
    #[case] yaml: String,
    #[case] code: &str,
    #[case] severity: Severity,
) {
    let report = report(&yaml);
    assert!(report.has_code(code), "{:?}", report.issues);
    assert!(
        report
            .issues
            .iter()
            .any(|i| i.code == code && i.severity == severity),
        "{} not reported as {:?}: {:?}",
        code,
        severity,
        report.issues
    );
    assert_eq!(report.has_errors(), severity == Severity::Error);
}

#[test]
fn test_shipped_rate_table_is_clean() {
    let report = report(include_str!("../rates/home_delivery.yaml"));
    assert!(report.issues.is_empty(), "{:?}", report.issues);
}

#[test]
fn test_same_name_on_disabled_country_is_allowed() {
    let report = report(&countries(&format!(
        "{}{}",
        BELGIUM, "  - { code: NL, name: belgium, enabled: false }\n"
    )));
    assert!(!report.has_code("T016"), "{:?}", report.issues);
    assert!(!report.has_errors());
}
