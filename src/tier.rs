//! Weight tiers
//!
//! A tier is the half-open interval `[min, max)` in grams; `max = None`
//! means unbounded above. A weight sitting exactly on a boundary belongs
//! to the upper tier.

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WeightTier {
    /// Inclusive lower bound in grams
    #[schemars(with = "String")]
    pub min_grams: Decimal,

    /// Exclusive upper bound in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub max_grams: Option<Decimal>,

    /// Price, already rounded to the currency precision
    #[schemars(with = "String")]
    pub price: Decimal,
}

impl WeightTier {
    pub fn new(min_grams: Decimal, max_grams: Option<Decimal>, price: Decimal) -> Self {
        Self {
            min_grams,
            max_grams,
            price,
        }
    }

    pub fn contains(&self, grams: Decimal) -> bool {
        grams >= self.min_grams && self.max_grams.is_none_or(|max| grams < max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_grams.is_none()
    }
}

impl fmt::Display for WeightTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_grams {
            Some(max) => write!(f, "[{} g, {} g)", self.min_grams, max),
            None => write!(f, "[{} g, inf)", self.min_grams),
        }
    }
}

/// First tier containing `grams`, scanning in order
pub fn find_tier(tiers: &[WeightTier], grams: Decimal) -> Option<(usize, &WeightTier)> {
    tiers.iter().enumerate().find(|(_, t)| t.contains(grams))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn belgium() -> Vec<WeightTier> {
        vec![
            WeightTier::new(dec!(0), Some(dec!(3000)), dec!(10)),
            WeightTier::new(dec!(3000), None, dec!(20)),
        ]
    }

    #[test]
    fn test_boundary_belongs_to_upper_tier() {
        let tiers = belgium();
        assert_eq!(find_tier(&tiers, dec!(2999)).unwrap().1.price, dec!(10));
        assert_eq!(find_tier(&tiers, dec!(2999.999)).unwrap().1.price, dec!(10));
        assert_eq!(find_tier(&tiers, dec!(3000)).unwrap().1.price, dec!(20));
    }

    #[test]
    fn test_unbounded_top_tier() {
        let tiers = belgium();
        let (index, tier) = find_tier(&tiers, dec!(1000000000)).unwrap();
        assert_eq!(index, 1);
        assert!(tier.is_unbounded());
    }

    #[test]
    fn test_gap_finds_nothing() {
        let tiers = vec![
            WeightTier::new(dec!(0), Some(dec!(100)), dec!(5)),
            WeightTier::new(dec!(200), None, dec!(9)),
        ];
        assert!(find_tier(&tiers, dec!(150)).is_none());
    }

    #[test]
    fn test_display() {
        let tiers = belgium();
        assert_eq!(tiers[0].to_string(), "[0 g, 3000 g)");
        assert_eq!(tiers[1].to_string(), "[3000 g, inf)");
    }
}
