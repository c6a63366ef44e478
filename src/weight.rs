//! Physical weights
//!
//! Tier bounds and package weights are normalised to grams before any
//! lookup. Conversion factors are exact decimals.

use crate::error::{Error, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const GRAMS_PER_KILOGRAM: Decimal = dec!(1000);
const GRAMS_PER_OUNCE: Decimal = dec!(28.349523125);
const GRAMS_PER_POUND: Decimal = dec!(453.59237);

/// Unit of a weight value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    G,
    Kg,
    Oz,
    Lb,
}

impl WeightUnit {
    pub fn grams_per_unit(self) -> Decimal {
        match self {
            WeightUnit::G => Decimal::ONE,
            WeightUnit::Kg => GRAMS_PER_KILOGRAM,
            WeightUnit::Oz => GRAMS_PER_OUNCE,
            WeightUnit::Lb => GRAMS_PER_POUND,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::G => "g",
            WeightUnit::Kg => "kg",
            WeightUnit::Oz => "oz",
            WeightUnit::Lb => "lb",
        }
    }
}

impl FromStr for WeightUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "g" | "gram" | "grams" => Ok(WeightUnit::G),
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "oz" | "ounce" | "ounces" => Ok(WeightUnit::Oz),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Lb),
            other => Err(Error::WeightParse(format!("unknown weight unit '{}'", other))),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weight with its unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Weight {
    #[schemars(with = "crate::config::DecimalValue")]
    pub number: Decimal,
    #[serde(default)]
    pub unit: WeightUnit,
}

impl Weight {
    pub fn new(number: Decimal, unit: WeightUnit) -> Self {
        Self { number, unit }
    }

    pub fn grams(number: Decimal) -> Self {
        Self::new(number, WeightUnit::G)
    }

    /// Exact value in grams, `None` on overflow
    pub fn to_grams(&self) -> Option<Decimal> {
        self.number.checked_mul(self.unit.grams_per_unit())
    }

    pub fn is_negative(&self) -> bool {
        self.number.is_sign_negative() && !self.number.is_zero()
    }
}

/// Parses `"400"`, `"400 g"`, `"1.5kg"`, `"12 oz"`. A bare number is grams.
impl FromStr for Weight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (number, unit) = s.split_at(split);
        let number = number.trim();
        if number.is_empty() {
            return Err(Error::WeightParse(format!("missing number in '{}'", s)));
        }
        let number = Decimal::from_str(number)
            .map_err(|e| Error::WeightParse(format!("invalid number '{}': {}", number, e)))?;
        let unit = if unit.trim().is_empty() {
            WeightUnit::G
        } else {
            unit.parse()?
        };
        Ok(Weight::new(number, unit))
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_number_is_grams() {
        let w: Weight = "400".parse().unwrap();
        assert_eq!(w, Weight::grams(dec!(400)));
    }

    #[test]
    fn test_parse_with_units() {
        let w: Weight = "1.5kg".parse().unwrap();
        assert_eq!(w.to_grams(), Some(dec!(1500)));

        let w: Weight = " 2 lb ".parse().unwrap();
        assert_eq!(w.unit, WeightUnit::Lb);
        assert_eq!(w.to_grams(), Some(dec!(907.18474)));

        let w: Weight = "1 oz".parse().unwrap();
        assert_eq!(w.to_grams(), Some(dec!(28.349523125)));
    }

    #[test]
    fn test_parse_errors() {
        assert!("kg".parse::<Weight>().is_err());
        assert!("12 stone".parse::<Weight>().is_err());
        assert!("1.2.3 g".parse::<Weight>().is_err());
    }

    #[test]
    fn test_negative() {
        let w: Weight = "-1 g".parse().unwrap();
        assert!(w.is_negative());
        assert!(!Weight::grams(Decimal::ZERO).is_negative());
    }

    #[test]
    fn test_unit_serde_names() {
        let unit: WeightUnit = serde_json::from_str("\"kg\"").unwrap();
        assert_eq!(unit, WeightUnit::Kg);
        assert_eq!(serde_json::to_string(&WeightUnit::G).unwrap(), "\"g\"");
    }
}
