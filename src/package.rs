//! Packages
//!
//! A shipment's weight is the sum of its items' unit weights times their
//! quantities.

use crate::weight::Weight;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PackageItem {
    /// Weight of one unit
    pub weight: Weight,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl PackageItem {
    pub fn new(weight: Weight, quantity: u32) -> Self {
        Self { weight, quantity }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Package {
    /// Package type id; the carrier default is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    #[serde(default)]
    pub items: Vec<PackageItem>,
}

impl Package {
    pub fn new(items: Vec<PackageItem>) -> Self {
        Self {
            package_type: None,
            items,
        }
    }

    pub fn with_package_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = Some(package_type.into());
        self
    }

    /// Total weight in grams, `None` on overflow
    pub fn total_grams(&self) -> Option<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |total, item| {
            let line = item
                .weight
                .to_grams()?
                .checked_mul(Decimal::from(item.quantity))?;
            total.checked_add(line)
        })
    }
}
