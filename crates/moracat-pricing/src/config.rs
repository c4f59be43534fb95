//! Engine Configuration
//!
//! The defaults are the compiled-in unit economics. A TOML file may override
//! any subset of them (e.g. when supplier costs change):
//!
//! ```toml
//! operations_cost = "48"
//!
//! [unit_costs]
//! wet_food_can = "3.40"
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PricingError, PricingResult};

/// Supplier cost per unit of each product category (SAR)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitCosts {
    /// Per wet-food can
    pub wet_food_can: Decimal,
    /// Per kg of dry food
    pub dry_food_kg: Decimal,
    /// Per liter of litter
    pub litter_liter: Decimal,
    /// Per treat pack
    pub treat_pack: Decimal,
    /// Per toy
    pub toy: Decimal,
    /// Per grooming item
    pub grooming_item: Decimal,
    /// Per gizzard meal
    pub gizzard_meal: Decimal,
}

impl Default for UnitCosts {
    fn default() -> Self {
        Self {
            wet_food_can: dec!(3.25),
            dry_food_kg: dec!(5.64),
            litter_liter: dec!(2.71),
            treat_pack: dec!(9.50),
            toy: dec!(14.00),
            grooming_item: dec!(18.00),
            gizzard_meal: dec!(7.50),
        }
    }
}

/// Denominator used for the realized margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginBasis {
    /// Realized profit over the final monthly price
    Price,
    /// Realized profit over cost before profit (markup)
    Cost,
}

/// Cost-plus engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Overhead as a fraction of product cost
    pub overhead_rate: Decimal,
    /// Fixed fulfilment cost per box
    pub operations_cost: Decimal,
    /// Target profit as a fraction of cost before profit
    pub profit_rate: Decimal,
    /// Share of the charge the seller keeps after the regulatory deduction
    pub vat_adjustment_factor: Decimal,
    /// Minimum realized margin, in percent
    pub margin_floor_percent: Decimal,
    /// How the realized margin is measured
    pub margin_basis: MarginBasis,
    /// Product unit costs
    pub unit_costs: UnitCosts,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overhead_rate: dec!(0.08),
            operations_cost: dec!(46),
            profit_rate: dec!(0.20),
            vat_adjustment_factor: dec!(0.971),
            margin_floor_percent: dec!(20),
            margin_basis: MarginBasis::Cost,
            unit_costs: UnitCosts::default(),
        }
    }
}

impl EngineConfig {
    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> PricingResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML content
    pub fn from_toml_str(content: &str) -> PricingResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every constant is in range
    pub fn validate(&self) -> PricingResult<()> {
        if self.vat_adjustment_factor <= Decimal::ZERO || self.vat_adjustment_factor > Decimal::ONE {
            return Err(PricingError::InvalidConfig(format!(
                "vat_adjustment_factor must be in (0, 1], got {}",
                self.vat_adjustment_factor
            )));
        }

        let non_negative = [
            ("overhead_rate", self.overhead_rate),
            ("operations_cost", self.operations_cost),
            ("profit_rate", self.profit_rate),
            ("margin_floor_percent", self.margin_floor_percent),
            ("unit_costs.wet_food_can", self.unit_costs.wet_food_can),
            ("unit_costs.dry_food_kg", self.unit_costs.dry_food_kg),
            ("unit_costs.litter_liter", self.unit_costs.litter_liter),
            ("unit_costs.treat_pack", self.unit_costs.treat_pack),
            ("unit_costs.toy", self.unit_costs.toy),
            ("unit_costs.grooming_item", self.unit_costs.grooming_item),
            ("unit_costs.gizzard_meal", self.unit_costs.gizzard_meal),
        ];
        if let Some((name, value)) = non_negative.iter().find(|(_, v)| v.is_sign_negative()) {
            return Err(PricingError::InvalidConfig(format!(
                "{} must not be negative, got {}",
                name, value
            )));
        }

        Ok(())
    }
}
