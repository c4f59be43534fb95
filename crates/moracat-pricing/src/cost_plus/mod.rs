//! Cost-Plus Pricing Engine
//!
//! Authoritative price of a subscription box:
//!
//! ```text
//! product cost  = Σ(quantity × unit cost) + add-ons
//! overhead      = product cost × overhead rate
//! cost          = product cost + overhead + operations
//! subtotal      = cost + cost × profit rate
//! monthly price = subtotal / VAT adjustment factor
//! final monthly = monthly price − duration discount
//! ```
//!
//! A configuration whose realized margin falls below the floor is still
//! priced, but flagged with `is_valid_config = false`; checkout must refuse it.

pub mod catalog;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use catalog::{base_quantities, AddOn, AddOnSpec, BaseQuantities, CatProfile, Duration};

use crate::catalog::Tier;
use crate::config::{EngineConfig, MarginBasis};
use crate::error::PricingResult;
use crate::money::{ceil_units, round_money};

/// Subscription configuration for the cost-plus model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionConfig {
    /// Package level
    pub tier: Tier,
    /// Household profile
    pub cat_type: CatProfile,
    /// Commitment length
    #[serde(default)]
    pub duration: Duration,
    /// Requested add-on quantities
    #[serde(default)]
    pub add_ons: BTreeMap<AddOn, u32>,
}

impl SubscriptionConfig {
    /// Monthly box without add-ons
    pub fn new(tier: Tier, cat_type: CatProfile) -> Self {
        Self {
            tier,
            cat_type,
            duration: Duration::Monthly,
            add_ons: BTreeMap::new(),
        }
    }

    /// Set the commitment length
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Request an add-on quantity (clamped when priced)
    pub fn with_add_on(mut self, add_on: AddOn, quantity: u32) -> Self {
        self.add_ons.insert(add_on, quantity);
        self
    }
}

/// Product category of a box line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    WetFood,
    DryFood,
    Litter,
    Treats,
    Toys,
    Grooming,
    GizzardMeals,
}

/// Quantities shipped in one box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuantities {
    pub wet_cans: u32,
    pub dry_kg: Decimal,
    pub litter_liters: u32,
    pub treat_packs: u32,
    pub toys: u32,
    pub grooming_items: u32,
    pub gizzard_meals: u32,
}

/// Priced box line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub category: ProductCategory,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    pub amount: Decimal,
}

/// Priced add-on line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnLine {
    pub add_on: AddOn,
    /// Quantity the caller asked for
    pub requested: u32,
    /// Quantity actually priced after clamping
    pub quantity: u32,
    pub unit_cost: Decimal,
    pub amount: Decimal,
}

/// Cost-plus price breakdown
///
/// Money fields are rounded to 2 decimal places, each from its own
/// unrounded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub quantities: ProductQuantities,
    pub line_items: Vec<LineItem>,
    pub add_ons: Vec<AddOnLine>,
    pub add_ons_cost: Decimal,
    pub product_cost: Decimal,
    pub overhead: Decimal,
    pub operations: Decimal,
    pub cost_before_profit: Decimal,
    pub profit: Decimal,
    pub subtotal: Decimal,
    /// Monthly price before the duration discount
    pub monthly_price: Decimal,
    pub discount_percentage: Decimal,
    pub discount_amount: Decimal,
    pub final_monthly_price: Decimal,
    pub duration_months: u32,
    /// Final monthly price over the whole commitment
    pub total_price: Decimal,
    /// Realized margin in percent
    pub margin_percentage: Decimal,
    pub is_valid_config: bool,
}

/// Cost-plus pricing engine
#[derive(Debug, Clone, Default)]
pub struct CostPlusEngine {
    config: EngineConfig,
}

impl CostPlusEngine {
    /// Engine with the compiled-in constants
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with custom constants
    pub fn with_config(config: EngineConfig) -> PricingResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active constants
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Box quantities for a tier and household
    pub fn quantities(&self, tier: Tier, cat_type: CatProfile) -> ProductQuantities {
        let base = base_quantities(tier);
        let m = cat_type.multiplier();

        ProductQuantities {
            wet_cans: ceil_units(base.wet_cans, m),
            dry_kg: base.dry_kg * m,
            litter_liters: ceil_units(base.litter_liters, m),
            treat_packs: ceil_units(base.treat_packs, m),
            toys: ceil_units(base.toys, m),
            grooming_items: ceil_units(base.grooming_items, m),
            gizzard_meals: ceil_units(base.gizzard_meals, m),
        }
    }

    /// Price a configuration
    pub fn calculate(&self, config: &SubscriptionConfig) -> PriceBreakdown {
        let costs = &self.config.unit_costs;
        let quantities = self.quantities(config.tier, config.cat_type);

        let lines = [
            (ProductCategory::WetFood, Decimal::from(quantities.wet_cans), costs.wet_food_can),
            (ProductCategory::DryFood, quantities.dry_kg, costs.dry_food_kg),
            (ProductCategory::Litter, Decimal::from(quantities.litter_liters), costs.litter_liter),
            (ProductCategory::Treats, Decimal::from(quantities.treat_packs), costs.treat_pack),
            (ProductCategory::Toys, Decimal::from(quantities.toys), costs.toy),
            (ProductCategory::Grooming, Decimal::from(quantities.grooming_items), costs.grooming_item),
            (ProductCategory::GizzardMeals, Decimal::from(quantities.gizzard_meals), costs.gizzard_meal),
        ];

        let mut line_items = Vec::new();
        let mut lines_cost = Decimal::ZERO;
        for (category, quantity, unit_cost) in lines {
            if quantity.is_zero() {
                continue;
            }
            let amount = quantity * unit_cost;
            lines_cost += amount;
            line_items.push(LineItem {
                category,
                quantity,
                unit_cost,
                amount: round_money(amount),
            });
        }

        let mut add_ons = Vec::new();
        let mut add_ons_cost = Decimal::ZERO;
        for (&add_on, &requested) in &config.add_ons {
            let spec = add_on.spec();
            let quantity = add_on.cap_quantity(i64::from(requested));
            if quantity < requested {
                tracing::warn!(
                    add_on = spec.id,
                    requested,
                    max = spec.max_quantity,
                    "add-on quantity clamped"
                );
            }
            if quantity == 0 {
                continue;
            }
            let amount = spec.unit_cost * Decimal::from(quantity);
            add_ons_cost += amount;
            add_ons.push(AddOnLine {
                add_on,
                requested,
                quantity,
                unit_cost: spec.unit_cost,
                amount: round_money(amount),
            });
        }

        let product_cost = lines_cost + add_ons_cost;
        let overhead = product_cost * self.config.overhead_rate;
        let operations = self.config.operations_cost;
        let cost_before_profit = product_cost + overhead + operations;
        let profit = cost_before_profit * self.config.profit_rate;
        let subtotal = cost_before_profit + profit;
        let monthly_price = subtotal / self.config.vat_adjustment_factor;

        let discount_percentage = config.duration.discount_percentage();
        let discount_amount = if discount_percentage.is_zero() || monthly_price.is_zero() {
            Decimal::ZERO
        } else {
            monthly_price * discount_percentage / Decimal::ONE_HUNDRED
        };
        let final_monthly_price = monthly_price - discount_amount;
        let duration_months = config.duration.months();
        let total_price = final_monthly_price * Decimal::from(duration_months);

        let realized = final_monthly_price - product_cost - overhead - operations;
        let basis = match self.config.margin_basis {
            MarginBasis::Price => final_monthly_price,
            MarginBasis::Cost => cost_before_profit,
        };
        let margin = if basis.is_zero() {
            Decimal::ZERO
        } else {
            realized / basis * Decimal::ONE_HUNDRED
        };
        // the floor is checked against the unrounded margin
        let is_valid_config = margin >= self.config.margin_floor_percent;
        let margin_percentage = round_money(margin);

        if !is_valid_config {
            tracing::warn!(
                tier = %config.tier,
                cat_type = %config.cat_type,
                duration = duration_months,
                %margin_percentage,
                floor = %self.config.margin_floor_percent,
                "configuration below margin floor"
            );
        }

        let breakdown = PriceBreakdown {
            quantities,
            line_items,
            add_ons,
            add_ons_cost: round_money(add_ons_cost),
            product_cost: round_money(product_cost),
            overhead: round_money(overhead),
            operations: round_money(operations),
            cost_before_profit: round_money(cost_before_profit),
            profit: round_money(profit),
            subtotal: round_money(subtotal),
            monthly_price: round_money(monthly_price),
            discount_percentage,
            discount_amount: round_money(discount_amount),
            final_monthly_price: round_money(final_monthly_price),
            duration_months,
            total_price: round_money(total_price),
            margin_percentage,
            is_valid_config,
        };

        tracing::debug!(
            tier = %config.tier,
            cat_type = %config.cat_type,
            final_monthly_price = %breakdown.final_monthly_price,
            "priced configuration"
        );

        breakdown
    }
}

/// Price a configuration with the compiled-in constants
pub fn calculate_price(config: &SubscriptionConfig) -> PriceBreakdown {
    CostPlusEngine::new().calculate(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn basic_adult() -> SubscriptionConfig {
        SubscriptionConfig::new(Tier::Basic, CatProfile::Adult)
    }

    #[test]
    fn test_basic_adult_monthly() {
        let b = calculate_price(&basic_adult());

        assert_eq!(b.quantities.wet_cans, 15);
        assert_eq!(b.quantities.dry_kg, dec!(1.5));
        assert_eq!(b.quantities.litter_liters, 10);
        assert_eq!(b.line_items.len(), 3);

        assert_eq!(b.product_cost, dec!(84.31));
        assert_eq!(b.overhead, dec!(6.74));
        assert_eq!(b.operations, dec!(46));
        assert_eq!(b.cost_before_profit, dec!(137.05));
        assert_eq!(b.profit, dec!(27.41));
        assert_eq!(b.subtotal, dec!(164.47));
        // 164.46576 / 0.971 = 169.3777...
        assert_eq!(b.monthly_price, dec!(169.38));
        assert_eq!(b.discount_amount, dec!(0));
        assert_eq!(b.final_monthly_price, dec!(169.38));
        assert_eq!(b.total_price, dec!(169.38));
        assert_eq!(b.margin_percentage, dec!(23.58));
        assert!(b.is_valid_config);
    }

    #[test]
    fn test_sum_first_round_last() {
        let b = calculate_price(&basic_adult());
        // each field is rounded from its own unrounded value
        let from_parts = b.product_cost + b.overhead + b.operations;
        assert_eq!(from_parts, dec!(137.05));
        assert_eq!(b.cost_before_profit, dec!(137.05));
        assert_eq!(b.subtotal, dec!(164.47));
        assert_ne!(b.cost_before_profit + b.profit, b.subtotal);
    }

    #[test]
    fn test_kitten_quantities_round_up() {
        let engine = CostPlusEngine::new();
        let q = engine.quantities(Tier::Ultimate, CatProfile::Kitten);
        assert_eq!(q.wet_cans, 23);
        assert_eq!(q.dry_kg, dec!(1.875));
        assert_eq!(q.litter_liters, 12);
        assert_eq!(q.treat_packs, 2);
        assert_eq!(q.toys, 1);
        assert_eq!(q.gizzard_meals, 1);
    }

    #[test]
    fn test_large_household_scales_every_category() {
        let engine = CostPlusEngine::new();
        let q = engine.quantities(Tier::Luxury, CatProfile::MultiCatLarge);
        assert_eq!(q.wet_cans, 100);
        assert_eq!(q.dry_kg, dec!(10.0));
        assert_eq!(q.treat_packs, 8);
        assert_eq!(q.toys, 4);
    }

    #[test]
    fn test_add_on_capped_to_max() {
        let config = basic_adult().with_add_on(AddOn::TreatPack, 999);
        let b = calculate_price(&config);

        assert_eq!(b.add_ons.len(), 1);
        assert_eq!(b.add_ons[0].requested, 999);
        assert_eq!(b.add_ons[0].quantity, 4);
        assert_eq!(b.add_ons_cost, dec!(38.00));
        assert_eq!(b.product_cost, dec!(122.31));
    }

    #[test]
    fn test_zero_quantity_add_on_skipped() {
        let config = basic_adult().with_add_on(AddOn::Toy, 0);
        let b = calculate_price(&config);
        assert!(b.add_ons.is_empty());
        assert_eq!(b, calculate_price(&basic_adult()));
    }

    #[test]
    fn test_duration_discount() {
        let b = calculate_price(&basic_adult().with_duration(Duration::Quarterly));
        assert_eq!(b.discount_percentage, dec!(5));
        assert_eq!(b.discount_amount, dec!(8.47));
        assert_eq!(b.final_monthly_price, dec!(160.91));
        assert_eq!(b.total_price, dec!(482.73));
        assert_eq!(b.duration_months, 3);
    }

    #[test]
    fn test_discount_erodes_margin_below_floor() {
        let b = calculate_price(&basic_adult().with_duration(Duration::Quarterly));
        assert_eq!(b.margin_percentage, dec!(17.40));
        assert!(!b.is_valid_config);
    }

    #[test]
    fn test_price_basis_margin() {
        let config = EngineConfig {
            margin_basis: MarginBasis::Price,
            ..EngineConfig::default()
        };
        let engine = CostPlusEngine::with_config(config).unwrap();
        let b = engine.calculate(&basic_adult());
        assert_eq!(b.margin_percentage, dec!(19.08));
        assert!(!b.is_valid_config);
    }

    #[test]
    fn test_margin_exactly_at_floor_is_valid() {
        // Without the VAT gross-up the realized markup equals the profit rate.
        let config = EngineConfig {
            vat_adjustment_factor: dec!(1),
            ..EngineConfig::default()
        };
        let engine = CostPlusEngine::with_config(config).unwrap();
        let b = engine.calculate(&basic_adult());
        assert_eq!(b.margin_percentage, dec!(20.00));
        assert!(b.is_valid_config);

        let stricter = EngineConfig {
            vat_adjustment_factor: dec!(1),
            margin_floor_percent: dec!(20.01),
            ..EngineConfig::default()
        };
        let engine = CostPlusEngine::with_config(stricter).unwrap();
        assert!(!engine.calculate(&basic_adult()).is_valid_config);
    }

    #[test]
    fn test_margin_just_below_floor_is_invalid() {
        // true markup is 19.996%, which displays as 20.00
        let config = EngineConfig {
            vat_adjustment_factor: dec!(1),
            profit_rate: dec!(0.19996),
            ..EngineConfig::default()
        };
        let engine = CostPlusEngine::with_config(config).unwrap();
        let b = engine.calculate(&basic_adult());
        assert_eq!(b.margin_percentage, dec!(20.00));
        assert!(!b.is_valid_config);
    }

    #[test]
    fn test_operations_only_price_is_positive() {
        let config = EngineConfig {
            unit_costs: crate::config::UnitCosts {
                wet_food_can: dec!(0),
                dry_food_kg: dec!(0),
                litter_liter: dec!(0),
                treat_pack: dec!(0),
                toy: dec!(0),
                grooming_item: dec!(0),
                gizzard_meal: dec!(0),
            },
            ..EngineConfig::default()
        };
        let engine = CostPlusEngine::with_config(config).unwrap();
        let b = engine.calculate(&basic_adult().with_duration(Duration::Annual));

        assert_eq!(b.product_cost, dec!(0));
        assert_eq!(b.overhead, dec!(0));
        // 46 × 1.2 / 0.971
        assert_eq!(b.monthly_price, dec!(56.85));
        assert!(b.final_monthly_price > Decimal::ZERO);
    }

    #[test]
    fn test_invalid_engine_config_rejected() {
        let config = EngineConfig {
            vat_adjustment_factor: dec!(0),
            ..EngineConfig::default()
        };
        assert!(CostPlusEngine::with_config(config).is_err());
    }

    #[test]
    fn test_config_json_shape() {
        let config: SubscriptionConfig = serde_json::from_str(
            r#"{"tier":"premium","catType":"multiCat","duration":6,"addOns":{"toy":2}}"#,
        )
        .unwrap();
        assert_eq!(config.tier, Tier::Premium);
        assert_eq!(config.cat_type, CatProfile::MultiCat);
        assert_eq!(config.duration, Duration::SemiAnnual);
        assert_eq!(config.add_ons.get(&AddOn::Toy), Some(&2));

        assert!(serde_json::from_str::<SubscriptionConfig>(
            r#"{"tier":"premium","catType":"adult","duration":2}"#
        )
        .is_err());
    }
}
