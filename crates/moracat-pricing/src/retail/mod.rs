//! Retail Comparison Model
//!
//! Fixed monthly price per tier, shown next to what the same items cost at
//! retail. Used by marketing surfaces only; checkout charges the cost-plus
//! price.

pub mod catalog;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use catalog::{
    tier_offer, BrandPreference, CatType, PartnerBrand, TierOffer, TreatBrand, WetFoodBrand,
};

use crate::catalog::{Language, Tier};
use crate::money::{ceil_units, round_whole};

/// Retail-model configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailConfig {
    pub tier: Tier,
    pub cat_type: CatType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_preferences: Option<BrandPreference>,
}

impl RetailConfig {
    pub fn new(tier: Tier, cat_type: CatType) -> Self {
        Self {
            tier,
            cat_type,
            brand_preferences: None,
        }
    }
}

/// Box contents under the retail model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetailQuantities {
    pub wet_cans: u32,
    pub dry_kg: Decimal,
    pub litter_liters: u32,
    pub treat_packs: u32,
    pub toys: u32,
    pub grooming_items: u32,
    pub gizzard_meals: u32,
}

/// Retail-model price breakdown (whole SAR)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetailBreakdown {
    pub fixed_price: Decimal,
    pub retail_value: Decimal,
    pub savings: Decimal,
    pub savings_percentage: Decimal,
    pub quantities: RetailQuantities,
}

/// Savings against what a household spends today
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendComparison {
    pub monthly: Decimal,
    pub annual: Decimal,
    pub percentage: Decimal,
}

/// Price a retail-model configuration
pub fn calculate_retail_price(config: &RetailConfig) -> RetailBreakdown {
    let offer = tier_offer(config.tier);
    let m = config.cat_type.quantity_multiplier();

    // only food and litter scale with the household
    let quantities = RetailQuantities {
        wet_cans: ceil_units(offer.wet_cans, m),
        dry_kg: offer.dry_kg * m,
        litter_liters: ceil_units(offer.litter_liters, m),
        treat_packs: offer.treat_packs,
        toys: offer.toys,
        grooming_items: offer.grooming_items,
        gizzard_meals: offer.gizzard_meals,
    };

    let price_multiplier = config.cat_type.price_multiplier();
    let fixed_price = round_whole(offer.fixed_price * price_multiplier);
    let retail_value = round_whole(offer.retail_value * price_multiplier);
    let savings = retail_value - fixed_price;
    let savings_percentage = if retail_value.is_zero() {
        Decimal::ZERO
    } else {
        round_whole(savings * Decimal::ONE_HUNDRED / retail_value)
    };

    RetailBreakdown {
        fixed_price,
        retail_value,
        savings,
        savings_percentage,
        quantities,
    }
}

/// Every tier priced for one household, in catalog order
pub fn all_tier_prices(cat_type: CatType) -> BTreeMap<Tier, RetailBreakdown> {
    Tier::ALL
        .into_iter()
        .map(|tier| (tier, calculate_retail_price(&RetailConfig::new(tier, cat_type))))
        .collect()
}

/// Yearly savings against retail
pub fn annual_savings(config: &RetailConfig) -> Decimal {
    calculate_retail_price(config).savings * Decimal::from(12)
}

/// Savings compared to a household's current monthly spend, floored at zero
pub fn savings_vs_current_spend(
    current_monthly_spend: Decimal,
    tier: Tier,
    cat_type: CatType,
) -> SpendComparison {
    if current_monthly_spend <= Decimal::ZERO {
        return SpendComparison {
            monthly: Decimal::ZERO,
            annual: Decimal::ZERO,
            percentage: Decimal::ZERO,
        };
    }

    let breakdown = calculate_retail_price(&RetailConfig::new(tier, cat_type));
    let monthly = current_monthly_spend - breakdown.fixed_price;
    let annual = monthly * Decimal::from(12);
    let percentage = round_whole(monthly * Decimal::ONE_HUNDRED / current_monthly_spend);

    SpendComparison {
        monthly: monthly.max(Decimal::ZERO),
        annual: annual.max(Decimal::ZERO),
        percentage: percentage.max(Decimal::ZERO),
    }
}

/// Feature bullets for a tier card
pub fn tier_features(tier: Tier, language: Language) -> Vec<String> {
    let offer = tier_offer(tier);
    let dry_kg = offer.dry_kg.normalize();
    let mut features = Vec::new();

    let extras = [
        (offer.treat_packs, ("treat pack", "treat packs"), ("عبوة", "عبوات", "مكافآت")),
        (offer.toys, ("interactive toy", "interactive toys"), ("لعبة", "ألعاب", "تفاعلية")),
        (offer.grooming_items, ("grooming item", "grooming items"), ("أداة", "أدوات", "عناية")),
        (offer.gizzard_meals, ("gizzard meal", "gizzard meals"), ("وجبة", "وجبات", "قوانص")),
    ];

    match language {
        Language::En => {
            features.push(format!("{} premium wet food cans", offer.wet_cans));
            features.push(format!("{}kg dry food", dry_kg));
            features.push(format!("{}L premium litter", offer.litter_liters));
            for (count, (one, many), _) in extras {
                if count > 0 {
                    features.push(format!("{} {}", count, if count > 1 { many } else { one }));
                }
            }
        }
        Language::Ar => {
            features.push(format!("{} علبة طعام رطب فاخر", offer.wet_cans));
            features.push(format!("{} كجم طعام جاف", dry_kg));
            features.push(format!("{} لتر رمل فاخر", offer.litter_liters));
            for (count, _, (one, many, noun)) in extras {
                if count > 0 {
                    features.push(format!("{} {} {}", count, if count > 1 { many } else { one }, noun));
                }
            }
        }
    }

    features
}
