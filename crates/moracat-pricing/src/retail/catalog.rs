//! Retail model catalogs: fixed tier offers, cat types, partner brands

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::{Language, Tier};
use crate::error::PricingError;

/// Household type for the retail model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatType {
    #[default]
    Adult,
    Kitten,
    Senior,
    /// Two or more cats (doubles quantities)
    MultiCat,
}

impl CatType {
    pub const ALL: [CatType; 4] = [CatType::Adult, CatType::Kitten, CatType::Senior, CatType::MultiCat];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Adult => "adult",
            Self::Kitten => "kitten",
            Self::Senior => "senior",
            Self::MultiCat => "multiCat",
        }
    }

    /// Multiplier for food and litter quantities
    pub fn quantity_multiplier(&self) -> Decimal {
        match self {
            Self::Adult => dec!(1.0),
            Self::Kitten => dec!(0.75),
            Self::Senior => dec!(0.85),
            Self::MultiCat => dec!(2.0),
        }
    }

    /// Multiplier for the box price; less than the quantity multiplier
    /// for multi-cat households (bulk discount)
    pub fn price_multiplier(&self) -> Decimal {
        match self {
            Self::MultiCat => dec!(1.8),
            _ => Decimal::ONE,
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Adult, Language::En) => "Adult Cat",
            (Self::Adult, Language::Ar) => "قط بالغ",
            (Self::Kitten, Language::En) => "Kitten",
            (Self::Kitten, Language::Ar) => "قط صغير",
            (Self::Senior, Language::En) => "Senior Cat",
            (Self::Senior, Language::Ar) => "قط كبير",
            (Self::MultiCat, Language::En) => "Multiple Cats",
            (Self::MultiCat, Language::Ar) => "عدة قطط",
        }
    }
}

impl FromStr for CatType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatType::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| PricingError::UnknownCatProfile(s.into()))
    }
}

impl fmt::Display for CatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Fixed monthly offer of a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierOffer {
    /// Monthly price (SAR)
    pub fixed_price: Decimal,
    /// Estimated price of the same items at retail (SAR)
    pub retail_value: Decimal,
    pub wet_cans: u32,
    pub dry_kg: Decimal,
    pub litter_liters: u32,
    pub treat_packs: u32,
    pub toys: u32,
    pub grooming_items: u32,
    pub gizzard_meals: u32,
    /// Card accent colour
    pub color: &'static str,
}

/// Retail-model offer for a tier
pub fn tier_offer(tier: Tier) -> TierOffer {
    let food = |fixed_price, retail_value, color| TierOffer {
        fixed_price,
        retail_value,
        wet_cans: 30,
        dry_kg: dec!(2.5),
        litter_liters: 12,
        treat_packs: 0,
        toys: 0,
        grooming_items: 0,
        gizzard_meals: 0,
        color,
    };

    match tier {
        Tier::Basic => food(dec!(260), dec!(325), "#f7dec9"),
        Tier::Premium => TierOffer {
            treat_packs: 1,
            ..food(dec!(305), dec!(381), "#045b46")
        },
        Tier::Luxury => TierOffer {
            treat_packs: 2,
            toys: 1,
            ..food(dec!(365), dec!(456), "#f86c2f")
        },
        Tier::Ultimate => TierOffer {
            treat_packs: 2,
            toys: 1,
            grooming_items: 1,
            gizzard_meals: 1,
            ..food(dec!(430), dec!(538), "#ffb7b8")
        },
    }
}

/// Curated partner brand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartnerBrand {
    pub id: &'static str,
    pub name: &'static str,
    pub name_ar: &'static str,
}

pub const WET_FOOD_BRANDS: [PartnerBrand; 2] = [
    PartnerBrand { id: "applaws", name: "Applaws", name_ar: "أبلاوز" },
    PartnerBrand { id: "kitcat", name: "Kit Cat", name_ar: "كيت كات" },
];

pub const DRY_FOOD_BRANDS: [PartnerBrand; 1] = [
    PartnerBrand { id: "josera", name: "Josera", name_ar: "جوسيرا" },
];

pub const LITTER_BRANDS: [PartnerBrand; 1] = [
    PartnerBrand { id: "biosand", name: "BioSand", name_ar: "بايوساند" },
];

pub const TREAT_BRANDS: [PartnerBrand; 2] = [
    PartnerBrand { id: "churu", name: "Churu", name_ar: "تشورو" },
    PartnerBrand { id: "kitcat_treats", name: "Kit Cat Treats", name_ar: "حلوى كيت كات" },
];

/// Wet-food partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WetFoodBrand {
    Applaws,
    Kitcat,
}

impl WetFoodBrand {
    pub fn brand(&self) -> PartnerBrand {
        match self {
            Self::Applaws => WET_FOOD_BRANDS[0],
            Self::Kitcat => WET_FOOD_BRANDS[1],
        }
    }
}

impl FromStr for WetFoodBrand {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applaws" => Ok(Self::Applaws),
            "kitcat" => Ok(Self::Kitcat),
            other => Err(PricingError::UnknownBrand(other.into())),
        }
    }
}

/// Treat partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatBrand {
    Churu,
    KitcatTreats,
}

impl TreatBrand {
    pub fn brand(&self) -> PartnerBrand {
        match self {
            Self::Churu => TREAT_BRANDS[0],
            Self::KitcatTreats => TREAT_BRANDS[1],
        }
    }
}

impl FromStr for TreatBrand {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "churu" => Ok(Self::Churu),
            "kitcat_treats" => Ok(Self::KitcatTreats),
            other => Err(PricingError::UnknownBrand(other.into())),
        }
    }
}

/// Chosen brands; affects fulfilment only, never price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandPreference {
    pub wet_food_brand: WetFoodBrand,
    pub treat_brand: TreatBrand,
}

impl BrandPreference {
    /// Parse a preference from raw brand ids
    pub fn parse(wet_food_brand: &str, treat_brand: &str) -> Result<Self, PricingError> {
        Ok(Self {
            wet_food_brand: wet_food_brand.parse()?,
            treat_brand: treat_brand.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offers_priced_below_retail() {
        for tier in Tier::ALL {
            let offer = tier_offer(tier);
            assert!(offer.fixed_price > Decimal::ZERO);
            assert!(offer.fixed_price < offer.retail_value);
        }
    }

    #[test]
    fn test_offer_contents() {
        assert_eq!(tier_offer(Tier::Premium).treat_packs, 1);
        assert_eq!(tier_offer(Tier::Basic).toys, 0);
        let royal = tier_offer(Tier::Ultimate);
        assert_eq!((royal.grooming_items, royal.gizzard_meals), (1, 1));
    }

    #[test]
    fn test_brand_preference_parse() {
        let pref = BrandPreference::parse("applaws", "kitcat_treats").unwrap();
        assert_eq!(pref.wet_food_brand.brand().name, "Applaws");
        assert_eq!(pref.treat_brand.brand().name_ar, "حلوى كيت كات");

        // treat brand offered as wet food
        assert!(matches!(
            BrandPreference::parse("churu", "churu"),
            Err(PricingError::UnknownBrand(_))
        ));
    }

    #[test]
    fn test_price_multiplier_only_for_multi_cat() {
        assert_eq!(CatType::MultiCat.price_multiplier(), dec!(1.8));
        assert_eq!(CatType::Senior.price_multiplier(), Decimal::ONE);
    }
}
