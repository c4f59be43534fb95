//! Cost-plus catalogs: cat profiles, tier quantities, add-ons, durations

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::{Language, Tier};
use crate::error::PricingError;

/// Subscribing household
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatProfile {
    /// Under 1 year old
    Kitten,
    /// 1-7 years old
    Adult,
    /// 7+ years old
    Senior,
    /// 2-3 cats
    MultiCat,
    /// 4 or more cats
    MultiCatLarge,
}

impl CatProfile {
    /// All profiles in display order
    pub const ALL: [CatProfile; 5] = [
        CatProfile::Kitten,
        CatProfile::Adult,
        CatProfile::Senior,
        CatProfile::MultiCat,
        CatProfile::MultiCatLarge,
    ];

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            Self::Kitten => "kitten",
            Self::Adult => "adult",
            Self::Senior => "senior",
            Self::MultiCat => "multiCat",
            Self::MultiCatLarge => "multiCatLarge",
        }
    }

    /// Feeding multiplier applied to every tier quantity
    pub fn multiplier(&self) -> Decimal {
        match self {
            Self::Kitten => dec!(0.75),
            Self::Adult => dec!(1.0),
            Self::Senior => dec!(0.85),
            Self::MultiCat => dec!(2.5),
            Self::MultiCatLarge => dec!(4.0),
        }
    }

    /// Display label
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Kitten, Language::En) => "Kitten",
            (Self::Kitten, Language::Ar) => "قط صغير",
            (Self::Adult, Language::En) => "Adult Cat",
            (Self::Adult, Language::Ar) => "قط بالغ",
            (Self::Senior, Language::En) => "Senior Cat",
            (Self::Senior, Language::Ar) => "قط كبير",
            (Self::MultiCat, Language::En) => "2-3 Cats",
            (Self::MultiCat, Language::Ar) => "٢-٣ قطط",
            (Self::MultiCatLarge, Language::En) => "4+ Cats",
            (Self::MultiCatLarge, Language::Ar) => "٤ قطط أو أكثر",
        }
    }
}

impl FromStr for CatProfile {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatProfile::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| PricingError::UnknownCatProfile(s.into()))
    }
}

impl fmt::Display for CatProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Base quantities a tier ships for one adult cat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseQuantities {
    pub wet_cans: u32,
    pub dry_kg: Decimal,
    pub litter_liters: u32,
    pub treat_packs: u32,
    pub toys: u32,
    pub grooming_items: u32,
    pub gizzard_meals: u32,
}

/// Tier base quantities for the cost-plus model
pub fn base_quantities(tier: Tier) -> BaseQuantities {
    match tier {
        Tier::Basic => BaseQuantities {
            wet_cans: 15,
            dry_kg: dec!(1.5),
            litter_liters: 10,
            treat_packs: 0,
            toys: 0,
            grooming_items: 0,
            gizzard_meals: 0,
        },
        Tier::Premium => BaseQuantities {
            wet_cans: 20,
            dry_kg: dec!(2.0),
            litter_liters: 12,
            treat_packs: 1,
            toys: 0,
            grooming_items: 0,
            gizzard_meals: 0,
        },
        Tier::Luxury => BaseQuantities {
            wet_cans: 25,
            dry_kg: dec!(2.5),
            litter_liters: 12,
            treat_packs: 2,
            toys: 1,
            grooming_items: 0,
            gizzard_meals: 0,
        },
        Tier::Ultimate => BaseQuantities {
            wet_cans: 30,
            dry_kg: dec!(2.5),
            litter_liters: 15,
            treat_packs: 2,
            toys: 1,
            grooming_items: 1,
            gizzard_meals: 1,
        },
    }
}

/// Optional extra line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOn {
    ExtraWetCans,
    ExtraDryFood,
    ExtraLitter,
    TreatPack,
    Toy,
    GroomingKit,
    GizzardMeal,
}

/// Catalog entry for an add-on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddOnSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub label_ar: &'static str,
    pub unit: &'static str,
    pub unit_cost: Decimal,
    pub max_quantity: u32,
}

impl AddOn {
    /// All add-ons in display order
    pub const ALL: [AddOn; 7] = [
        AddOn::ExtraWetCans,
        AddOn::ExtraDryFood,
        AddOn::ExtraLitter,
        AddOn::TreatPack,
        AddOn::Toy,
        AddOn::GroomingKit,
        AddOn::GizzardMeal,
    ];

    /// Catalog entry
    pub fn spec(&self) -> AddOnSpec {
        match self {
            Self::ExtraWetCans => AddOnSpec {
                id: "extra_wet_cans",
                label: "Extra Wet Food Cans",
                label_ar: "علب طعام رطب إضافية",
                unit: "can",
                unit_cost: dec!(3.25),
                max_quantity: 30,
            },
            Self::ExtraDryFood => AddOnSpec {
                id: "extra_dry_food",
                label: "Extra Dry Food",
                label_ar: "طعام جاف إضافي",
                unit: "kg",
                unit_cost: dec!(5.64),
                max_quantity: 5,
            },
            Self::ExtraLitter => AddOnSpec {
                id: "extra_litter",
                label: "Extra Litter",
                label_ar: "رمل إضافي",
                unit: "L",
                unit_cost: dec!(2.71),
                max_quantity: 20,
            },
            Self::TreatPack => AddOnSpec {
                id: "treat_pack",
                label: "Treat Pack",
                label_ar: "عبوة مكافآت",
                unit: "pack",
                unit_cost: dec!(9.50),
                max_quantity: 4,
            },
            Self::Toy => AddOnSpec {
                id: "toy",
                label: "Interactive Toy",
                label_ar: "لعبة تفاعلية",
                unit: "toy",
                unit_cost: dec!(14.00),
                max_quantity: 3,
            },
            Self::GroomingKit => AddOnSpec {
                id: "grooming_kit",
                label: "Grooming Kit",
                label_ar: "أدوات عناية",
                unit: "kit",
                unit_cost: dec!(18.00),
                max_quantity: 2,
            },
            Self::GizzardMeal => AddOnSpec {
                id: "gizzard_meal",
                label: "Gizzard Meal",
                label_ar: "وجبة قوانص",
                unit: "meal",
                unit_cost: dec!(7.50),
                max_quantity: 4,
            },
        }
    }

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        self.spec().id
    }

    /// Cap a requested quantity to `[0, max_quantity]`
    pub fn cap_quantity(&self, requested: i64) -> u32 {
        let max = self.spec().max_quantity;
        u32::try_from(requested.max(0)).map_or(max, |q| q.min(max))
    }
}

impl FromStr for AddOn {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AddOn::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| PricingError::UnknownAddOn(s.into()))
    }
}

impl fmt::Display for AddOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Commitment length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Duration {
    #[default]
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl Duration {
    /// All durations, shortest first
    pub const ALL: [Duration; 4] = [
        Duration::Monthly,
        Duration::Quarterly,
        Duration::SemiAnnual,
        Duration::Annual,
    ];

    /// Length in months
    pub fn months(&self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::SemiAnnual => 6,
            Self::Annual => 12,
        }
    }

    /// Discount on the monthly price, in percent
    pub fn discount_percentage(&self) -> Decimal {
        match self {
            Self::Monthly => dec!(0),
            Self::Quarterly => dec!(5),
            Self::SemiAnnual => dec!(10),
            Self::Annual => dec!(15),
        }
    }

    /// Display label
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Monthly, Language::En) => "Monthly",
            (Self::Monthly, Language::Ar) => "شهري",
            (Self::Quarterly, Language::En) => "3 Months",
            (Self::Quarterly, Language::Ar) => "٣ أشهر",
            (Self::SemiAnnual, Language::En) => "6 Months",
            (Self::SemiAnnual, Language::Ar) => "٦ أشهر",
            (Self::Annual, Language::En) => "12 Months",
            (Self::Annual, Language::Ar) => "١٢ شهراً",
        }
    }
}

impl TryFrom<u32> for Duration {
    type Error = PricingError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        Duration::ALL
            .into_iter()
            .find(|d| d.months() == months)
            .ok_or(PricingError::UnsupportedDuration(months))
    }
}

impl From<Duration> for u32 {
    fn from(duration: Duration) -> Self {
        duration.months()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.months())
    }
}
