//! Catalog entries shared by both pricing models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PricingError;

/// Display language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Arabic
    Ar,
}

impl FromStr for Language {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            other => Err(PricingError::UnknownLanguage(other.into())),
        }
    }
}

/// Subscription package level
///
/// Ids are shared by both pricing models and by the payment provider's
/// price identifiers, so they must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Essential nutrition box
    Basic,
    /// Nutrition plus treats
    Premium,
    /// Adds toys and extra treats ("Complete")
    Luxury,
    /// Full care box ("Royal")
    Ultimate,
}

impl Tier {
    /// All tiers in catalog order
    pub const ALL: [Tier; 4] = [Tier::Basic, Tier::Premium, Tier::Luxury, Tier::Ultimate];

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Luxury => "luxury",
            Self::Ultimate => "ultimate",
        }
    }

    /// Display label
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Basic, Language::En) => "Essential",
            (Self::Basic, Language::Ar) => "الأساسية",
            (Self::Premium, Language::En) => "Premium",
            (Self::Premium, Language::Ar) => "المتميزة",
            (Self::Luxury, Language::En) => "Complete",
            (Self::Luxury, Language::Ar) => "الشاملة",
            (Self::Ultimate, Language::En) => "Royal",
            (Self::Ultimate, Language::Ar) => "الملكية",
        }
    }

    /// One-line marketing description
    pub fn description(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Basic, Language::En) => "Complete nutrition for your cat",
            (Self::Basic, Language::Ar) => "تغذية كاملة لقطتك",
            (Self::Premium, Language::En) => "Nutrition plus treats for extra joy",
            (Self::Premium, Language::Ar) => "تغذية مع مكافآت لسعادة أكبر",
            (Self::Luxury, Language::En) => "Full care with toys and extra treats",
            (Self::Luxury, Language::Ar) => "عناية كاملة مع ألعاب ومكافآت إضافية",
            (Self::Ultimate, Language::En) => "The complete royal treatment",
            (Self::Ultimate, Language::Ar) => "تجربة العناية الملكية الكاملة",
        }
    }

    /// Highlighted as the most popular package
    pub fn is_popular(&self) -> bool {
        matches!(self, Self::Premium)
    }
}

impl FromStr for Tier {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| PricingError::UnknownTier(s.into()))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ids_roundtrip() {
        for tier in Tier::ALL {
            assert_eq!(tier.id().parse::<Tier>().unwrap(), tier);
        }
    }

    #[test]
    fn test_unknown_tier_rejected() {
        let err = "gold".parse::<Tier>().unwrap_err();
        assert!(matches!(err, PricingError::UnknownTier(ref id) if id == "gold"));
    }

    #[test]
    fn test_only_premium_is_popular() {
        let popular: Vec<_> = Tier::ALL.into_iter().filter(Tier::is_popular).collect();
        assert_eq!(popular, vec![Tier::Premium]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Tier::Luxury.label(Language::En), "Complete");
        assert_eq!(Tier::Ultimate.label(Language::Ar), "الملكية");
        assert!("fr".parse::<Language>().is_err());
    }
}
