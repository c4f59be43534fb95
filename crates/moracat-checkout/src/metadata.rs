//! Payment metadata
//!
//! The configuration travels with the payment as a flat string map so the
//! webhook handler can rebuild it. Present values are parsed strictly;
//! absent keys fall back to premium / adult / monthly.

use moracat_pricing::cost_plus::{AddOn, CatProfile, Duration, SubscriptionConfig};
use moracat_pricing::Tier;
use std::collections::BTreeMap;

use crate::error::{CheckoutError, CheckoutResult};

const TIER: &str = "tier";
const CAT_TYPE: &str = "catType";
const DURATION: &str = "duration";
const ADD_ONS: &str = "addOns";
const USER_ID: &str = "userId";

/// Configuration snapshot attached to a payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionMetadata {
    pub tier: Tier,
    pub cat_type: CatProfile,
    pub duration: Duration,
    pub add_ons: BTreeMap<AddOn, u32>,
    pub user_id: Option<String>,
}

impl SubscriptionMetadata {
    pub fn from_config(config: &SubscriptionConfig, user_id: Option<&str>) -> Self {
        Self {
            tier: config.tier,
            cat_type: config.cat_type,
            duration: config.duration,
            add_ons: config
                .add_ons
                .iter()
                .map(|(&a, &q)| (a, a.cap_quantity(i64::from(q))))
                .filter(|&(_, q)| q > 0)
                .collect(),
            user_id: user_id.map(String::from),
        }
    }

    /// Full map attached to the subscription
    pub fn to_subscription_map(&self) -> CheckoutResult<BTreeMap<String, String>> {
        let add_ons = serde_json::to_string(&self.add_ons)
            .map_err(|e| CheckoutError::Metadata(e.to_string()))?;

        let mut map = self.to_session_map();
        map.insert(ADD_ONS.into(), add_ons);
        map.insert(USER_ID.into(), self.user_id.clone().unwrap_or_default());
        Ok(map)
    }

    /// Short map attached to the checkout session
    pub fn to_session_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (TIER.to_string(), self.tier.id().to_string()),
            (CAT_TYPE.to_string(), self.cat_type.id().to_string()),
            (DURATION.to_string(), self.duration.months().to_string()),
        ])
    }

    /// Rebuild from a provider metadata map
    pub fn from_map(map: &BTreeMap<String, String>) -> CheckoutResult<Self> {
        let tier = match map.get(TIER) {
            Some(v) => v.parse()?,
            None => Tier::Premium,
        };
        let cat_type = match map.get(CAT_TYPE) {
            Some(v) => v.parse()?,
            None => CatProfile::Adult,
        };
        let duration = match map.get(DURATION) {
            Some(v) => {
                let months: u32 = v
                    .parse()
                    .map_err(|_| CheckoutError::Metadata(format!("invalid duration: {}", v)))?;
                Duration::try_from(months)?
            }
            None => Duration::Monthly,
        };
        let add_ons = match map.get(ADD_ONS) {
            Some(v) => serde_json::from_str(v).map_err(|e| CheckoutError::Metadata(e.to_string()))?,
            None => BTreeMap::new(),
        };
        let user_id = map.get(USER_ID).filter(|v| !v.is_empty()).cloned();

        Ok(Self {
            tier,
            cat_type,
            duration,
            add_ons,
            user_id,
        })
    }

    /// Configuration to re-price with
    pub fn to_config(&self) -> SubscriptionConfig {
        SubscriptionConfig {
            tier: self.tier,
            cat_type: self.cat_type,
            duration: self.duration,
            add_ons: self.add_ons.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SubscriptionMetadata {
        let config = SubscriptionConfig::new(Tier::Ultimate, CatProfile::MultiCat)
            .with_duration(Duration::Annual)
            .with_add_on(AddOn::GizzardMeal, 2)
            .with_add_on(AddOn::Toy, 0);
        SubscriptionMetadata::from_config(&config, Some("user_1"))
    }

    #[test]
    fn test_subscription_map_contents() {
        let map = sample().to_subscription_map().unwrap();
        assert_eq!(map["tier"], "ultimate");
        assert_eq!(map["catType"], "multiCat");
        assert_eq!(map["duration"], "12");
        assert_eq!(map["addOns"], r#"{"gizzard_meal":2}"#);
        assert_eq!(map["userId"], "user_1");
    }

    #[test]
    fn test_session_map_is_short() {
        let map = sample().to_session_map();
        assert_eq!(map.len(), 3);
        assert!(!map.contains_key("addOns"));
    }

    #[test]
    fn test_rebuild_config() {
        let sent = sample();
        let rebuilt = SubscriptionMetadata::from_map(&sent.to_subscription_map().unwrap()).unwrap();
        assert_eq!(rebuilt, sent);
        assert_eq!(rebuilt.to_config().add_ons[&AddOn::GizzardMeal], 2);
    }

    #[test]
    fn test_absent_keys_default() {
        let meta = SubscriptionMetadata::from_map(&BTreeMap::new()).unwrap();
        assert_eq!(meta.tier, Tier::Premium);
        assert_eq!(meta.cat_type, CatProfile::Adult);
        assert_eq!(meta.duration, Duration::Monthly);
        assert!(meta.add_ons.is_empty());
        assert_eq!(meta.user_id, None);
    }

    #[test]
    fn test_present_garbage_rejected() {
        let map = BTreeMap::from([("duration".to_string(), "forever".to_string())]);
        assert!(matches!(
            SubscriptionMetadata::from_map(&map),
            Err(CheckoutError::Metadata(_))
        ));

        let map = BTreeMap::from([("tier".to_string(), "gold".to_string())]);
        assert!(matches!(
            SubscriptionMetadata::from_map(&map),
            Err(CheckoutError::Pricing(_))
        ));
    }
}
