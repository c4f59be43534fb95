//! Checkout request validation
//!
//! The request body is untrusted: every id is checked against the catalog
//! and every add-on quantity is clamped before the engine sees it.

use moracat_pricing::cost_plus::{AddOn, CatProfile, Duration, SubscriptionConfig};
use moracat_pricing::Tier;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{CheckoutError, CheckoutResult};

/// Configuration exactly as the client sent it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubscriptionConfig {
    pub tier: Option<String>,
    pub cat_type: Option<String>,
    pub duration: Option<u32>,
    #[serde(default)]
    pub add_ons: HashMap<String, i64>,
}

/// Checkout request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub config: Option<RawSubscriptionConfig>,
}

impl CheckoutRequest {
    /// Parse a JSON request body
    pub fn from_json(body: &str) -> CheckoutResult<Self> {
        serde_json::from_str(body).map_err(|e| CheckoutError::InvalidConfig(e.to_string()))
    }

    /// Validate into a typed configuration
    pub fn validate(&self) -> CheckoutResult<SubscriptionConfig> {
        let raw = self
            .config
            .as_ref()
            .ok_or_else(|| CheckoutError::InvalidConfig("missing config".into()))?;

        let tier: Tier = required(&raw.tier, "tier")?.parse()?;
        let cat_type: CatProfile = required(&raw.cat_type, "catType")?.parse()?;
        let months = raw
            .duration
            .ok_or_else(|| CheckoutError::InvalidConfig("missing duration".into()))?;
        let duration = Duration::try_from(months)?;

        let mut add_ons = BTreeMap::new();
        for (id, &requested) in &raw.add_ons {
            let add_on: AddOn = id.parse()?;
            let quantity = add_on.cap_quantity(requested);
            if i64::from(quantity) != requested {
                tracing::warn!(add_on = %add_on, requested, quantity, "clamped add-on request");
            }
            if quantity > 0 {
                add_ons.insert(add_on, quantity);
            }
        }

        Ok(SubscriptionConfig {
            tier,
            cat_type,
            duration,
            add_ons,
        })
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> CheckoutResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CheckoutError::InvalidConfig(format!("missing {}", field)))
}
