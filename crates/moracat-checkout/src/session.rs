//! Checkout session creation
//!
//! The only path that turns a configuration into a charge. The price is
//! recomputed here from the validated configuration and the session is
//! refused when the realized margin is below the floor.

use moracat_pricing::cost_plus::{CostPlusEngine, PriceBreakdown, SubscriptionConfig};
use moracat_pricing::Language;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{CheckoutError, CheckoutResult};
use crate::gateway::{
    CheckoutSession, CheckoutSessionRequest, Interval, PaymentGateway, Recurring, SessionLineItem,
    SessionMode,
};
use crate::metadata::SubscriptionMetadata;
use crate::money::MinorUnits;
use crate::request::CheckoutRequest;

/// Checkout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Public site origin used for redirect URLs
    pub base_url: String,
    /// ISO currency code, lowercase
    pub currency: String,
    pub product_image: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            currency: "sar".to_string(),
            product_image: "https://moracat.co/og-image.png".to_string(),
        }
    }
}

/// Signed-in user placing the order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: Option<String>,
}

/// Builds and opens checkout sessions
pub struct CheckoutService {
    engine: CostPlusEngine,
    gateway: Arc<dyn PaymentGateway>,
    config: CheckoutConfig,
}

impl CheckoutService {
    pub fn new(gateway: Arc<dyn PaymentGateway>, config: CheckoutConfig) -> Self {
        Self::with_engine(CostPlusEngine::new(), gateway, config)
    }

    pub fn with_engine(
        engine: CostPlusEngine,
        gateway: Arc<dyn PaymentGateway>,
        config: CheckoutConfig,
    ) -> Self {
        Self {
            engine,
            gateway,
            config,
        }
    }

    /// Server-side price; refuses configurations below the margin floor
    pub fn quote(&self, config: &SubscriptionConfig) -> CheckoutResult<PriceBreakdown> {
        let breakdown = self.engine.calculate(config);
        if !breakdown.is_valid_config {
            return Err(CheckoutError::MarginFloor {
                margin: breakdown.margin_percentage,
                floor: self.engine.config().margin_floor_percent,
            });
        }
        Ok(breakdown)
    }

    /// Provider request for a priced configuration
    pub fn build_session_request(
        &self,
        config: &SubscriptionConfig,
        breakdown: &PriceBreakdown,
        user: Option<&AuthenticatedUser>,
    ) -> CheckoutResult<CheckoutSessionRequest> {
        let metadata = SubscriptionMetadata::from_config(config, user.map(|u| u.id.as_str()));
        let tier_label = config.tier.label(Language::En);
        let base = self.config.base_url.trim_end_matches('/');

        let line_item = SessionLineItem {
            currency: self.config.currency.clone(),
            product_name: format!("Moracat {} Subscription", tier_label),
            description: describe(config),
            images: vec![self.config.product_image.clone()],
            unit_amount: MinorUnits::from_amount(breakdown.final_monthly_price)?,
            recurring: Some(Recurring {
                interval: Interval::Month,
                interval_count: 1,
            }),
            quantity: 1,
        };

        Ok(CheckoutSessionRequest {
            mode: SessionMode::Subscription,
            payment_method_types: vec!["card".to_string()],
            require_billing_address: true,
            customer_email: user.and_then(|u| u.email.clone()),
            line_items: vec![line_item],
            subscription_metadata: metadata.to_subscription_map()?,
            metadata: metadata.to_session_map(),
            success_url: format!(
                "{}/dashboard?success=true&session_id={{CHECKOUT_SESSION_ID}}",
                base
            ),
            cancel_url: format!("{}/#builder?canceled=true", base),
            allow_promotion_codes: true,
        })
    }

    /// Validate, re-price, and open a hosted checkout
    pub async fn create_session(
        &self,
        request: &CheckoutRequest,
        user: Option<&AuthenticatedUser>,
    ) -> CheckoutResult<CheckoutSession> {
        let config = request.validate()?;
        let breakdown = self.quote(&config).map_err(|e| {
            tracing::warn!(tier = %config.tier, cat_type = %config.cat_type, error = %e, "checkout refused");
            e
        })?;
        let session_request = self.build_session_request(&config, &breakdown, user)?;

        let session = self
            .gateway
            .create_checkout_session(&session_request)
            .await?;

        tracing::info!(
            session_id = %session.id,
            tier = %config.tier,
            cat_type = %config.cat_type,
            duration = config.duration.months(),
            unit_amount = %session_request.line_items[0].unit_amount,
            "checkout session created"
        );

        Ok(session)
    }
}

/// Human-readable line item description
fn describe(config: &SubscriptionConfig) -> String {
    let lang = Language::En;
    let mut description = format!(
        "{} Package | Cat Type: {} | Duration: {}",
        config.tier.label(lang),
        config.cat_type.label(lang),
        config.duration.label(lang)
    );

    let add_ons: Vec<String> = config
        .add_ons
        .iter()
        .filter(|&(_, &q)| q > 0)
        .map(|(a, q)| format!("{} x{}", a.spec().label, q))
        .collect();
    if !add_ons.is_empty() {
        description.push_str(" | Add-ons: ");
        description.push_str(&add_ons.join(", "));
    }

    description
}
