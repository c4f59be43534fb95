//! Payment provider handle
//!
//! The provider client is passed explicitly to whoever needs it; there is
//! no process-wide client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::money::MinorUnits;

/// Session billing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Subscription,
}

/// Recurrence unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    Month,
}

/// Recurring billing schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurring {
    pub interval: Interval,
    pub interval_count: u32,
}

/// Checkout line item with inline price data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLineItem {
    pub currency: String,
    pub product_name: String,
    pub description: String,
    pub images: Vec<String>,
    pub unit_amount: MinorUnits,
    pub recurring: Option<Recurring>,
    pub quantity: u32,
}

/// Everything the provider needs to open a hosted checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    pub mode: SessionMode,
    pub payment_method_types: Vec<String>,
    pub require_billing_address: bool,
    pub customer_email: Option<String>,
    pub line_items: Vec<SessionLineItem>,
    /// Copied onto the subscription the session creates
    pub subscription_metadata: BTreeMap<String, String>,
    pub metadata: BTreeMap<String, String>,
    pub success_url: String,
    pub cancel_url: String,
    pub allow_promotion_codes: bool,
}

/// Session created by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

/// Payment provider error
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Payment provider collaborator
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a hosted checkout session
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, GatewayError>;
}
