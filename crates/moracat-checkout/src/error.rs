//! Checkout error types

use moracat_pricing::PricingError;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::gateway::GatewayError;
use crate::store::StoreError;

/// Checkout error type
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Request body missing fields or not shaped like a configuration
    #[error("invalid subscription configuration: {0}")]
    InvalidConfig(String),

    /// Unknown tier / profile / add-on / duration
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Realized margin below the floor; no charge may be created
    #[error("configuration below margin floor: {margin}% < {floor}%")]
    MarginFloor { margin: Decimal, floor: Decimal },

    /// Amount not representable in minor units
    #[error("invalid amount: {0}")]
    InvalidAmount(Decimal),

    /// Payment metadata could not be encoded or decoded
    #[error("metadata error: {0}")]
    Metadata(String),

    /// Webhook payload missing required fields
    #[error("malformed webhook event: {0}")]
    MalformedEvent(String),

    /// Payment provider failure
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Account storage failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for the checkout boundary
pub type CheckoutResult<T> = Result<T, CheckoutError>;
