//! Error types for the pricing engine

use thiserror::Error;

/// Pricing error type
///
/// Unknown identifiers are caller programming errors: they are rejected
/// instead of defaulted because the result feeds a financial charge.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Tier id not in the catalog
    #[error("unknown tier: {0}")]
    UnknownTier(String),

    /// Cat profile id not in the catalog
    #[error("unknown cat profile: {0}")]
    UnknownCatProfile(String),

    /// Add-on id not in the catalog
    #[error("unknown add-on: {0}")]
    UnknownAddOn(String),

    /// Commitment length without a discount entry
    #[error("unsupported duration: {0} months")]
    UnsupportedDuration(u32),

    /// Brand id not among the partner brands of its category
    #[error("unknown brand: {0}")]
    UnknownBrand(String),

    /// Language code other than `en` / `ar`
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    /// Engine constants out of range
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),

    /// IO error while reading a config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed config file
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for the pricing engine
pub type PricingResult<T> = Result<T, PricingError>;
