//! Moracat Pricing Engine
//!
//! Pure, deterministic pricing for the cat-food subscription box.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MORACAT PRICING ENGINE                           │
//! │                                                                         │
//! │  SubscriptionConfig ─► CostPlusEngine ─► PriceBreakdown ─► checkout     │
//! │   (tier, cat, add-ons,   unit costs, overhead,   (authoritative charge) │
//! │    duration)             operations, profit,                            │
//! │                          VAT gross-up, discount                         │
//! │                                                                         │
//! │  RetailConfig ─────────► retail model ──────► RetailBreakdown ─► UI     │
//! │   (tier, cat, brands)    fixed price vs retail value  (marketing cards) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cost-plus model is the one the checkout boundary charges with. The
//! retail model only feeds display surfaces (tier cards, savings calculator).
//! Neither model keeps state: every call reads the static catalogs plus the
//! caller's configuration, so both are safe to call from any number of
//! threads at once.

pub mod catalog;
pub mod config;
pub mod cost_plus;
pub mod error;
pub mod format;
pub mod money;
pub mod retail;

pub use catalog::{Language, Tier};
pub use config::{EngineConfig, MarginBasis, UnitCosts};
pub use cost_plus::{
    calculate_price, AddOn, CatProfile, CostPlusEngine, Duration, PriceBreakdown,
    SubscriptionConfig,
};
pub use error::{PricingError, PricingResult};
pub use format::format_price;
pub use retail::{calculate_retail_price, CatType, RetailBreakdown, RetailConfig};
