//! Moracat Checkout Boundary
//!
//! Everything between a checkout request body and the payment provider.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CHECKOUT BOUNDARY                               │
//! │                                                                         │
//! │  request body ─► CheckoutRequest::validate ─► SubscriptionConfig        │
//! │                                                     │                   │
//! │                          CostPlusEngine (recomputed server-side)        │
//! │                                                     │                   │
//! │  PaymentGateway ◄─ CheckoutSessionRequest ◄─ margin floor + halalas     │
//! │                                                                         │
//! │  provider webhook ─► WebhookEvent ─► WebhookReconciler ─► AccountStore  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The price charged is always recomputed from the validated configuration,
//! never taken from the client.

pub mod error;
pub mod gateway;
pub mod metadata;
pub mod money;
pub mod reconcile;
pub mod request;
pub mod session;
pub mod store;
pub mod waitlist;
pub mod webhook;

pub use error::{CheckoutError, CheckoutResult};
pub use gateway::{CheckoutSession, CheckoutSessionRequest, GatewayError, PaymentGateway};
pub use metadata::SubscriptionMetadata;
pub use money::MinorUnits;
pub use reconcile::{Reconciliation, WebhookReconciler};
pub use request::{CheckoutRequest, RawSubscriptionConfig};
pub use session::{AuthenticatedUser, CheckoutConfig, CheckoutService};
pub use store::{AccountStore, InMemoryAccountStore, SubscriptionRecord, SubscriptionStatus};
pub use waitlist::{LeadForm, LeadValidator, ValidationError};
pub use webhook::WebhookEvent;
