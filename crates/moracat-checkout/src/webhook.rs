//! Provider webhook events
//!
//! Payloads arrive here already authenticated; signature verification is
//! done by the HTTP layer before the body is parsed.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{CheckoutError, CheckoutResult};
use crate::money::MinorUnits;
use crate::store::SubscriptionStatus;

/// Subscription object carried by subscription events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionPayload {
    pub id: String,
    pub customer_id: Option<String>,
    pub status: Option<SubscriptionStatus>,
    pub price_id: Option<String>,
    pub metadata: BTreeMap<String, String>,
    pub current_period_start: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
}

/// Recognized webhook event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    CheckoutCompleted {
        customer_id: Option<String>,
        subscription_id: Option<String>,
        customer_email: Option<String>,
        metadata: BTreeMap<String, String>,
    },
    SubscriptionCreated(SubscriptionPayload),
    SubscriptionUpdated(SubscriptionPayload),
    SubscriptionDeleted { subscription_id: String },
    PaymentSucceeded {
        invoice_id: String,
        subscription_id: Option<String>,
        amount_paid: MinorUnits,
    },
    PaymentFailed {
        invoice_id: String,
        subscription_id: Option<String>,
    },
    /// Any other event type; acknowledged and ignored
    Unhandled(String),
}

#[derive(Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    data: RawData,
}

#[derive(Deserialize)]
struct RawData {
    object: Value,
}

#[derive(Deserialize)]
struct RawSession {
    customer: Option<String>,
    subscription: Option<String>,
    customer_email: Option<String>,
    #[serde(default)]
    metadata: Option<BTreeMap<String, String>>,
}

#[derive(Deserialize)]
struct RawSubscription {
    id: String,
    customer: Option<String>,
    status: Option<SubscriptionStatus>,
    #[serde(default)]
    metadata: Option<BTreeMap<String, String>>,
    items: Option<RawItems>,
    current_period_start: Option<i64>,
    current_period_end: Option<i64>,
}

#[derive(Deserialize)]
struct RawItems {
    #[serde(default)]
    data: Vec<RawItem>,
}

#[derive(Deserialize)]
struct RawItem {
    price: Option<RawPrice>,
}

#[derive(Deserialize)]
struct RawPrice {
    id: String,
}

#[derive(Deserialize)]
struct RawInvoice {
    id: String,
    subscription: Option<String>,
    #[serde(default)]
    amount_paid: i64,
}

impl WebhookEvent {
    /// Parse an event body
    pub fn from_json(body: &str) -> CheckoutResult<Self> {
        let raw: RawEvent = serde_json::from_str(body).map_err(malformed)?;
        let object = raw.data.object;

        let event = match raw.kind.as_str() {
            "checkout.session.completed" => {
                let session: RawSession = serde_json::from_value(object).map_err(malformed)?;
                Self::CheckoutCompleted {
                    customer_id: session.customer,
                    subscription_id: session.subscription,
                    customer_email: session.customer_email,
                    metadata: session.metadata.unwrap_or_default(),
                }
            }
            "customer.subscription.created" => Self::SubscriptionCreated(subscription(object)?),
            "customer.subscription.updated" => Self::SubscriptionUpdated(subscription(object)?),
            "customer.subscription.deleted" => Self::SubscriptionDeleted {
                subscription_id: subscription(object)?.id,
            },
            "invoice.payment_succeeded" => {
                let invoice: RawInvoice = serde_json::from_value(object).map_err(malformed)?;
                Self::PaymentSucceeded {
                    invoice_id: invoice.id,
                    subscription_id: invoice.subscription,
                    amount_paid: MinorUnits::new(invoice.amount_paid),
                }
            }
            "invoice.payment_failed" => {
                let invoice: RawInvoice = serde_json::from_value(object).map_err(malformed)?;
                Self::PaymentFailed {
                    invoice_id: invoice.id,
                    subscription_id: invoice.subscription,
                }
            }
            _ => Self::Unhandled(raw.kind),
        };

        Ok(event)
    }

    /// Provider event type name
    pub fn kind(&self) -> &str {
        match self {
            Self::CheckoutCompleted { .. } => "checkout.session.completed",
            Self::SubscriptionCreated(_) => "customer.subscription.created",
            Self::SubscriptionUpdated(_) => "customer.subscription.updated",
            Self::SubscriptionDeleted { .. } => "customer.subscription.deleted",
            Self::PaymentSucceeded { .. } => "invoice.payment_succeeded",
            Self::PaymentFailed { .. } => "invoice.payment_failed",
            Self::Unhandled(kind) => kind,
        }
    }
}

fn subscription(object: Value) -> CheckoutResult<SubscriptionPayload> {
    let raw: RawSubscription = serde_json::from_value(object).map_err(malformed)?;
    let price_id = raw
        .items
        .and_then(|items| items.data.into_iter().next())
        .and_then(|item| item.price)
        .map(|price| price.id);

    Ok(SubscriptionPayload {
        id: raw.id,
        customer_id: raw.customer,
        status: raw.status,
        price_id,
        metadata: raw.metadata.unwrap_or_default(),
        current_period_start: timestamp(raw.current_period_start),
        current_period_end: timestamp(raw.current_period_end),
    })
}

/// Unix seconds to UTC; zero and absent both mean "not set"
fn timestamp(seconds: Option<i64>) -> Option<DateTime<Utc>> {
    seconds
        .filter(|&s| s != 0)
        .and_then(|s| Utc.timestamp_opt(s, 0).single())
}

fn malformed(e: serde_json::Error) -> CheckoutError {
    CheckoutError::MalformedEvent(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_completed() {
        let body = r#"{"type":"checkout.session.completed","data":{"object":{
            "customer":"cus_1","subscription":"sub_1","customer_email":"a@example.com",
            "metadata":{"tier":"basic","catType":"adult","duration":"1"}}}}"#;

        match WebhookEvent::from_json(body).unwrap() {
            WebhookEvent::CheckoutCompleted {
                customer_id,
                customer_email,
                metadata,
                ..
            } => {
                assert_eq!(customer_id.as_deref(), Some("cus_1"));
                assert_eq!(customer_email.as_deref(), Some("a@example.com"));
                assert_eq!(metadata["tier"], "basic");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_subscription_payload() {
        let body = r#"{"type":"customer.subscription.updated","data":{"object":{
            "id":"sub_1","customer":"cus_1","status":"past_due",
            "items":{"data":[{"price":{"id":"price_9"}}]},
            "current_period_start":1700000000,"current_period_end":0}}}"#;

        let WebhookEvent::SubscriptionUpdated(sub) = WebhookEvent::from_json(body).unwrap() else {
            panic!("expected subscription update");
        };
        assert_eq!(sub.status, Some(SubscriptionStatus::PastDue));
        assert_eq!(sub.price_id.as_deref(), Some("price_9"));
        assert_eq!(sub.current_period_start.unwrap().timestamp(), 1_700_000_000);
        assert_eq!(sub.current_period_end, None);
        assert!(sub.metadata.is_empty());
    }

    #[test]
    fn test_invoice_events() {
        let body = r#"{"type":"invoice.payment_succeeded","data":{"object":{
            "id":"in_1","subscription":"sub_1","amount_paid":16938}}}"#;
        assert_eq!(
            WebhookEvent::from_json(body).unwrap(),
            WebhookEvent::PaymentSucceeded {
                invoice_id: "in_1".into(),
                subscription_id: Some("sub_1".into()),
                amount_paid: MinorUnits::new(16938),
            }
        );

        let body = r#"{"type":"invoice.payment_failed","data":{"object":{"id":"in_2","subscription":null}}}"#;
        let event = WebhookEvent::from_json(body).unwrap();
        assert_eq!(event.kind(), "invoice.payment_failed");
    }

    #[test]
    fn test_unhandled_kind() {
        let body = r#"{"type":"customer.created","data":{"object":{"id":"cus_1"}}}"#;
        assert_eq!(
            WebhookEvent::from_json(body).unwrap(),
            WebhookEvent::Unhandled("customer.created".into())
        );
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            WebhookEvent::from_json("{}"),
            Err(CheckoutError::MalformedEvent(_))
        ));
        let body = r#"{"type":"customer.subscription.deleted","data":{"object":{}}}"#;
        assert!(matches!(
            WebhookEvent::from_json(body),
            Err(CheckoutError::MalformedEvent(_))
        ));
    }
}
