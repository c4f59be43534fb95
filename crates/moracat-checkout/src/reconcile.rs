//! Webhook reconciliation
//!
//! Applies provider events to the account store.

use std::sync::Arc;

use crate::error::CheckoutResult;
use crate::metadata::SubscriptionMetadata;
use crate::store::{AccountStore, SubscriptionRecord, SubscriptionStatus, SubscriptionUpdate};
use crate::webhook::{SubscriptionPayload, WebhookEvent};

/// What an event changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Customer id attached to this many users
    CustomerLinked { users: usize },
    /// Subscription record written for a user
    SubscriptionStored { user_id: String },
    /// This many subscription records updated
    SubscriptionsUpdated { count: usize },
    /// Event acknowledged without state change
    Acknowledged,
}

/// Applies webhook events to an [`AccountStore`]
pub struct WebhookReconciler {
    store: Arc<dyn AccountStore>,
}

impl WebhookReconciler {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Parse and apply an event body
    pub async fn handle_json(&self, body: &str) -> CheckoutResult<Reconciliation> {
        let event = WebhookEvent::from_json(body)?;
        self.handle(event).await
    }

    /// Apply a parsed event
    pub async fn handle(&self, event: WebhookEvent) -> CheckoutResult<Reconciliation> {
        let outcome = match event {
            WebhookEvent::CheckoutCompleted {
                customer_id,
                subscription_id,
                customer_email,
                ..
            } => {
                tracing::info!(?customer_id, ?subscription_id, "checkout completed");
                match (customer_email, customer_id) {
                    (Some(email), Some(customer_id)) => {
                        let users = self.store.link_customer(&email, &customer_id).await?;
                        Reconciliation::CustomerLinked { users }
                    }
                    _ => Reconciliation::Acknowledged,
                }
            }

            WebhookEvent::SubscriptionCreated(sub) => self.store_subscription(sub).await?,

            WebhookEvent::SubscriptionUpdated(sub) => {
                tracing::info!(subscription_id = %sub.id, status = ?sub.status, "subscription updated");
                let update = SubscriptionUpdate {
                    status: sub.status,
                    current_period_start: sub.current_period_start,
                    current_period_end: sub.current_period_end,
                };
                let count = self.store.update_subscription(&sub.id, update).await?;
                Reconciliation::SubscriptionsUpdated { count }
            }

            WebhookEvent::SubscriptionDeleted { subscription_id } => {
                tracing::info!(%subscription_id, "subscription deleted");
                let count = self
                    .store
                    .update_subscription(
                        &subscription_id,
                        SubscriptionUpdate::status(SubscriptionStatus::Canceled),
                    )
                    .await?;
                Reconciliation::SubscriptionsUpdated { count }
            }

            WebhookEvent::PaymentSucceeded {
                invoice_id,
                subscription_id,
                amount_paid,
            } => {
                tracing::info!(%invoice_id, ?subscription_id, amount = %amount_paid.to_amount(), "payment succeeded");
                Reconciliation::Acknowledged
            }

            WebhookEvent::PaymentFailed {
                invoice_id,
                subscription_id,
            } => {
                tracing::warn!(%invoice_id, ?subscription_id, "payment failed");
                match subscription_id {
                    Some(id) => {
                        let count = self
                            .store
                            .update_subscription(&id, SubscriptionUpdate::status(SubscriptionStatus::PastDue))
                            .await?;
                        Reconciliation::SubscriptionsUpdated { count }
                    }
                    None => Reconciliation::Acknowledged,
                }
            }

            WebhookEvent::Unhandled(kind) => {
                tracing::debug!(%kind, "unhandled webhook event");
                Reconciliation::Acknowledged
            }
        };

        Ok(outcome)
    }

    async fn store_subscription(&self, sub: SubscriptionPayload) -> CheckoutResult<Reconciliation> {
        tracing::info!(subscription_id = %sub.id, customer_id = ?sub.customer_id, "subscription created");

        let Some(customer_id) = sub.customer_id.as_deref() else {
            return Ok(Reconciliation::Acknowledged);
        };
        let Some(user) = self.store.find_user_by_customer(customer_id).await? else {
            tracing::warn!(%customer_id, "no user for customer");
            return Ok(Reconciliation::Acknowledged);
        };

        let meta = SubscriptionMetadata::from_map(&sub.metadata)?;
        let record = SubscriptionRecord {
            user_id: user.id.clone(),
            subscription_id: sub.id,
            price_id: sub.price_id.unwrap_or_default(),
            status: sub.status.unwrap_or_default(),
            tier: meta.tier,
            cat_type: meta.cat_type,
            duration: meta.duration,
            add_ons: meta.add_ons,
            current_period_start: sub.current_period_start,
            current_period_end: sub.current_period_end,
        };
        self.store.upsert_subscription(record).await?;

        Ok(Reconciliation::SubscriptionStored { user_id: user.id })
    }
}
