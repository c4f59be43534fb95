//! Account storage
//!
//! Users and their single subscription record. The webhook reconciler is the
//! only writer of subscription state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use moracat_pricing::cost_plus::{AddOn, CatProfile, Duration};
use moracat_pricing::Tier;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use uuid::Uuid;

/// Store result type
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    /// Customer id at the payment provider, set after the first checkout
    pub customer_id: Option<String>,
}

/// Subscription lifecycle status, as reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Incomplete,
    IncompleteExpired,
    Trialing,
    #[default]
    Active,
    PastDue,
    Canceled,
    Unpaid,
    Paused,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incomplete => "incomplete",
            Self::IncompleteExpired => "incomplete_expired",
            Self::Trialing => "trialing",
            Self::Active => "active",
            Self::PastDue => "past_due",
            Self::Canceled => "canceled",
            Self::Unpaid => "unpaid",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    pub user_id: String,
    pub subscription_id: String,
    pub price_id: String,
    pub status: SubscriptionStatus,
    pub tier: Tier,
    pub cat_type: CatProfile,
    pub duration: Duration,
    pub add_ons: BTreeMap<AddOn, u32>,
    pub current_period_start: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionUpdate {
    pub status: Option<SubscriptionStatus>,
    pub current_period_start: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
}

impl SubscriptionUpdate {
    pub fn status(status: SubscriptionStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    fn apply(&self, record: &mut SubscriptionRecord) {
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(start) = self.current_period_start {
            record.current_period_start = Some(start);
        }
        if let Some(end) = self.current_period_end {
            record.current_period_end = Some(end);
        }
    }
}

/// Account store trait
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Attach a provider customer id to every user with this email; returns the count
    async fn link_customer(&self, email: &str, customer_id: &str) -> StoreResult<usize>;

    /// User owning a provider customer id
    async fn find_user_by_customer(&self, customer_id: &str) -> StoreResult<Option<UserAccount>>;

    /// Create or replace the user's subscription record; a provider
    /// subscription id belongs to at most one user
    async fn upsert_subscription(&self, record: SubscriptionRecord) -> StoreResult<()>;

    /// Update every record with this provider subscription id; returns the count
    async fn update_subscription(
        &self,
        subscription_id: &str,
        update: SubscriptionUpdate,
    ) -> StoreResult<usize>;

    /// The user's subscription record
    async fn subscription_for_user(&self, user_id: &str) -> StoreResult<Option<SubscriptionRecord>>;
}

/// In-memory account store (for testing and development)
pub struct InMemoryAccountStore {
    users: RwLock<HashMap<String, UserAccount>>,
    subscriptions: RwLock<HashMap<String, SubscriptionRecord>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            subscriptions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a user; returns the generated id
    pub fn add_user(&self, email: impl Into<String>, name: Option<String>) -> String {
        let id = Uuid::new_v4().to_string();
        self.users.write().insert(
            id.clone(),
            UserAccount {
                id: id.clone(),
                email: email.into(),
                name,
                customer_id: None,
            },
        );
        id
    }

    pub fn user(&self, id: &str) -> Option<UserAccount> {
        self.users.read().get(id).cloned()
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn link_customer(&self, email: &str, customer_id: &str) -> StoreResult<usize> {
        let mut users = self.users.write();
        let mut linked = 0;
        for user in users.values_mut().filter(|u| u.email == email) {
            user.customer_id = Some(customer_id.to_string());
            linked += 1;
        }
        Ok(linked)
    }

    async fn find_user_by_customer(&self, customer_id: &str) -> StoreResult<Option<UserAccount>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.customer_id.as_deref() == Some(customer_id))
            .cloned())
    }

    async fn upsert_subscription(&self, record: SubscriptionRecord) -> StoreResult<()> {
        if !self.users.read().contains_key(&record.user_id) {
            return Err(StoreError::NotFound(record.user_id));
        }

        let mut subscriptions = self.subscriptions.write();
        let taken = subscriptions
            .values()
            .any(|r| r.subscription_id == record.subscription_id && r.user_id != record.user_id);
        if taken {
            return Err(StoreError::Conflict(record.subscription_id));
        }
        subscriptions.insert(record.user_id.clone(), record);
        Ok(())
    }

    async fn update_subscription(
        &self,
        subscription_id: &str,
        update: SubscriptionUpdate,
    ) -> StoreResult<usize> {
        let mut subscriptions = self.subscriptions.write();
        let mut updated = 0;
        for record in subscriptions
            .values_mut()
            .filter(|r| r.subscription_id == subscription_id)
        {
            update.apply(record);
            updated += 1;
        }
        Ok(updated)
    }

    async fn subscription_for_user(&self, user_id: &str) -> StoreResult<Option<SubscriptionRecord>> {
        Ok(self.subscriptions.read().get(user_id).cloned())
    }
}
