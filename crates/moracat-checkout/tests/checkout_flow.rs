//! Checkout to webhook round trip against in-memory collaborators

use async_trait::async_trait;
use moracat_checkout::{
    AccountStore, AuthenticatedUser, CheckoutConfig, CheckoutRequest, CheckoutService,
    CheckoutSession, CheckoutSessionRequest, GatewayError, InMemoryAccountStore, PaymentGateway,
    Reconciliation, SubscriptionStatus, WebhookReconciler,
};
use moracat_pricing::cost_plus::{AddOn, CatProfile};
use moracat_pricing::{calculate_price, SubscriptionConfig, Tier};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Default)]
struct RecordingGateway {
    last: Mutex<Option<CheckoutSessionRequest>>,
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        *self.last.lock() = Some(request.clone());
        Ok(CheckoutSession {
            id: "cs_test".into(),
            url: Some("https://pay.example/cs_test".into()),
        })
    }
}

fn subscription_created(metadata: &BTreeMap<String, String>) -> String {
    serde_json::json!({
        "type": "customer.subscription.created",
        "data": {"object": {
            "id": "sub_1",
            "customer": "cus_1",
            "status": "active",
            "items": {"data": [{"price": {"id": "price_1"}}]},
            "metadata": metadata,
            "current_period_start": 1_700_000_000,
            "current_period_end": 1_702_592_000
        }}
    })
    .to_string()
}

#[tokio::test]
async fn test_checkout_then_webhooks() {
    let store = Arc::new(InMemoryAccountStore::new());
    let user_id = store.add_user("sara@example.com", Some("Sara".into()));
    let gateway = Arc::new(RecordingGateway::default());
    let service = CheckoutService::new(gateway.clone(), CheckoutConfig::default());
    let reconciler = WebhookReconciler::new(store.clone());

    let user = AuthenticatedUser {
        id: user_id.clone(),
        email: Some("sara@example.com".into()),
    };
    let request = CheckoutRequest::from_json(
        r#"{"config":{"tier":"premium","catType":"adult","duration":1,"addOns":{"treat_pack":2}}}"#,
    )
    .unwrap();

    let session = service.create_session(&request, Some(&user)).await.unwrap();
    assert_eq!(session.id, "cs_test");

    let sent = gateway.last.lock().clone().unwrap();
    let expected = calculate_price(
        &SubscriptionConfig::new(Tier::Premium, CatProfile::Adult).with_add_on(AddOn::TreatPack, 2),
    );
    assert_eq!(sent.line_items[0].unit_amount.to_amount(), expected.final_monthly_price);

    let completed = serde_json::json!({
        "type": "checkout.session.completed",
        "data": {"object": {
            "customer": "cus_1",
            "subscription": "sub_1",
            "customer_email": "sara@example.com",
            "metadata": sent.metadata
        }}
    })
    .to_string();
    assert_eq!(
        reconciler.handle_json(&completed).await.unwrap(),
        Reconciliation::CustomerLinked { users: 1 }
    );

    let created = subscription_created(&sent.subscription_metadata);
    assert_eq!(
        reconciler.handle_json(&created).await.unwrap(),
        Reconciliation::SubscriptionStored {
            user_id: user_id.clone()
        }
    );

    let record = store.subscription_for_user(&user_id).await.unwrap().unwrap();
    assert_eq!(record.tier, Tier::Premium);
    assert_eq!(record.add_ons[&AddOn::TreatPack], 2);
    assert_eq!(record.status, SubscriptionStatus::Active);

    let deleted = r#"{"type":"customer.subscription.deleted","data":{"object":{"id":"sub_1"}}}"#;
    reconciler.handle_json(deleted).await.unwrap();
    let record = store.subscription_for_user(&user_id).await.unwrap().unwrap();
    assert_eq!(record.status, SubscriptionStatus::Canceled);
}

#[tokio::test]
async fn test_client_price_is_ignored() {
    let gateway = Arc::new(RecordingGateway::default());
    let service = CheckoutService::new(gateway.clone(), CheckoutConfig::default());

    let request = CheckoutRequest::from_json(
        r#"{"config":{"tier":"basic","catType":"adult","duration":1,"price":1},"price":1}"#,
    )
    .unwrap();
    service.create_session(&request, None).await.unwrap();

    let sent = gateway.last.lock().clone().unwrap();
    assert_eq!(sent.line_items[0].unit_amount.as_i64(), 16938);
}
