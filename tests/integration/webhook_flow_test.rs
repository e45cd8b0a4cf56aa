// Webhook processing over HTTP
//
// Drives the notify endpoint with signed gateway payloads and checks
// the resulting status transitions, lease activation, and
// notifications. Tampered and replayed deliveries must leave the
// system unchanged.

use actix_web::{test, App};
use serde_json::json;

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::TestHarness;
use yardpay::modules::payments::models::MoveInPaymentRequest;

/// Seeds a pending move-in payment through the service layer and
/// returns its transaction reference.
async fn initiate_move_in(h: &TestHarness) -> String {
    let request: MoveInPaymentRequest = serde_json::from_value(helpers::move_in_request_body())
        .expect("fixture should deserialize");
    let checkout = h
        .payment_service
        .start_move_in_payment(request)
        .await
        .expect("initiation should succeed");
    checkout.payment.transaction_reference
}

#[actix_web::test]
async fn test_completed_webhook_activates_lease_and_notifies_landlord() {
    let h = TestHarness::new();
    h.seed_lease("lease-1", "property-1", true);
    let app = test::init_service(App::new().configure(h.configure())).await;

    let reference = initiate_move_in(&h).await;

    let req = test::TestRequest::post()
        .uri("/payments/notify")
        .set_json(helpers::webhook_payload(&reference, "Complete"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "completed");

    let stored = h.payments.get(&reference).unwrap();
    assert_eq!(stored.status, "completed");
    assert!(stored.paid_at.is_some());
    assert!(stored.completed_at.is_some());
    assert_eq!(stored.gateway_status.as_deref(), Some("Complete"));

    // Move-in completion activates the lease and occupies the property
    assert!(h.leases.lease("lease-1").unwrap().is_active);
    assert_eq!(h.leases.property_status("property-1").as_deref(), Some("occupied"));

    // Landlord hears about the payment, and about the admin fee because
    // both parties have signed
    let landlord = h.notifier.sent_to("landlord-1");
    assert_eq!(landlord.len(), 2);
    assert_eq!(landlord[0].title, "Payment Received");
    assert_eq!(landlord[1].title, "Admin Fee Payment Required");
    assert!(h.notifier.sent_to("tenant-1").is_empty());
}

#[actix_web::test]
async fn test_replayed_webhook_is_acknowledged_without_side_effects() {
    let h = TestHarness::new();
    h.seed_lease("lease-1", "property-1", true);
    let app = test::init_service(App::new().configure(h.configure())).await;

    let reference = initiate_move_in(&h).await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/payments/notify")
            .set_json(helpers::webhook_payload(&reference, "Complete"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "completed");
    }

    // A late conflicting status cannot reopen the payment either
    let req = test::TestRequest::post()
        .uri("/payments/notify")
        .set_json(helpers::webhook_payload(&reference, "Cancelled"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "completed");

    assert_eq!(h.payments.get(&reference).unwrap().status, "completed");
    assert_eq!(h.notifier.sent_to("landlord-1").len(), 2);
    assert!(h.notifier.sent_to("tenant-1").is_empty());
}

#[actix_web::test]
async fn test_tampered_webhook_is_rejected() {
    let h = TestHarness::new();
    h.seed_lease("lease-1", "property-1", true);
    let app = test::init_service(App::new().configure(h.configure())).await;

    let reference = initiate_move_in(&h).await;

    let mut payload = helpers::webhook_payload(&reference, "Complete");
    payload["Amount"] = json!("0.01");

    let req = test::TestRequest::post()
        .uri("/payments/notify")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 403);

    let stored = h.payments.get(&reference).unwrap();
    assert_eq!(stored.status, "pending");
    assert!(!h.leases.lease("lease-1").unwrap().is_active);
    assert!(h.notifier.sent().is_empty());
}

#[actix_web::test]
async fn test_webhook_for_unknown_reference_is_not_found() {
    let h = TestHarness::new();
    let app = test::init_service(App::new().configure(h.configure())).await;

    let req = test::TestRequest::post()
        .uri("/payments/notify")
        .set_json(helpers::webhook_payload("no-such-payment", "Complete"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_cancelled_webhook_notifies_tenant() {
    let h = TestHarness::new();
    h.seed_lease("lease-1", "property-1", true);
    let app = test::init_service(App::new().configure(h.configure())).await;

    let reference = initiate_move_in(&h).await;

    let req = test::TestRequest::post()
        .uri("/payments/notify")
        .set_json(helpers::webhook_payload(&reference, "Abandoned"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "cancelled");

    let stored = h.payments.get(&reference).unwrap();
    assert_eq!(stored.status, "cancelled");
    assert!(stored.paid_at.is_none());
    assert!(stored.completed_at.is_none());

    // Failure path touches neither lease nor property
    assert!(!h.leases.lease("lease-1").unwrap().is_active);
    assert!(h.leases.property_status("property-1").is_none());

    let tenant = h.notifier.sent_to("tenant-1");
    assert_eq!(tenant.len(), 1);
    assert_eq!(tenant[0].title, "Payment Failed");
    assert!(h.notifier.sent_to("landlord-1").is_empty());
}

#[actix_web::test]
async fn test_unmapped_status_leaves_payment_untouched() {
    let h = TestHarness::new();
    let app = test::init_service(App::new().configure(h.configure())).await;

    let reference = initiate_move_in(&h).await;

    let req = test::TestRequest::post()
        .uri("/payments/notify")
        .set_json(helpers::webhook_payload(&reference, "PendingInvestigation"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "pending");

    let stored = h.payments.get(&reference).unwrap();
    assert_eq!(stored.status, "pending");
    assert!(stored.gateway_status.is_none());
    assert!(h.notifier.sent().is_empty());
}

#[actix_web::test]
async fn test_rent_completion_skips_lease_side_effects() {
    let h = TestHarness::new();
    h.seed_lease("lease-1", "property-1", true);
    let app = test::init_service(App::new().configure(h.configure())).await;

    let req = test::TestRequest::post()
        .uri("/payments/rent")
        .set_json(helpers::rent_request_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let reference = body["payment"]["transaction_reference"]
        .as_str()
        .unwrap()
        .to_string();

    let req = test::TestRequest::post()
        .uri("/payments/notify")
        .set_json(helpers::webhook_payload(&reference, "Successful"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    assert_eq!(h.payments.get(&reference).unwrap().status, "completed");
    assert!(!h.leases.lease("lease-1").unwrap().is_active);
    assert!(h.leases.property_status("property-1").is_none());

    // Rent has no lease attached, so only the payment notice goes out
    let landlord = h.notifier.sent_to("landlord-1");
    assert_eq!(landlord.len(), 1);
    assert_eq!(landlord[0].title, "Payment Received");
}

#[actix_web::test]
async fn test_notifier_failure_does_not_block_the_transition() {
    let h = TestHarness::new();
    h.seed_lease("lease-1", "property-1", true);
    h.notifier.set_failing(true);
    let app = test::init_service(App::new().configure(h.configure())).await;

    let reference = initiate_move_in(&h).await;

    let req = test::TestRequest::post()
        .uri("/payments/notify")
        .set_json(helpers::webhook_payload(&reference, "Complete"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // Status and lease effects land even though every notification failed
    assert_eq!(h.payments.get(&reference).unwrap().status, "completed");
    assert!(h.leases.lease("lease-1").unwrap().is_active);
    assert!(h.notifier.sent().is_empty());
}
