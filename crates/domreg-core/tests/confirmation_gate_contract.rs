//! Workflow Contract Test: Confirmation Gate
//!
//! Constraints verified:
//! - Without confirmation nothing is bought
//! - With confirmation exactly one purchase call is made (no retry)
//! - Pricing is looked up on both paths and never blocks the purchase
//! - Only an order id with the registered flag counts as success
//! - Failed or unconfirmed purchases say whether charges were applied
//! - Nameservers reach the registrar in the order given
//!
//! If this test fails, someone has:
//! - Added automatic retries around the purchase call
//! - Made the preview path touch the purchase API

mod common;

use common::*;
use domreg_core::profile::StaticProfileSource;
use domreg_core::{RegistrationOutcome, RegistrationRequest, RegistrationWorkflow};
use std::sync::Arc;
use tokio_test::assert_ok;

fn workflow_with(registrar: MockRegistrar) -> (Arc<MockRegistrar>, RegistrationWorkflow) {
    let (mock, gateway) = shared(registrar);
    let workflow = RegistrationWorkflow::new(
        gateway,
        Arc::new(StaticProfileSource::new(sample_profile())),
    );
    (mock, workflow)
}

#[tokio::test]
async fn preview_echoes_parameters_without_purchasing() {
    let (mock, workflow) = workflow_with(MockRegistrar::available());

    let request = RegistrationRequest::new("example.com")
        .with_years(2)
        .with_whois_privacy(false);
    let text = workflow.register(&request).await;

    assert!(text.contains("- Domain: example.com"));
    assert!(text.contains("- Period: 2 year(s)"));
    assert!(text.contains("- WhoisGuard Privacy: Disabled"));
    assert!(text.contains("- Default nameservers will be used"));
    assert!(text.contains(&sample_profile().display_lines()));
    assert!(text.contains("confirmPurchase=true"));
    assert!(!text.contains("PREMIUM"));

    assert_eq!(mock.pricing_call_count(), 1);
    assert_eq!(mock.create_call_count(), 0, "preview must not purchase");
}

#[tokio::test]
async fn premium_domain_preview_carries_warning() {
    let (mock, workflow) = workflow_with(MockRegistrar::available().premium());

    let text = workflow
        .register(&RegistrationRequest::new("shop.io"))
        .await;

    assert!(text.contains("⚠️ PREMIUM DOMAIN NOTICE ⚠️"));
    assert!(text.contains("Premium registration price: 2500.00"));
    assert_eq!(mock.create_call_count(), 0);
}

#[tokio::test]
async fn confirmed_purchase_reports_order_and_transaction_ids() {
    let (mock, workflow) = workflow_with(MockRegistrar::available());

    let request = RegistrationRequest::new("example.com").with_confirmation(true);
    let text = workflow.register(&request).await;

    assert!(text.starts_with("✅ Success! Domain example.com has been registered!"));
    assert!(text.contains("Order ID: ORDER-1001"));
    assert!(text.contains("Transaction ID: TX-2002"));
    assert!(text.contains("Registration Date: Immediate"));
    assert!(text.contains("WhoisGuard: Enabled"));
    assert_eq!(mock.pricing_call_count(), 1, "pricing runs before the gate");
    assert_eq!(mock.create_call_count(), 1, "exactly one purchase call");
}

#[tokio::test]
async fn pricing_failure_does_not_block_confirmed_purchase() {
    let (mock, workflow) = workflow_with(MockRegistrar::available().failing_pricing("timed out"));

    let request = RegistrationRequest::new("example.com").with_confirmation(true);
    let outcome = assert_ok!(workflow.evaluate(&request).await);

    assert!(matches!(outcome, RegistrationOutcome::Registered { .. }));
    assert_eq!(mock.pricing_call_count(), 1);
    assert_eq!(mock.create_call_count(), 1);
}

#[tokio::test]
async fn order_not_marked_registered_is_unconfirmed() {
    let (mock, workflow) = workflow_with(
        MockRegistrar::available().with_create(CreateBehavior::NotRegistered {
            order_id: "ORDER-1001",
        }),
    );

    let request = RegistrationRequest::new("example.com").with_confirmation(true);
    let outcome = assert_ok!(workflow.evaluate(&request).await);

    assert!(matches!(outcome, RegistrationOutcome::Unconfirmed { .. }));
    assert!(outcome.to_string().contains("check your Namecheap account"));
    assert_eq!(mock.create_call_count(), 1);
}

#[tokio::test]
async fn confirmed_purchase_passes_nameservers_in_order() {
    let (mock, workflow) = workflow_with(MockRegistrar::available());

    let request = RegistrationRequest::new("example.com")
        .with_years(3)
        .with_nameservers("ns1.example.com, ns2.example.com")
        .with_confirmation(true);
    let outcome = assert_ok!(workflow.evaluate(&request).await);
    assert!(matches!(outcome, RegistrationOutcome::Registered { .. }));

    let order = mock.last_order().unwrap();
    assert_eq!(order.domain, "example.com");
    assert_eq!(order.years, 3);
    assert!(order.whois_privacy);
    assert_eq!(
        order.nameservers,
        vec!["ns1.example.com".to_string(), "ns2.example.com".to_string()]
    );
    assert_eq!(order.registrant, sample_profile());
}

#[tokio::test]
async fn missing_order_id_is_unconfirmed_and_mentions_charges() {
    let (mock, workflow) =
        workflow_with(MockRegistrar::available().with_create(CreateBehavior::MissingOrderId));

    let request = RegistrationRequest::new("example.com").with_confirmation(true);
    let outcome = assert_ok!(workflow.evaluate(&request).await);
    assert!(matches!(outcome, RegistrationOutcome::Unconfirmed { .. }));

    let text = outcome.to_string();
    assert!(text.contains("Something went wrong"));
    assert!(text.contains("No charges"));
    assert!(text.contains("Namecheap account"));
    assert_eq!(mock.create_call_count(), 1);
}

#[tokio::test]
async fn failed_purchase_quotes_error_and_is_not_retried() {
    let (mock, workflow) = workflow_with(
        MockRegistrar::available().with_create(CreateBehavior::Fail("connection reset")),
    );

    let request = RegistrationRequest::new("example.com").with_confirmation(true);
    let text = workflow.register(&request).await;

    assert!(text.starts_with("⚠️ Domain purchase failed!"));
    assert!(text.contains("connection reset"));
    assert!(text.contains("No charges have been applied to your account."));
    assert_eq!(mock.create_call_count(), 1, "purchase must not be retried");
}
