//! Workflow Contract Test: Soft Failures and Input Validation
//!
//! Constraints verified:
//! - A pricing failure only changes the pricing line
//! - Invalid input is rejected before any registrar call
//! - Lookup reports turn registrar errors into text

mod common;

use common::*;
use domreg_core::profile::StaticProfileSource;
use domreg_core::workflow::PRICING_UNAVAILABLE;
use domreg_core::{DomainLookup, RegistrationOutcome, RegistrationRequest, RegistrationWorkflow};
use std::sync::Arc;
use tokio_test::assert_err;

#[tokio::test]
async fn pricing_failure_keeps_preview_path() {
    let (mock, gateway) = shared(MockRegistrar::available().failing_pricing("timed out"));
    let workflow = RegistrationWorkflow::new(
        gateway,
        Arc::new(StaticProfileSource::new(sample_profile())),
    );

    let outcome = workflow
        .evaluate(&RegistrationRequest::new("example.com"))
        .await
        .unwrap();

    match &outcome {
        RegistrationOutcome::Preview { pricing, .. } => assert!(pricing.is_none()),
        other => panic!("expected Preview, got {:?}", other),
    }
    let text = outcome.to_string();
    assert!(text.contains(PRICING_UNAVAILABLE));
    assert!(text.contains("- Domain: example.com"));
    assert_eq!(mock.pricing_call_count(), 1);
    assert_eq!(mock.create_call_count(), 0);
}

#[tokio::test]
async fn pricing_success_is_rendered_in_preview() {
    let (_mock, gateway) = shared(MockRegistrar::available());
    let workflow = RegistrationWorkflow::new(
        gateway,
        Arc::new(StaticProfileSource::new(sample_profile())),
    );

    let text = workflow
        .register(&RegistrationRequest::new("example.com"))
        .await;

    assert!(text.contains("Price for 1 year(s) of .com: 10.98 USD"));
    assert!(!text.contains(PRICING_UNAVAILABLE));
}

#[tokio::test]
async fn invalid_input_makes_no_registrar_calls() {
    let (mock, gateway) = shared(MockRegistrar::available());
    let workflow = RegistrationWorkflow::new(
        gateway,
        Arc::new(StaticProfileSource::new(sample_profile())),
    );

    for request in [
        RegistrationRequest::new("localhost").with_confirmation(true),
        RegistrationRequest::new("example.com").with_years(0),
        RegistrationRequest::new("example.com").with_years(11),
        RegistrationRequest::new("example.com").with_nameservers("ns1.example.com, bad_ns!"),
    ] {
        assert_err!(workflow.evaluate(&request).await);
        let text = workflow.register(&request).await;
        assert!(text.starts_with("Error registering domain: "), "got: {}", text);
    }

    assert_eq!(mock.check_call_count(), 0);
    assert_eq!(mock.pricing_call_count(), 0);
    assert_eq!(mock.create_call_count(), 0);
}

#[tokio::test]
async fn lookup_reports_render_text() {
    let (_mock, gateway) = shared(MockRegistrar::available());
    let lookup = DomainLookup::new(gateway);

    assert_eq!(
        lookup.check_domain("example.com").await,
        "Domain example.com is available for registration."
    );
    let pricing = lookup.get_pricing(".COM").await;
    assert!(pricing.starts_with("Registration pricing for .com:"), "got: {}", pricing);

    let (_mock, gateway) = shared(MockRegistrar::unavailable());
    let lookup = DomainLookup::new(gateway);
    assert_eq!(
        lookup.check_domain("taken.com").await,
        "Domain taken.com is not available for registration."
    );
}

#[tokio::test]
async fn lookup_errors_render_text() {
    let (mock, gateway) = shared(
        MockRegistrar::available()
            .failing_check("API key is invalid")
            .failing_pricing("timed out"),
    );
    let lookup = DomainLookup::new(gateway);

    assert!(lookup
        .check_domain("example.com")
        .await
        .starts_with("Error checking domain: "));
    assert!(lookup
        .get_pricing("com")
        .await
        .starts_with("Error retrieving pricing: "));

    assert!(lookup.check_domain("not a domain").await.starts_with("Error checking domain: "));
    assert_eq!(mock.check_call_count(), 1, "invalid names never reach the registrar");
}
