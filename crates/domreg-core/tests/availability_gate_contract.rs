//! Workflow Contract Test: Availability Gate
//!
//! Constraints verified:
//! - An unavailable domain ends the workflow after one availability call
//! - No pricing or purchase call follows, even with confirmation
//! - A failed availability check is reported as text, never propagated
//!
//! If this test fails, someone has:
//! - Moved pricing or profile loading ahead of the availability check
//! - Let a confirmed request reach the purchase call for a taken domain

mod common;

use common::*;
use domreg_core::{RegistrationOutcome, RegistrationRequest, RegistrationWorkflow};
use domreg_core::profile::StaticProfileSource;
use std::sync::Arc;
use tokio_test::assert_ok;

#[tokio::test]
async fn unavailable_domain_stops_after_availability_check() {
    let (mock, gateway) = shared(MockRegistrar::unavailable());
    let workflow = RegistrationWorkflow::new(
        gateway,
        Arc::new(StaticProfileSource::new(sample_profile())),
    );

    let request = RegistrationRequest::new("taken.com").with_confirmation(true);
    let text = workflow.register(&request).await;

    assert_eq!(text, "Domain taken.com is not available for registration.");
    assert_eq!(mock.check_call_count(), 1);
    assert_eq!(mock.pricing_call_count(), 0, "no pricing for a taken domain");
    assert_eq!(mock.create_call_count(), 0, "no purchase for a taken domain");
}

#[tokio::test]
async fn unavailable_domain_resolves_to_unavailable_outcome() {
    let (_mock, gateway) = shared(MockRegistrar::unavailable());
    let workflow = RegistrationWorkflow::new(gateway, Arc::new(FailingProfileSource));

    let outcome = assert_ok!(
        workflow
            .evaluate(&RegistrationRequest::new("taken.com"))
            .await
    );

    assert_eq!(
        outcome,
        RegistrationOutcome::Unavailable {
            domain: "taken.com".to_string()
        }
    );
}

#[tokio::test]
async fn failed_availability_check_renders_generic_error() {
    let (mock, gateway) = shared(MockRegistrar::available().failing_check("API key is invalid"));
    let workflow = RegistrationWorkflow::new(
        gateway,
        Arc::new(StaticProfileSource::new(sample_profile())),
    );

    let request = RegistrationRequest::new("example.com").with_confirmation(true);
    let text = workflow.register(&request).await;

    assert!(text.starts_with("Error registering domain: "), "got: {}", text);
    assert!(text.contains("API key is invalid"));
    assert_eq!(mock.pricing_call_count(), 0);
    assert_eq!(mock.create_call_count(), 0);
}

#[tokio::test]
async fn surrounding_whitespace_is_ignored_like_lookups() {
    let (mock, gateway) = shared(MockRegistrar::available());
    let workflow = RegistrationWorkflow::new(
        gateway.clone(),
        Arc::new(StaticProfileSource::new(sample_profile())),
    );

    let outcome = assert_ok!(
        workflow
            .evaluate(&RegistrationRequest::new(" example.com "))
            .await
    );
    match outcome {
        RegistrationOutcome::Preview { settings, .. } => assert_eq!(settings.domain, "example.com"),
        other => panic!("expected Preview, got {:?}", other),
    }

    let lookup = domreg_core::DomainLookup::new(gateway);
    assert_eq!(
        lookup.check_domain(" example.com ").await,
        "Domain example.com is available for registration."
    );
    assert_eq!(mock.check_call_count(), 2);
}
