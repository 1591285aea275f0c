//! Test doubles and common utilities for workflow contract tests
//!
//! These doubles count every registrar call so tests can assert which
//! external operations a workflow path is allowed to perform.

#![allow(dead_code)]

use async_trait::async_trait;
use domreg_core::error::{Error, Result};
use domreg_core::traits::{
    Availability, CreateResult, DomainOrder, PriceTier, PricingQuote, ProfileSource,
    RegistrantProfile, RegistrarGateway,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// How the mock answers a create-domain call
#[derive(Debug, Clone)]
pub enum CreateBehavior {
    /// Success envelope with the given order and transaction ids
    Success {
        order_id: &'static str,
        transaction_id: &'static str,
    },
    /// Envelope without an order id
    MissingOrderId,
    /// Order id present but `Registered="false"`
    NotRegistered { order_id: &'static str },
    /// Transport or registrar error
    Fail(&'static str),
}

/// A mock RegistrarGateway that tracks calls
pub struct MockRegistrar {
    available: bool,
    premium: bool,
    check_error: Option<&'static str>,
    pricing_error: Option<&'static str>,
    create: CreateBehavior,
    check_calls: Arc<AtomicUsize>,
    pricing_calls: Arc<AtomicUsize>,
    create_calls: Arc<AtomicUsize>,
    last_order: Arc<Mutex<Option<DomainOrder>>>,
}

impl MockRegistrar {
    /// Registrar reporting every domain as available
    pub fn available() -> Self {
        Self {
            available: true,
            premium: false,
            check_error: None,
            pricing_error: None,
            create: CreateBehavior::Success {
                order_id: "ORDER-1001",
                transaction_id: "TX-2002",
            },
            check_calls: Arc::new(AtomicUsize::new(0)),
            pricing_calls: Arc::new(AtomicUsize::new(0)),
            create_calls: Arc::new(AtomicUsize::new(0)),
            last_order: Arc::new(Mutex::new(None)),
        }
    }

    /// Registrar reporting every domain as taken
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::available()
        }
    }

    pub fn premium(mut self) -> Self {
        self.premium = true;
        self
    }

    pub fn failing_check(mut self, message: &'static str) -> Self {
        self.check_error = Some(message);
        self
    }

    pub fn failing_pricing(mut self, message: &'static str) -> Self {
        self.pricing_error = Some(message);
        self
    }

    pub fn with_create(mut self, behavior: CreateBehavior) -> Self {
        self.create = behavior;
        self
    }

    pub fn check_call_count(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }

    pub fn pricing_call_count(&self) -> usize {
        self.pricing_calls.load(Ordering::SeqCst)
    }

    pub fn create_call_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// The order passed to the last create_domain call
    pub fn last_order(&self) -> Option<DomainOrder> {
        self.last_order.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistrarGateway for MockRegistrar {
    async fn check_availability(&self, domain: &str) -> Result<Availability> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.check_error {
            return Err(Error::registrar("2011166", message));
        }
        Ok(Availability {
            domain: domain.to_string(),
            available: self.available,
            premium: self.premium,
            premium_price: self.premium.then(|| "2500.00".to_string()),
        })
    }

    async fn pricing(&self, tld: &str, years: Option<u32>) -> Result<PricingQuote> {
        self.pricing_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.pricing_error {
            return Err(Error::http(message));
        }
        Ok(PricingQuote {
            tld: tld.to_string(),
            requested_years: years,
            tiers: vec![PriceTier {
                years: 1,
                price: "10.98".to_string(),
                regular_price: None,
                currency: "USD".to_string(),
            }],
        })
    }

    async fn create_domain(&self, order: &DomainOrder) -> Result<CreateResult> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_order.lock().unwrap() = Some(order.clone());

        match &self.create {
            CreateBehavior::Success {
                order_id,
                transaction_id,
            } => Ok(CreateResult {
                registered: true,
                order_id: Some(order_id.to_string()),
                transaction_id: Some(transaction_id.to_string()),
                ..Default::default()
            }),
            CreateBehavior::MissingOrderId => Ok(CreateResult::default()),
            CreateBehavior::NotRegistered { order_id } => Ok(CreateResult {
                registered: false,
                order_id: Some(order_id.to_string()),
                ..Default::default()
            }),
            CreateBehavior::Fail(message) => Err(Error::http(*message)),
        }
    }

    fn registrar_name(&self) -> &'static str {
        "Namecheap"
    }
}

/// Counts calls on a shared gateway
///
/// The workflow takes ownership of an `Arc<dyn RegistrarGateway>`; tests keep
/// a second `Arc<MockRegistrar>` to read the counters afterwards.
pub fn shared(registrar: MockRegistrar) -> (Arc<MockRegistrar>, Arc<dyn RegistrarGateway>) {
    let mock = Arc::new(registrar);
    let gateway: Arc<dyn RegistrarGateway> = mock.clone();
    (mock, gateway)
}

/// A ProfileSource that always fails
pub struct FailingProfileSource;

#[async_trait]
impl ProfileSource for FailingProfileSource {
    async fn load(&self) -> Result<RegistrantProfile> {
        Err(Error::ProfileNotFound("registrant-profile.json".into()))
    }

    fn location(&self) -> String {
        "registrant-profile.json".to_string()
    }
}

/// A complete registrant profile
pub fn sample_profile() -> RegistrantProfile {
    RegistrantProfile {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        organization: None,
        address1: "12 Analytical Row".to_string(),
        address2: None,
        city: "London".to_string(),
        state_province: "Greater London".to_string(),
        postal_code: "W1 1AA".to_string(),
        country: "GB".to_string(),
        phone: "+44.2071234567".to_string(),
        email: "ada@example.com".to_string(),
    }
}
