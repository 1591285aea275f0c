//! Domain registration workflow
//!
//! The RegistrationWorkflow is responsible for:
//! - Validating the caller's request
//! - Checking availability before anything else
//! - Loading the registrant profile
//! - Fetching pricing (best effort)
//! - Submitting the purchase only when explicitly confirmed
//!
//! ## Flow
//!
//! ```text
//!   RegistrationRequest
//!           │
//!           ▼
//!   ┌───────────────┐   taken    ┌──────────────┐
//!   │ availability  │──────────▶│ Unavailable  │
//!   └───────────────┘            └──────────────┘
//!           │ available
//!           ▼
//!   ┌───────────────┐   error    ┌────────────────┐
//!   │ load profile  │──────────▶│ ProfileMissing │
//!   └───────────────┘            └────────────────┘
//!           │
//!           ▼
//!   ┌───────────────┐
//!   │ pricing       │  (soft: failure only changes the pricing text)
//!   └───────────────┘
//!           │
//!           ▼
//!   ┌───────────────┐  no confirm ┌──────────┐
//!   │ gate          │───────────▶│ Preview  │
//!   └───────────────┘             └──────────┘
//!           │ confirmed
//!           ▼
//!   ┌───────────────┐
//!   │ create domain │──▶ Registered | Unconfirmed | PurchaseFailed
//!   └───────────────┘
//! ```
//!
//! Only the last step spends money, and it runs at most once per call.

pub mod lookup;
pub mod outcome;

pub use lookup::DomainLookup;
pub use outcome::{
    PRICING_UNAVAILABLE, RegistrationOutcome, RegistrationReceipt, RegistrationSettings,
};

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::{RegistrationRequest, tld_of};
use crate::error::Result;
use crate::traits::{DomainOrder, PricingQuote, ProfileSource, RegistrarGateway};

/// Orchestrates one domain registration attempt
///
/// Cheap to clone: both collaborators are shared.
#[derive(Clone)]
pub struct RegistrationWorkflow {
    /// Registrar API
    gateway: Arc<dyn RegistrarGateway>,

    /// Registrant contact source
    profiles: Arc<dyn ProfileSource>,
}

impl RegistrationWorkflow {
    /// Create a new workflow
    ///
    /// # Parameters
    ///
    /// - `gateway`: Registrar gateway implementation
    /// - `profiles`: Registrant profile source
    pub fn new(gateway: Arc<dyn RegistrarGateway>, profiles: Arc<dyn ProfileSource>) -> Self {
        Self { gateway, profiles }
    }

    /// Run a registration attempt and render the result
    ///
    /// Never fails: errors that escape the workflow are rendered as a
    /// generic error message.
    pub async fn register(&self, request: &RegistrationRequest) -> String {
        match self.evaluate(request).await {
            Ok(outcome) => outcome.to_string(),
            Err(e) => {
                error!("Registration of {} aborted: {}", request.domain, e);
                format!("Error registering domain: {}", e)
            }
        }
    }

    /// Run a registration attempt
    ///
    /// # Returns
    ///
    /// - `Ok(RegistrationOutcome)`: the path the attempt took
    /// - `Err(Error)`: invalid input, or the availability check failed
    ///
    /// Purchase failures are outcomes, not errors.
    pub async fn evaluate(&self, request: &RegistrationRequest) -> Result<RegistrationOutcome> {
        request.validate()?;
        let domain = request.domain.trim().to_string();
        let registrar = self.gateway.registrar_name();

        info!(
            "Registration requested for {} ({} year(s), confirmed: {})",
            domain, request.years, request.confirm_purchase
        );

        let availability = self.gateway.check_availability(&domain).await?;
        if !availability.available {
            info!("{} is not available", domain);
            return Ok(RegistrationOutcome::Unavailable { domain });
        }

        let profile = match self.profiles.load().await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Registrant profile unusable: {}", e);
                return Ok(RegistrationOutcome::ProfileMissing {
                    domain,
                    location: self.profiles.location(),
                    reason: e.to_string(),
                });
            }
        };

        let settings = RegistrationSettings {
            domain: domain.clone(),
            years: request.years,
            whois_privacy: request.enable_whois_privacy,
            nameservers: request.nameserver_list(),
        };

        let pricing = self.fetch_pricing(&domain, request.years).await;

        if !request.confirm_purchase {
            debug!("Returning preview for {}", domain);
            return Ok(RegistrationOutcome::Preview {
                registrar,
                settings,
                premium: availability.premium,
                premium_price: availability.premium_price,
                pricing,
                profile,
            });
        }

        let order = DomainOrder {
            domain: domain.clone(),
            years: settings.years,
            whois_privacy: settings.whois_privacy,
            nameservers: settings.nameservers.clone(),
            registrant: profile,
        };

        match pricing.as_ref().and_then(PricingQuote::requested_tier) {
            Some(tier) => info!(
                "Submitting purchase of {} to {} (listed at {} {})",
                domain, registrar, tier.price, tier.currency
            ),
            None => info!("Submitting purchase of {} to {}", domain, registrar),
        }
        let outcome = match self.gateway.create_domain(&order).await {
            Ok(result) => match result.order_id {
                Some(order_id) if result.registered => {
                    info!("{} registered (order {})", domain, order_id);
                    RegistrationOutcome::Registered {
                        registrar,
                        settings,
                        receipt: RegistrationReceipt {
                            order_id,
                            transaction_id: result.transaction_id,
                            register_date: result.register_date,
                            charged_amount: result.charged_amount,
                            domain_id: result.domain_id,
                        },
                    }
                }
                Some(order_id) => {
                    warn!(
                        "Purchase of {} returned order {} but is not marked registered",
                        domain, order_id
                    );
                    RegistrationOutcome::Unconfirmed { registrar, domain }
                }
                None => {
                    warn!("Purchase of {} returned no order id", domain);
                    RegistrationOutcome::Unconfirmed { registrar, domain }
                }
            },
            Err(e) => {
                error!("Purchase of {} failed: {}", domain, e);
                RegistrationOutcome::PurchaseFailed {
                    registrar,
                    domain,
                    error: e.to_string(),
                }
            }
        };

        Ok(outcome)
    }

    /// Best-effort pricing lookup
    async fn fetch_pricing(&self, domain: &str, years: u32) -> Option<PricingQuote> {
        let tld = match tld_of(domain) {
            Ok(tld) => tld,
            Err(e) => {
                warn!("Cannot derive TLD of {}: {}", domain, e);
                return None;
            }
        };

        match self.gateway.pricing(&tld, Some(years)).await {
            Ok(quote) => Some(quote),
            Err(e) => {
                warn!("Pricing lookup for .{} failed: {}", tld, e);
                None
            }
        }
    }
}
