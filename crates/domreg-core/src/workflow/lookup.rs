// # Domain Lookup
//
// Read-only registrar queries behind the check and pricing tools.
// Like the registration workflow, both reports always produce text.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{normalize_tld, validate_domain_name};
use crate::error::Result;
use crate::traits::{Availability, PricingQuote, RegistrarGateway};

/// Availability and pricing reports
#[derive(Clone)]
pub struct DomainLookup {
    gateway: Arc<dyn RegistrarGateway>,
}

impl DomainLookup {
    /// Create a lookup over `gateway`
    pub fn new(gateway: Arc<dyn RegistrarGateway>) -> Self {
        Self { gateway }
    }

    /// Check one domain and render the result
    pub async fn check_domain(&self, domain: &str) -> String {
        match self.availability(domain).await {
            Ok(availability) => render_availability(&availability),
            Err(e) => {
                warn!("Availability check for {} failed: {}", domain, e);
                format!("Error checking domain: {}", e)
            }
        }
    }

    /// Look up pricing for a TLD ("com" or ".com") and render it
    pub async fn get_pricing(&self, tld: &str) -> String {
        match self.pricing(tld).await {
            Ok(quote) => quote.to_string(),
            Err(e) => {
                warn!("Pricing lookup for {} failed: {}", tld, e);
                format!("Error retrieving pricing: {}", e)
            }
        }
    }

    /// Validated availability check
    pub async fn availability(&self, domain: &str) -> Result<Availability> {
        let domain = domain.trim();
        validate_domain_name(domain)?;
        info!("Checking availability of {}", domain);
        self.gateway.check_availability(domain).await
    }

    /// Normalized pricing lookup
    pub async fn pricing(&self, tld: &str) -> Result<PricingQuote> {
        let tld = normalize_tld(tld)?;
        info!("Fetching registration pricing for .{}", tld);
        self.gateway.pricing(&tld, None).await
    }
}

fn render_availability(availability: &Availability) -> String {
    if !availability.available {
        return format!(
            "Domain {} is not available for registration.",
            availability.domain
        );
    }

    let mut text = format!(
        "Domain {} is available for registration.",
        availability.domain
    );
    if availability.premium {
        text.push_str("\n\n⚠️ PREMIUM DOMAIN NOTICE ⚠️\nThis is a premium domain name that may have a higher registration fee than standard domains.");
        if let Some(price) = &availability.premium_price {
            text.push_str(&format!("\nPremium registration price: {}", price));
        }
    }
    text
}
