// # Registrar Gateway Trait
//
// Defines the interface for the domain registrar's remote API.
//
// ## Implementations
//
// - Namecheap: `domreg-registrar-namecheap` crate
//
// ## Usage
//
// ```rust,ignore
// use domreg_core::RegistrarGateway;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let gateway = /* RegistrarGateway implementation */;
//
//     let availability = gateway.check_availability("example.com").await?;
//     if availability.available {
//         let quote = gateway.pricing("com", Some(1)).await?;
//         println!("{}", quote);
//     }
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::fmt;

use crate::traits::profile_source::RegistrantProfile;

/// Availability of one domain name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    /// The domain as reported by the registrar
    pub domain: String,
    /// Whether the domain can be registered
    pub available: bool,
    /// Whether the registrar flags the name as premium
    pub premium: bool,
    /// Premium registration price, when the registrar reports one
    pub premium_price: Option<String>,
}

/// One registration price for a given period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTier {
    /// Registration period in years
    pub years: u32,
    /// Price charged to this account
    pub price: String,
    /// List price, when it differs from `price`
    pub regular_price: Option<String>,
    /// ISO currency code
    pub currency: String,
}

/// Registration pricing for one TLD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingQuote {
    /// TLD without the leading dot
    pub tld: String,
    /// Period the caller asked about, highlighted when rendered
    pub requested_years: Option<u32>,
    /// Published tiers, ordered by period
    pub tiers: Vec<PriceTier>,
}

impl PricingQuote {
    /// The tier matching the requested period, if published
    pub fn requested_tier(&self) -> Option<&PriceTier> {
        let years = self.requested_years?;
        self.tiers.iter().find(|tier| tier.years == years)
    }
}

impl fmt::Display for PricingQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tier) = self.requested_tier() {
            writeln!(
                f,
                "Price for {} year(s) of .{}: {} {}",
                tier.years, self.tld, tier.price, tier.currency
            )?;
            writeln!(f)?;
        }
        write!(f, "Registration pricing for .{}:", self.tld)?;
        for tier in &self.tiers {
            write!(f, "\n- {} year(s): {} {}", tier.years, tier.price, tier.currency)?;
            if let Some(regular) = &tier.regular_price {
                write!(f, " (regular price {} {})", regular, tier.currency)?;
            }
        }
        Ok(())
    }
}

/// A confirmed purchase to submit to the registrar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainOrder {
    /// Domain to register
    pub domain: String,
    /// Registration period in years
    pub years: u32,
    /// Enable WHOIS privacy
    pub whois_privacy: bool,
    /// Custom nameservers in order (empty = registrar defaults)
    pub nameservers: Vec<String>,
    /// Contact used for registrant, technical, admin and billing roles
    pub registrant: RegistrantProfile,
}

/// What the registrar reported for a create-domain call
///
/// Fields are optional because the registrar may answer with an envelope
/// that lacks them; deciding whether that counts as success is up to the
/// caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateResult {
    /// Registrar's "Registered" flag
    pub registered: bool,
    /// Order identifier (success marker)
    pub order_id: Option<String>,
    /// Transaction identifier
    pub transaction_id: Option<String>,
    /// Registration date, when reported
    pub register_date: Option<String>,
    /// Amount charged, when reported
    pub charged_amount: Option<String>,
    /// Registrar's internal domain id
    pub domain_id: Option<String>,
}

/// Trait for registrar API implementations
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// ## Rules
///
/// - One API exchange per method call
/// - No retry or backoff: a failed call is reported, never repeated
/// - No caching of domain data between calls
/// - Credentials never appear in logs or errors
#[async_trait]
pub trait RegistrarGateway: Send + Sync {
    /// Check whether a domain can be registered
    ///
    /// # Returns
    ///
    /// - `Ok(Availability)`: availability and premium flag
    /// - `Err(Error)`: transport failure or registrar error envelope
    async fn check_availability(&self, domain: &str) -> Result<Availability, crate::Error>;

    /// Look up registration pricing for a TLD
    ///
    /// # Parameters
    ///
    /// - `tld`: TLD without the leading dot (e.g., "com")
    /// - `years`: Period the caller is interested in, if any
    async fn pricing(&self, tld: &str, years: Option<u32>)
    -> Result<PricingQuote, crate::Error>;

    /// Submit a domain purchase
    ///
    /// This bills the registrar account when it succeeds.
    async fn create_domain(&self, order: &DomainOrder) -> Result<CreateResult, crate::Error>;

    /// Registrar name (for logging and user-facing text)
    fn registrar_name(&self) -> &'static str;
}
