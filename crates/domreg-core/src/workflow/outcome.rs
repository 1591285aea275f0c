//! Registration outcomes and their user-facing text
//!
//! Every path through the workflow ends in exactly one
//! [`RegistrationOutcome`]. Rendering is a pure function of the outcome, so
//! the wording can be tested without a registrar.

use std::fmt;
use std::path::Path;

use crate::traits::{PricingQuote, RegistrantProfile};

/// Placeholder shown when the pricing lookup fails
pub const PRICING_UNAVAILABLE: &str = "Pricing information unavailable";

/// Registration parameters echoed back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSettings {
    /// Domain being registered
    pub domain: String,
    /// Registration period in years
    pub years: u32,
    /// WHOIS privacy enabled
    pub whois_privacy: bool,
    /// Custom nameservers (empty = registrar defaults)
    pub nameservers: Vec<String>,
}

impl RegistrationSettings {
    fn privacy_label(&self) -> &'static str {
        if self.whois_privacy { "Enabled" } else { "Disabled" }
    }
}

/// Identifiers of a completed purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    /// Order identifier
    pub order_id: String,
    /// Transaction identifier, when reported
    pub transaction_id: Option<String>,
    /// Registration date, when reported
    pub register_date: Option<String>,
    /// Amount charged, when reported
    pub charged_amount: Option<String>,
    /// Registrar's domain id, when reported
    pub domain_id: Option<String>,
}

/// Result of one registration attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The registrar reports the domain as taken
    Unavailable {
        /// Requested domain
        domain: String,
    },

    /// Domain is available but no usable registrant profile was found
    ProfileMissing {
        /// Requested domain
        domain: String,
        /// Where the profile was expected
        location: String,
        /// Why loading failed
        reason: String,
    },

    /// Dry run: everything checked, nothing bought
    Preview {
        /// Registrar display name
        registrar: &'static str,
        /// Echoed parameters
        settings: RegistrationSettings,
        /// Registrar premium flag
        premium: bool,
        /// Premium registration price, when reported
        premium_price: Option<String>,
        /// Pricing lookup result (None = lookup failed)
        pricing: Option<PricingQuote>,
        /// Contact that would be submitted
        profile: RegistrantProfile,
    },

    /// Purchase succeeded
    Registered {
        /// Registrar display name
        registrar: &'static str,
        /// Effective parameters
        settings: RegistrationSettings,
        /// Order identifiers
        receipt: RegistrationReceipt,
    },

    /// Purchase call returned without an order id, or without the
    /// registered flag
    Unconfirmed {
        /// Registrar display name
        registrar: &'static str,
        /// Requested domain
        domain: String,
    },

    /// Purchase call failed
    PurchaseFailed {
        /// Registrar display name
        registrar: &'static str,
        /// Requested domain
        domain: String,
        /// Error reported by the gateway
        error: String,
    },
}

impl fmt::Display for RegistrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { domain } => {
                write!(f, "Domain {} is not available for registration.", domain)
            }

            Self::ProfileMissing {
                domain,
                location,
                reason,
            } => {
                writeln!(f, "Domain {} is available for registration!", domain)?;
                writeln!(f)?;
                writeln!(
                    f,
                    "However, I could not find a registrant profile for contact information."
                )?;
                if Path::new(location).is_absolute() {
                    writeln!(
                        f,
                        "Please create the file \"{}\" with your contact details.",
                        location
                    )?;
                } else {
                    writeln!(
                        f,
                        "Please create a file named \"{}\" in the project root with your contact details.",
                        location
                    )?;
                }
                writeln!(
                    f,
                    "You can use \"{}\" as a template.",
                    crate::config::PROFILE_TEMPLATE_FILE
                )?;
                writeln!(f)?;
                write!(f, "Details: {}", reason)
            }

            Self::Preview {
                registrar,
                settings,
                premium,
                premium_price,
                pricing,
                profile,
            } => {
                writeln!(f, "Domain {} is available for registration!", settings.domain)?;
                if *premium {
                    writeln!(f)?;
                    writeln!(f, "⚠️ PREMIUM DOMAIN NOTICE ⚠️")?;
                    writeln!(
                        f,
                        "This is a premium domain name that may have a higher registration fee than standard domains."
                    )?;
                    if let Some(price) = premium_price {
                        writeln!(f, "Premium registration price: {}", price)?;
                    }
                }
                writeln!(f)?;
                match pricing {
                    Some(quote) => writeln!(f, "{}", quote)?,
                    None => writeln!(f, "{}", PRICING_UNAVAILABLE)?,
                }
                writeln!(f)?;
                writeln!(f, "Registration details:")?;
                writeln!(f, "- Domain: {}", settings.domain)?;
                writeln!(f, "- Period: {} year(s)", settings.years)?;
                if settings.nameservers.is_empty() {
                    writeln!(f, "- Default nameservers will be used")?;
                } else {
                    writeln!(f, "- Custom nameservers: {}", settings.nameservers.join(", "))?;
                }
                writeln!(f, "- WhoisGuard Privacy: {}", settings.privacy_label())?;
                writeln!(f)?;
                writeln!(f, "Contact information from your registrant profile:")?;
                writeln!(f, "{}", profile.display_lines())?;
                writeln!(f)?;
                writeln!(
                    f,
                    "To complete the registration, run this command again with confirmPurchase=true."
                )?;
                write!(
                    f,
                    "⚠️ Your {} account will be charged for this purchase. ⚠️",
                    registrar
                )
            }

            Self::Registered {
                registrar,
                settings,
                receipt,
            } => {
                writeln!(
                    f,
                    "✅ Success! Domain {} has been registered!",
                    settings.domain
                )?;
                writeln!(f)?;
                writeln!(f, "Order ID: {}", receipt.order_id)?;
                writeln!(
                    f,
                    "Transaction ID: {}",
                    receipt.transaction_id.as_deref().unwrap_or("Not reported")
                )?;
                writeln!(
                    f,
                    "Registration Date: {}",
                    receipt.register_date.as_deref().unwrap_or("Immediate")
                )?;
                if let Some(amount) = &receipt.charged_amount {
                    writeln!(f, "Charged Amount: {}", amount)?;
                }
                if let Some(domain_id) = &receipt.domain_id {
                    writeln!(f, "Domain ID: {}", domain_id)?;
                }
                writeln!(f, "Period: {} year(s)", settings.years)?;
                writeln!(f)?;
                writeln!(f, "WhoisGuard: {}", settings.privacy_label())?;
                if settings.nameservers.is_empty() {
                    writeln!(f, "Nameservers: Default {} DNS", registrar)?;
                } else {
                    writeln!(f, "Nameservers: {}", settings.nameservers.join(", "))?;
                }
                writeln!(f)?;
                write!(
                    f,
                    "You can manage your new domain through your {} account dashboard.",
                    registrar
                )
            }

            Self::Unconfirmed { registrar, domain } => {
                writeln!(
                    f,
                    "Something went wrong with the domain registration process for {}.",
                    domain
                )?;
                writeln!(
                    f,
                    "The API response did not contain the expected confirmation details."
                )?;
                writeln!(f)?;
                writeln!(
                    f,
                    "No charges should have been applied to your account for an unconfirmed registration,"
                )?;
                write!(
                    f,
                    "but please check your {} account to see if the domain was registered before trying again.",
                    registrar
                )
            }

            Self::PurchaseFailed {
                registrar,
                domain,
                error,
            } => {
                writeln!(f, "⚠️ Domain purchase failed!")?;
                writeln!(f)?;
                writeln!(
                    f,
                    "There was an error while attempting to register {}:",
                    domain
                )?;
                writeln!(f, "{}", error)?;
                writeln!(f)?;
                writeln!(
                    f,
                    "No charges have been applied to your account. Please try again later or check"
                )?;
                write!(f, "your {} account status and API limits.", registrar)
            }
        }
    }
}
