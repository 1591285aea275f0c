// # Profile Source Trait
//
// Defines the interface for loading the registrant contact record.
//
// ## Implementations
//
// - File-based (JSON): `profile::FileProfileSource`
// - In-memory: `profile::StaticProfileSource`
//
// The profile is re-read on every call; implementations must not cache it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Registrant contact record submitted when creating a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrantProfile {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Organization (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// First address line
    pub address1: String,
    /// Second address line (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// City
    pub city: String,
    /// State or province
    pub state_province: String,
    /// Postal code
    pub postal_code: String,
    /// Country code
    pub country: String,
    /// Phone number in registrar format (e.g., "+1.5555555555")
    pub phone: String,
    /// Contact email
    pub email: String,
}

impl RegistrantProfile {
    /// Contact information as a bulleted list for user-facing text
    pub fn display_lines(&self) -> String {
        let mut lines = vec![format!("- Name: {} {}", self.first_name, self.last_name)];
        if let Some(org) = &self.organization {
            lines.push(format!("- Organization: {}", org));
        }
        match &self.address2 {
            Some(address2) => lines.push(format!("- Address: {}, {}", self.address1, address2)),
            None => lines.push(format!("- Address: {}", self.address1)),
        }
        lines.push(format!("- City: {}", self.city));
        lines.push(format!("- State/Province: {}", self.state_province));
        lines.push(format!("- Postal Code: {}", self.postal_code));
        lines.push(format!("- Country: {}", self.country));
        lines.push(format!("- Phone: {}", self.phone));
        lines.push(format!("- Email: {}", self.email));
        lines.join("\n")
    }
}

/// Trait for registrant profile sources
///
/// # Errors
///
/// Implementations distinguish three failures:
/// - [`crate::Error::ProfileNotFound`]: nothing at the expected location
/// - [`crate::Error::ProfileIncomplete`]: mandatory fields missing
/// - [`crate::Error::Profile`]: I/O or parse failure
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Load and validate the registrant profile
    async fn load(&self) -> Result<RegistrantProfile, crate::Error>;

    /// Human-readable location (for logs)
    fn location(&self) -> String;
}
