//! Registration request and domain name helpers

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Shortest registration period the registrar accepts (in years)
pub const MIN_YEARS: u32 = 1;

/// Longest registration period the registrar accepts (in years)
pub const MAX_YEARS: u32 = 10;

/// A single registration attempt, built per tool call
///
/// Nothing here survives between a preview call and the confirming call:
/// the caller re-supplies every field and everything is re-verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// Domain name to register (e.g., "example.com")
    pub domain: String,

    /// Registration period in years
    #[serde(default = "default_years")]
    pub years: u32,

    /// Comma-separated custom nameservers, as supplied by the caller
    #[serde(default)]
    pub nameservers: Option<String>,

    /// Perform the purchase instead of previewing it
    #[serde(default)]
    pub confirm_purchase: bool,

    /// Enable WHOIS privacy (WhoisGuard)
    #[serde(default = "default_privacy")]
    pub enable_whois_privacy: bool,
}

impl RegistrationRequest {
    /// Create a preview request with default settings
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            years: default_years(),
            nameservers: None,
            confirm_purchase: false,
            enable_whois_privacy: default_privacy(),
        }
    }

    /// Set the registration period
    pub fn with_years(mut self, years: u32) -> Self {
        self.years = years;
        self
    }

    /// Set the comma-separated nameserver list
    pub fn with_nameservers(mut self, nameservers: impl Into<String>) -> Self {
        self.nameservers = Some(nameservers.into());
        self
    }

    /// Set the confirmation flag
    pub fn with_confirmation(mut self, confirm: bool) -> Self {
        self.confirm_purchase = confirm;
        self
    }

    /// Enable or disable WHOIS privacy
    pub fn with_whois_privacy(mut self, enabled: bool) -> Self {
        self.enable_whois_privacy = enabled;
        self
    }

    /// Custom nameservers split on commas and trimmed, in order
    ///
    /// Empty entries are dropped, so `None`, `""` and `" , "` all mean
    /// "use the registrar defaults".
    pub fn nameserver_list(&self) -> Vec<String> {
        self.nameservers
            .as_deref()
            .map(split_nameservers)
            .unwrap_or_default()
    }

    /// Validate the request before any registrar call
    ///
    /// Surrounding whitespace in the domain is ignored, as in lookups.
    pub fn validate(&self) -> Result<()> {
        validate_domain_name(self.domain.trim())?;
        validate_years(self.years)?;
        for ns in self.nameserver_list() {
            validate_domain_name(&ns)
                .map_err(|e| Error::invalid_input(format!("Invalid nameserver '{}': {}", ns, e)))?;
        }
        Ok(())
    }
}

/// Split a comma-separated nameserver list
pub fn split_nameservers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Validate a registration period
pub fn validate_years(years: u32) -> Result<()> {
    if !(MIN_YEARS..=MAX_YEARS).contains(&years) {
        return Err(Error::invalid_input(format!(
            "Registration period must be between {} and {} years. Got: {}",
            MIN_YEARS, MAX_YEARS, years
        )));
    }
    Ok(())
}

/// Validate that a string is a registrable domain name
///
/// Basic RFC 1035 checks plus "at least two labels"; it catches typos,
/// not every name the registrar would reject.
pub fn validate_domain_name(domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(Error::invalid_input("Domain name cannot be empty"));
    }

    if domain.len() > 253 {
        return Err(Error::invalid_input(format!(
            "Domain name too long: {} chars (max 253). Got: {}",
            domain.len(),
            domain
        )));
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(Error::invalid_input(format!(
            "Domain name must include a top-level domain. Got: '{}'",
            domain
        )));
    }

    for label in labels {
        if label.is_empty() {
            return Err(Error::invalid_input(format!(
                "Domain name has empty label: '{}'",
                domain
            )));
        }

        if label.len() > 63 {
            return Err(Error::invalid_input(format!(
                "Domain label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            )));
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(Error::invalid_input(format!(
                "Domain label contains invalid characters. Label: '{}'. \
                Valid: ASCII letters, digits and hyphen only.",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::invalid_input(format!(
                "Domain label cannot start or end with hyphen. Label: '{}'",
                label
            )));
        }
    }

    Ok(())
}

/// Top-level domain of `domain`, lowercased and without the leading dot
///
/// Everything after the first label counts, so "example.co.uk" yields "co.uk".
pub fn tld_of(domain: &str) -> Result<String> {
    match domain.split_once('.') {
        Some((_, tld)) if !tld.is_empty() => Ok(tld.to_lowercase()),
        _ => Err(Error::invalid_input(format!(
            "Cannot determine top-level domain of '{}'",
            domain
        ))),
    }
}

/// Normalize a caller-supplied TLD (".COM" -> "com")
pub fn normalize_tld(tld: &str) -> Result<String> {
    let tld = tld.trim().trim_start_matches('.').to_lowercase();
    if tld.is_empty() {
        return Err(Error::invalid_input("TLD cannot be empty"));
    }
    for label in tld.split('.') {
        if label.is_empty() || !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(Error::invalid_input(format!("Invalid TLD: '{}'", tld)));
        }
    }
    Ok(tld)
}

fn default_years() -> u32 {
    1
}

fn default_privacy() -> bool {
    true
}
