//! Error types for the domain registration system
//!
//! This module defines all error types used throughout the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for domain registration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the domain registration system
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input (domain name, duration, TLD)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors (transport, timeouts, unexpected status)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The registrar envelope reported `Status="ERROR"`
    #[error("Registrar error {code}: {message}")]
    Registrar {
        /// Registrar error number (empty when not reported)
        code: String,
        /// Registrar error text
        message: String,
    },

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Registrar response did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Registrant profile file does not exist
    #[error("Registrant profile not found at {}", .0.display())]
    ProfileNotFound(PathBuf),

    /// Registrant profile is missing mandatory fields
    #[error("Registrant profile is missing required fields: {}", .0.join(", "))]
    ProfileIncomplete(Vec<&'static str>),

    /// Registrant profile could not be read or parsed
    #[error("Registrant profile error: {0}")]
    Profile(String),

    /// Public IP detection errors
    #[error("IP source error: {0}")]
    IpSource(String),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a registrar envelope error
    pub fn registrar(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Registrar {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create a profile read/parse error
    pub fn profile(msg: impl Into<String>) -> Self {
        Self::Profile(msg.into())
    }

    /// Create an IP source error
    pub fn ip_source(msg: impl Into<String>) -> Self {
        Self::IpSource(msg.into())
    }

    /// Whether this error means the registrant profile is unusable
    pub fn is_profile_error(&self) -> bool {
        matches!(
            self,
            Self::ProfileNotFound(_) | Self::ProfileIncomplete(_) | Self::Profile(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_errors_are_distinguishable() {
        let missing = Error::ProfileNotFound(PathBuf::from("registrant-profile.json"));
        let incomplete = Error::ProfileIncomplete(vec!["firstName", "email"]);
        let parse = Error::profile("expected value at line 1");

        assert!(matches!(missing, Error::ProfileNotFound(_)));
        assert!(matches!(incomplete, Error::ProfileIncomplete(_)));
        assert!(matches!(parse, Error::Profile(_)));

        for err in [&missing, &incomplete, &parse] {
            assert!(err.is_profile_error());
        }
        assert!(!Error::http("timeout").is_profile_error());
    }

    #[test]
    fn test_display_messages() {
        let err = Error::ProfileIncomplete(vec!["firstName", "email"]);
        assert_eq!(
            err.to_string(),
            "Registrant profile is missing required fields: firstName, email"
        );

        let err = Error::registrar("2011170", "Validation error");
        assert_eq!(err.to_string(), "Registrar error 2011170: Validation error");
    }
}
