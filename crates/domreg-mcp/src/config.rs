//! Environment configuration for the MCP server
//!
//! All configuration is read once at start-up. Values come from the process
//! environment; a `.env` file in the working directory is loaded first when
//! present.

use anyhow::Result;
use domreg_core::config::{
    DEFAULT_PROFILE_FILE, DEFAULT_IP_SERVICES, IpSourceConfig, IpVersion, ProfileConfig,
    RegistrarConfig, RegistrarEnvironment, ServiceConfig,
};
use std::net::IpAddr;
use tracing::Level;

/// Server configuration as read from the environment
#[derive(Clone)]
pub struct Config {
    pub api_user: String,
    pub username: Option<String>,
    pub api_key: String,
    pub environment: String,
    pub client_ip: Option<String>,
    pub ip_services: Option<String>,
    pub profile_path: String,
    pub log_level: String,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_user", &self.api_user)
            .field("username", &self.username)
            .field("api_key", &"<REDACTED>")
            .field("environment", &self.environment)
            .field("client_ip", &self.client_ip)
            .field("ip_services", &self.ip_services)
            .field("profile_path", &self.profile_path)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let username = var("NAMECHEAP_USERNAME");
        let api_user = var("NAMECHEAP_API_USER")
            .or_else(|| username.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "NAMECHEAP_API_USER is required. \
                    Set it via: export NAMECHEAP_API_USER=your_username"
                )
            })?;
        let api_key = var("NAMECHEAP_API_KEY").ok_or_else(|| {
            anyhow::anyhow!(
                "NAMECHEAP_API_KEY is required. \
                Set it via: export NAMECHEAP_API_KEY=your_api_key"
            )
        })?;

        Ok(Self {
            api_user,
            username,
            api_key,
            environment: var("NAMECHEAP_ENVIRONMENT").unwrap_or_else(|| "sandbox".to_string()),
            client_ip: var("NAMECHEAP_CLIENT_IP"),
            ip_services: var("DOMREG_IP_SERVICES"),
            profile_path: var("DOMREG_PROFILE_PATH")
                .unwrap_or_else(|| DEFAULT_PROFILE_FILE.to_string()),
            log_level: var("DOMREG_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Validate the configuration
    ///
    /// Checks value formats only; nothing is contacted.
    pub fn validate(&self) -> Result<()> {
        // Check for obvious placeholder keys (common mistake when copying .env.example)
        let key_lower = self.api_key.to_lowercase();
        if key_lower.contains("your_api_key")
            || key_lower.contains("replace_me")
            || key_lower.contains("changeme")
            || key_lower == "key"
        {
            anyhow::bail!(
                "NAMECHEAP_API_KEY appears to be a placeholder. \
                Use the API key from your Namecheap profile (Profile > Tools > API Access)."
            );
        }

        self.environment()?;
        self.log_level()?;

        if let Some(ip) = &self.client_ip {
            ip.trim().parse::<IpAddr>().map_err(|_| {
                anyhow::anyhow!("NAMECHEAP_CLIENT_IP is not a valid IP address. Got: {}", ip)
            })?;
        }

        for url in self.ip_service_urls() {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                anyhow::bail!(
                    "DOMREG_IP_SERVICES entries must use HTTP or HTTPS scheme. Got: {}",
                    url
                );
            }
        }

        Ok(())
    }

    /// Registrar environment
    pub fn environment(&self) -> Result<RegistrarEnvironment> {
        self.environment.parse().map_err(|e| {
            anyhow::anyhow!("NAMECHEAP_ENVIRONMENT '{}' is not valid: {}", self.environment, e)
        })
    }

    /// Log level
    pub fn log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "DOMREG_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }

    fn ip_service_urls(&self) -> Vec<String> {
        match &self.ip_services {
            Some(raw) => raw
                .split(',')
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .collect(),
            None => DEFAULT_IP_SERVICES.iter().map(|url| url.to_string()).collect(),
        }
    }

    /// Build the library configuration
    pub fn service_config(&self) -> Result<ServiceConfig> {
        let mut registrar =
            RegistrarConfig::new(&self.api_user, &self.api_key, self.environment()?);
        if let Some(username) = &self.username {
            registrar = registrar.with_username(username);
        }

        let ip_source = match &self.client_ip {
            Some(ip) => IpSourceConfig::Static {
                ip: ip.trim().parse()?,
            },
            None => IpSourceConfig::Http {
                urls: self.ip_service_urls(),
                version: Some(IpVersion::V4),
            },
        };

        let config = ServiceConfig {
            registrar,
            ip_source,
            profile: ProfileConfig::new(&self.profile_path),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[
            ("NAMECHEAP_API_USER", "ada"),
            ("NAMECHEAP_API_KEY", "0123456789abcdef"),
        ])
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.environment().unwrap(), RegistrarEnvironment::Sandbox);
        assert_eq!(config.log_level().unwrap(), Level::INFO);
        assert_eq!(config.profile_path, "registrant-profile.json");

        let service = config.service_config().unwrap();
        assert_eq!(service.registrar.username, "ada");
        assert!(matches!(service.ip_source, IpSourceConfig::Http { .. }));
    }

    #[test]
    fn test_username_fallback() {
        let config = config(&[
            ("NAMECHEAP_USERNAME", "ada"),
            ("NAMECHEAP_API_KEY", "0123456789abcdef"),
        ])
        .unwrap();
        assert_eq!(config.api_user, "ada");
    }

    #[test]
    fn test_missing_key_rejected() {
        assert!(config(&[("NAMECHEAP_API_USER", "ada")]).is_err());
        assert!(config(&[("NAMECHEAP_API_USER", "ada"), ("NAMECHEAP_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn test_placeholder_key_rejected() {
        let config = config(&[
            ("NAMECHEAP_API_USER", "ada"),
            ("NAMECHEAP_API_KEY", "your_api_key_here"),
        ])
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let base = [
            ("NAMECHEAP_API_USER", "ada"),
            ("NAMECHEAP_API_KEY", "0123456789abcdef"),
        ];

        for extra in [
            ("NAMECHEAP_ENVIRONMENT", "staging"),
            ("NAMECHEAP_CLIENT_IP", "not-an-ip"),
            ("DOMREG_IP_SERVICES", "ftp://example.com/ip"),
            ("DOMREG_LOG_LEVEL", "verbose"),
        ] {
            let mut vars = base.to_vec();
            vars.push(extra);
            let config = config(&vars).unwrap();
            assert!(config.validate().is_err(), "{:?} should be rejected", extra);
        }
    }

    #[test]
    fn test_static_client_ip_and_production() {
        let config = config(&[
            ("NAMECHEAP_API_USER", "ada"),
            ("NAMECHEAP_API_KEY", "0123456789abcdef"),
            ("NAMECHEAP_ENVIRONMENT", "production"),
            ("NAMECHEAP_CLIENT_IP", "203.0.113.7"),
        ])
        .unwrap();

        let service = config.service_config().unwrap();
        assert_eq!(
            service.registrar.environment,
            RegistrarEnvironment::Production
        );
        assert!(matches!(service.ip_source, IpSourceConfig::Static { .. }));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = config(&[
            ("NAMECHEAP_API_USER", "ada"),
            ("NAMECHEAP_API_KEY", "secret_key_12345"),
        ])
        .unwrap();
        assert!(!format!("{:?}", config).contains("secret_key_12345"));
    }
}
