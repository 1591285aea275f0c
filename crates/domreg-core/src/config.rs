//! Configuration types for the domain registration system
//!
//! This module defines all configuration structures used throughout the crate.
//! Values are built by the hosting process and passed explicitly into the
//! gateway, IP source and profile source constructors.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Default registrant profile file name, relative to the working directory
pub const DEFAULT_PROFILE_FILE: &str = "registrant-profile.json";

/// Template file name suggested to operators when the profile is missing
pub const PROFILE_TEMPLATE_FILE: &str = "registrant-profile.example.json";

/// Default public IP echo services, queried in order
pub const DEFAULT_IP_SERVICES: &[&str] = &[
    "https://api.ipify.org",
    "https://ifconfig.me/ip",
    "https://icanhazip.com",
];

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Registrar account and endpoint settings
    pub registrar: RegistrarConfig,

    /// How the client IP sent to the registrar is determined
    #[serde(default)]
    pub ip_source: IpSourceConfig,

    /// Where the registrant profile lives
    #[serde(default)]
    pub profile: ProfileConfig,
}

impl ServiceConfig {
    /// Create a configuration with default IP detection and profile location
    pub fn new(registrar: RegistrarConfig) -> Self {
        Self {
            registrar,
            ip_source: IpSourceConfig::default(),
            profile: ProfileConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.registrar.validate()?;
        self.ip_source.validate()?;
        self.profile.validate()?;
        Ok(())
    }
}

/// Registrar API environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrarEnvironment {
    /// Registrar sandbox (no real billing)
    #[default]
    Sandbox,
    /// Live registrar API (real purchases)
    Production,
}

impl RegistrarEnvironment {
    /// Name used in configuration and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrarEnvironment::Sandbox => "sandbox",
            RegistrarEnvironment::Production => "production",
        }
    }
}

impl FromStr for RegistrarEnvironment {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" | "development" | "test" => Ok(RegistrarEnvironment::Sandbox),
            "production" | "live" => Ok(RegistrarEnvironment::Production),
            other => Err(crate::Error::config(format!(
                "Unknown registrar environment '{}'. Supported: sandbox, production",
                other
            ))),
        }
    }
}

/// Registrar account configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct RegistrarConfig {
    /// API user name
    pub api_user: String,

    /// Account user name the commands act on (usually the API user)
    pub username: String,

    /// API key
    /// ⚠️ NEVER log this value
    pub api_key: String,

    /// Sandbox or production endpoint
    #[serde(default)]
    pub environment: RegistrarEnvironment,

    /// Endpoint override (tests, proxies)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// HTTP timeout for registrar calls (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for RegistrarConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrarConfig")
            .field("api_user", &self.api_user)
            .field("username", &self.username)
            .field("api_key", &"<REDACTED>")
            .field("environment", &self.environment)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RegistrarConfig {
    /// Create a registrar configuration acting on the API user's own account
    pub fn new(
        api_user: impl Into<String>,
        api_key: impl Into<String>,
        environment: RegistrarEnvironment,
    ) -> Self {
        let api_user = api_user.into();
        Self {
            username: api_user.clone(),
            api_user,
            api_key: api_key.into(),
            environment,
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Point the gateway at a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Act on a different account than the API user
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Validate the registrar configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.api_user.trim().is_empty() {
            return Err(crate::Error::config("Registrar API user cannot be empty"));
        }
        if self.username.trim().is_empty() {
            return Err(crate::Error::config("Registrar username cannot be empty"));
        }
        if self.api_key.trim().is_empty() {
            return Err(crate::Error::config("Registrar API key cannot be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(crate::Error::config("Registrar timeout must be > 0"));
        }
        if let Some(endpoint) = &self.endpoint
            && !endpoint.starts_with("https://")
            && !endpoint.starts_with("http://")
        {
            return Err(crate::Error::config(format!(
                "Registrar endpoint must use HTTP or HTTPS scheme. Got: {}",
                endpoint
            )));
        }
        Ok(())
    }
}

/// How the client IP is determined
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IpSourceConfig {
    /// Fixed, operator-supplied IP (must be whitelisted at the registrar)
    Static {
        /// The whitelisted IP
        ip: IpAddr,
    },

    /// Detect the public IP through HTTP echo services
    Http {
        /// Services to query, in order
        urls: Vec<String>,
        /// IP version to accept (None = any)
        #[serde(default)]
        version: Option<IpVersion>,
    },
}

impl IpSourceConfig {
    /// Validate the IP source configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            IpSourceConfig::Static { .. } => Ok(()),
            IpSourceConfig::Http { urls, .. } => {
                if urls.is_empty() {
                    return Err(crate::Error::config(
                        "HTTP IP source needs at least one service URL",
                    ));
                }
                for url in urls {
                    if !url.starts_with("https://") && !url.starts_with("http://") {
                        return Err(crate::Error::config(format!(
                            "IP service URL must use HTTP or HTTPS scheme. Got: {}",
                            url
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}

impl Default for IpSourceConfig {
    fn default() -> Self {
        IpSourceConfig::Http {
            urls: DEFAULT_IP_SERVICES.iter().map(|s| s.to_string()).collect(),
            version: Some(IpVersion::V4),
        }
    }
}

/// IP version to accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpVersion {
    /// IPv4 only
    V4,
    /// IPv6 only
    V6,
    /// Both IPv4 and IPv6
    Both,
}

impl IpVersion {
    /// Whether `ip` is acceptable under this filter
    pub fn accepts(&self, ip: &IpAddr) -> bool {
        match self {
            IpVersion::V4 => ip.is_ipv4(),
            IpVersion::V6 => ip.is_ipv6(),
            IpVersion::Both => true,
        }
    }
}

/// Registrant profile location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Path to the JSON profile file
    #[serde(default = "default_profile_path")]
    pub path: PathBuf,
}

impl ProfileConfig {
    /// Create a profile configuration for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Validate the profile configuration
    ///
    /// The file itself is not checked here: it is re-read on every call and
    /// may be created after start-up.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.path.as_os_str().is_empty() {
            return Err(crate::Error::config("Registrant profile path cannot be empty"));
        }
        Ok(())
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            path: default_profile_path(),
        }
    }
}

fn default_profile_path() -> PathBuf {
    PathBuf::from(DEFAULT_PROFILE_FILE)
}

fn default_timeout_secs() -> u64 {
    30
}
