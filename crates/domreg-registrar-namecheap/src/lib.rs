// # Namecheap Registrar Gateway
//
// This crate provides the Namecheap implementation of `RegistrarGateway`.
//
// ## Behavior
//
// - One HTTP request per gateway call
// - Full error propagation: the workflow decides what a failure means
// - HTTP timeout configured (30 seconds by default)
// - Specific error handling for HTTP status codes (401/403, 429, 5xx)
// - No retry, backoff or caching
//
// ## Authentication
//
// Every request carries `ApiUser`, `ApiKey`, `UserName` and `ClientIp` as
// query parameters. The client IP must be whitelisted on the account; when
// Namecheap rejects it (error 1011150) the IP source cache is reset so the
// next call detects the address again. The failing call is not repeated.
//
// ## Security Requirements
//
// - API key NEVER appears in logs, errors or Debug output
// - Request URLs are stripped from transport errors (they contain the key)
//
// ## API Reference
//
// - Namecheap API: https://www.namecheap.com/support/api/intro/
// - Production: https://api.namecheap.com/xml.response
// - Sandbox: https://api.sandbox.namecheap.com/xml.response

pub mod commands;
pub mod xml;

use async_trait::async_trait;
use domreg_core::config::{RegistrarConfig, RegistrarEnvironment};
use domreg_core::traits::{
    Availability, CreateResult, DomainOrder, IpSource, PricingQuote, RegistrarGateway,
};
use domreg_core::{Error, Result};
use std::sync::Arc;
use std::time::Duration;

use commands::Params;
use xml::Element;

/// Production API endpoint
pub const PRODUCTION_ENDPOINT: &str = "https://api.namecheap.com/xml.response";

/// Sandbox API endpoint
pub const SANDBOX_ENDPOINT: &str = "https://api.sandbox.namecheap.com/xml.response";

/// Error number Namecheap returns when the client IP is not whitelisted
pub const INVALID_REQUEST_IP: &str = "1011150";

/// Endpoint for a registrar environment
pub fn endpoint_for(environment: RegistrarEnvironment) -> &'static str {
    match environment {
        RegistrarEnvironment::Sandbox => SANDBOX_ENDPOINT,
        RegistrarEnvironment::Production => PRODUCTION_ENDPOINT,
    }
}

/// Namecheap XML API gateway
///
/// Stateless apart from the shared IP source; safe to share across
/// concurrent tool calls.
///
/// # Security
///
/// The Debug implementation does NOT expose the API key.
pub struct NamecheapGateway {
    /// API user
    api_user: String,

    /// Account the commands act on
    username: String,

    /// API key
    /// ⚠️ NEVER log this value
    api_key: String,

    /// XML endpoint URL
    endpoint: String,

    /// Source of the `ClientIp` parameter
    ip_source: Arc<dyn IpSource>,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for NamecheapGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamecheapGateway")
            .field("api_user", &self.api_user)
            .field("username", &self.username)
            .field("api_key", &"<REDACTED>")
            .field("endpoint", &self.endpoint)
            .field("ip_source", &self.ip_source.source_name())
            .finish()
    }
}

impl NamecheapGateway {
    /// Create a gateway from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Account, environment and timeout settings
    /// - `ip_source`: Provides the whitelisted client IP
    ///
    /// # Returns
    ///
    /// - `Ok(NamecheapGateway)`: Ready to use (no request is made here)
    /// - `Err(Error::Config)`: Invalid configuration
    pub fn from_config(config: &RegistrarConfig, ip_source: Arc<dyn IpSource>) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| endpoint_for(config.environment).to_string());

        tracing::debug!(
            "Namecheap gateway using {} endpoint {}",
            config.environment.as_str(),
            endpoint
        );

        Ok(Self {
            api_user: config.api_user.clone(),
            username: config.username.clone(),
            api_key: config.api_key.clone(),
            endpoint,
            ip_source,
            client,
        })
    }

    /// Endpoint this gateway talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute one API command and return its `CommandResponse`
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /xml.response?ApiUser=..&ApiKey=..&UserName=..&ClientIp=..&Command=..&...
    /// ```
    async fn execute(&self, command: &str, params: Params) -> Result<Element> {
        let client_ip = self.ip_source.current().await?;

        tracing::info!("Namecheap command {}", command);
        tracing::debug!(
            "Command {} parameters: {}",
            command,
            params
                .iter()
                .map(|(key, _)| key.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut query: Vec<(String, String)> = vec![
            ("ApiUser".to_string(), self.api_user.clone()),
            ("ApiKey".to_string(), self.api_key.clone()),
            ("UserName".to_string(), self.username.clone()),
            ("ClientIp".to_string(), client_ip.to_string()),
            ("Command".to_string(), command.to_string()),
        ];
        query.extend(params);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await
            .map_err(|e| Error::http(format!("Namecheap request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return Err(match status.as_u16() {
                401 | 403 => Error::auth(format!(
                    "Namecheap rejected the API credentials. Status: {}",
                    status
                )),
                429 => Error::rate_limited(format!(
                    "Namecheap rate limit exceeded. Please retry later. Status: {}",
                    status
                )),
                500..=599 => Error::provider(
                    "namecheap",
                    format!("Namecheap server error (transient): {} - {}", status, error_text),
                ),
                _ => Error::provider(
                    "namecheap",
                    format!("Unexpected response: {} - {}", status, error_text),
                ),
            });
        }

        let body = response.text().await.map_err(|e| {
            Error::http(format!("Failed to read Namecheap response: {}", e.without_url()))
        })?;

        match xml::parse_envelope(&body) {
            Err(Error::Registrar { code, message }) => {
                if code == INVALID_REQUEST_IP {
                    tracing::warn!(
                        "Namecheap rejected client IP {}; clearing cached address",
                        client_ip
                    );
                    self.ip_source.reset().await;
                }
                tracing::warn!("Namecheap command {} failed: {} {}", command, code, message);
                Err(Error::Registrar { code, message })
            }
            other => other,
        }
    }
}

#[async_trait]
impl RegistrarGateway for NamecheapGateway {
    async fn check_availability(&self, domain: &str) -> Result<Availability> {
        let response = self
            .execute(commands::CHECK, commands::check_params(domain))
            .await?;
        let availability = commands::parse_availability(&response, domain)?;

        tracing::debug!(
            "{}: available={}, premium={}",
            availability.domain,
            availability.available,
            availability.premium
        );
        Ok(availability)
    }

    async fn pricing(&self, tld: &str, years: Option<u32>) -> Result<PricingQuote> {
        let response = self
            .execute(commands::GET_PRICING, commands::pricing_params(tld))
            .await?;
        commands::parse_pricing(&response, tld, years)
    }

    async fn create_domain(&self, order: &DomainOrder) -> Result<CreateResult> {
        tracing::info!(
            "Registering {} for {} year(s) ({} custom nameserver(s))",
            order.domain,
            order.years,
            order.nameservers.len()
        );

        let response = self
            .execute(commands::CREATE, commands::create_params(order))
            .await?;
        Ok(commands::parse_create(&response))
    }

    fn registrar_name(&self) -> &'static str {
        "Namecheap"
    }
}
