// # HTTP IP Source
//
// This crate provides an HTTP-based IP source for registrar authentication.
//
// ## Purpose
//
// Namecheap only accepts API calls from whitelisted addresses and expects the
// caller to state its public IP in every request. When no address is
// configured, it is detected once through plain-text echo services
// (e.g., api.ipify.org, icanhazip.com) and cached for the process lifetime.
//
// ## Failover
//
// Services are tried in order; the first valid address of the accepted IP
// version wins. A failed or unparsable answer moves on to the next service.
// When every service fails, detection fails: there is no fallback address.
//
// ## Cache
//
// The cached address is dropped by `reset()`, which the registrar gateway
// calls when Namecheap rejects the request IP.

use domreg_core::config::{IpSourceConfig, IpVersion};
use domreg_core::traits::{IpSource, StaticIpSource};
use domreg_core::{Error, Result};

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

/// Per-request timeout for IP echo services
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-based public IP source
pub struct HttpIpSource {
    /// Echo services, tried in order
    urls: Vec<String>,

    /// IP version to accept (None = any)
    version: Option<IpVersion>,

    /// Detected address (cached until reset)
    current_ip: Mutex<Option<IpAddr>>,

    /// HTTP client
    client: reqwest::Client,
}

impl std::fmt::Debug for HttpIpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpIpSource")
            .field("urls", &self.urls)
            .field("version", &self.version)
            .finish()
    }
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `urls`: Services returning the caller's IP as plain text
    /// - `version`: IP version to accept (None = both)
    pub fn new(urls: Vec<String>, version: Option<IpVersion>) -> Result<Self> {
        if urls.is_empty() {
            return Err(Error::config("HTTP IP source needs at least one service URL"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            urls,
            version,
            current_ip: Mutex::new(None),
            client,
        })
    }

    /// Services this source queries, in order
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Fetch the IP from one service
    async fn fetch_ip(&self, url: &str) -> Result<IpAddr> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::ip_source(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ip_source(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let ip_text = response
            .text()
            .await
            .map_err(|e| Error::ip_source(format!("Failed to read response: {}", e)))?;
        let ip_text = ip_text.trim();

        let ip: IpAddr = ip_text
            .parse()
            .map_err(|_| Error::ip_source(format!("Invalid IP address: '{}'", ip_text)))?;

        if let Some(version) = self.version
            && !version.accepts(&ip)
        {
            return Err(Error::ip_source(format!(
                "Expected {:?} address, got: {}",
                version, ip
            )));
        }

        Ok(ip)
    }

    /// Try every service in order
    async fn detect(&self) -> Result<IpAddr> {
        let mut failures = Vec::new();

        for url in &self.urls {
            match self.fetch_ip(url).await {
                Ok(ip) => {
                    tracing::info!("Detected public IP {} via {}", ip, url);
                    return Ok(ip);
                }
                Err(e) => {
                    tracing::warn!("IP service {} failed: {}", url, e);
                    failures.push(format!("{}: {}", url, e));
                }
            }
        }

        Err(Error::ip_source(format!(
            "Unable to determine public IP ({})",
            failures.join("; ")
        )))
    }
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<IpAddr> {
        // Held across detection so concurrent callers share one lookup
        let mut cached = self.current_ip.lock().await;
        if let Some(ip) = *cached {
            return Ok(ip);
        }

        let ip = self.detect().await?;
        *cached = Some(ip);
        Ok(ip)
    }

    async fn reset(&self) {
        if self.current_ip.lock().await.take().is_some() {
            tracing::debug!("Cleared cached public IP");
        }
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}

/// Build the IP source described by `config`
///
/// # Returns
///
/// - `IpSourceConfig::Static`: a [`StaticIpSource`]
/// - `IpSourceConfig::Http`: an [`HttpIpSource`]
pub fn from_config(config: &IpSourceConfig) -> Result<Arc<dyn IpSource>> {
    config.validate()?;

    match config {
        IpSourceConfig::Static { ip } => {
            tracing::info!("Using configured client IP {}", ip);
            Ok(Arc::new(StaticIpSource::new(*ip)))
        }
        IpSourceConfig::Http { urls, version } => {
            Ok(Arc::new(HttpIpSource::new(urls.clone(), *version)?))
        }
    }
}
