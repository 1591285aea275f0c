// # IP Source Trait
//
// Defines the interface for determining the public IP the registrar sees.
//
// ## Implementations
//
// - HTTP echo services: `domreg-ip-http` crate
// - Fixed address: [`StaticIpSource`]
//
// ## Usage
//
// ```rust,ignore
// use domreg_core::IpSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//     let client_ip = source.current().await?;
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::net::IpAddr;

/// Trait for client IP sources
///
/// Registrar requests are authenticated partly by the caller's public IP,
/// which must match the account whitelist.
///
/// Implementations must be thread-safe and usable across async tasks.
/// They may cache the detected address; [`IpSource::reset`] drops the cache.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current public IP address
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: The current IP address
    /// - `Err(Error)`: If unable to determine the current IP
    async fn current(&self) -> Result<IpAddr, crate::Error>;

    /// Forget any cached address so the next call re-detects it
    async fn reset(&self) {}

    /// Source name (for logging)
    fn source_name(&self) -> &'static str;
}

/// IP source that always returns an operator-supplied address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticIpSource {
    ip: IpAddr,
}

impl StaticIpSource {
    /// Create a source returning `ip`
    pub fn new(ip: IpAddr) -> Self {
        Self { ip }
    }
}

#[async_trait]
impl IpSource for StaticIpSource {
    async fn current(&self) -> Result<IpAddr, crate::Error> {
        Ok(self.ip)
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source_survives_reset() {
        let ip = IpAddr::from([203, 0, 113, 7]);
        let source = StaticIpSource::new(ip);

        assert_eq!(source.current().await.unwrap(), ip);
        source.reset().await;
        assert_eq!(source.current().await.unwrap(), ip);
        assert_eq!(source.source_name(), "static");
    }
}
