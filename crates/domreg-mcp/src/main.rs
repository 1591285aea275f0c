// # domreg-mcp - Domain Registration MCP Server
//
// Thin integration layer: reads configuration, wires the Namecheap gateway,
// IP source and registrant profile into the tool server, and serves MCP over
// stdio. All domain logic lives in domreg-core.
//
// stdout carries the MCP protocol; logs go to stderr.
//
// ## Configuration
//
// All configuration is done via environment variables (a `.env` file in the
// working directory is loaded first):
//
// ### Namecheap API
// - `NAMECHEAP_API_USER`: API user (falls back to `NAMECHEAP_USERNAME`)
// - `NAMECHEAP_USERNAME`: Account acted on (defaults to the API user)
// - `NAMECHEAP_API_KEY`: API key
// - `NAMECHEAP_ENVIRONMENT`: `sandbox` (default) or `production`
//
// ### Client IP
// - `NAMECHEAP_CLIENT_IP`: Whitelisted public IP (detected when unset)
// - `DOMREG_IP_SERVICES`: Comma-separated IP echo services for detection
//
// ### Registrant
// - `DOMREG_PROFILE_PATH`: Registrant profile JSON (default `registrant-profile.json`)
//
// ### Logging
// - `DOMREG_LOG_LEVEL`: trace, debug, info (default), warn, error
//
// ## Example
//
// ```bash
// export NAMECHEAP_API_USER=ada
// export NAMECHEAP_API_KEY=0123456789abcdef
// export NAMECHEAP_ENVIRONMENT=sandbox
// export DOMREG_PROFILE_PATH=/etc/domreg/registrant-profile.json
//
// domreg-mcp
// ```

mod config;
mod server;

use anyhow::Result;
use domreg_core::{FileProfileSource, ServiceConfig};
use domreg_registrar_namecheap::NamecheapGateway;
use rmcp::{ServiceExt, transport::stdio};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

use crate::config::Config;
use crate::server::DomainToolServer;

/// Exit codes for different termination scenarios
///
/// - 0: Client disconnected or shutdown signal
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum ServerExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<ServerExitCode> for ExitCode {
    fn from(code: ServerExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ServerExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return ServerExitCode::ConfigError.into();
    }

    let service_config = match config.service_config() {
        Ok(service_config) => service_config,
        Err(e) => {
            eprintln!("Configuration validation error: {}", e);
            return ServerExitCode::ConfigError.into();
        }
    };

    // Initialize tracing (stderr: stdout belongs to the protocol)
    let log_level = match config.log_level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration validation error: {}", e);
            return ServerExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return ServerExitCode::ConfigError.into();
    }

    info!("Starting domreg-mcp {}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded: {:?}", config);

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return ServerExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        let server = match build_server(&service_config) {
            Ok(server) => server,
            Err(e) => {
                error!("Startup error: {}", e);
                return ServerExitCode::ConfigError;
            }
        };

        if let Err(e) = run_server(server).await {
            error!("Server error: {}", e);
            ServerExitCode::RuntimeError
        } else {
            ServerExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Wire the gateway, IP source and profile source into the tool server
fn build_server(config: &ServiceConfig) -> Result<DomainToolServer> {
    let ip_source = domreg_ip_http::from_config(&config.ip_source)?;
    info!("Client IP source: {}", ip_source.source_name());

    let gateway = NamecheapGateway::from_config(&config.registrar, ip_source)?;
    info!(
        "Namecheap {} environment at {}",
        config.registrar.environment.as_str(),
        gateway.endpoint()
    );

    let profiles = FileProfileSource::from_config(&config.profile);
    info!("Registrant profile: {}", profiles.path().display());

    Ok(DomainToolServer::new(Arc::new(gateway), Arc::new(profiles)))
}

/// Serve MCP over stdio until the client disconnects or a signal arrives
async fn run_server(server: DomainToolServer) -> Result<()> {
    let service = server
        .serve(stdio())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start MCP session: {}", e))?;
    info!("MCP session started on stdio");

    let cancel = service.cancellation_token();
    tokio::spawn(async move {
        match wait_for_shutdown_signal().await {
            Ok(signal) => {
                info!("Received shutdown signal: {}", signal);
                cancel.cancel();
            }
            Err(e) => error!("Shutdown signal handling failed: {}", e),
        }
    });

    let reason = service.waiting().await?;
    info!("MCP session ended: {:?}", reason);

    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// # Returns
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown_signal() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    let received = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    Ok(received)
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown_signal() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}
