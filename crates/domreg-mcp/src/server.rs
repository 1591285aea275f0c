// # Domain Tool Server
//
// MCP server exposing three tools over the registration workflow:
//
// - `check_domain`: availability (and premium status) of one domain
// - `get_pricing`: registration price tiers for a TLD
// - `register_domain`: preview, or purchase with `confirmPurchase=true`
//
// Every tool answers with a single text block. Failures inside the workflow
// are rendered as text too; only malformed tool arguments surface as
// protocol errors.

use std::sync::Arc;

use domreg_core::{
    DomainLookup, ProfileSource, RegistrarGateway, RegistrationRequest, RegistrationWorkflow,
};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::Deserialize;
use tracing::debug;

/// Name announced to MCP clients
pub const SERVER_NAME: &str = "namecheap-domains";

/// Arguments of `check_domain`
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CheckDomainInput {
    #[schemars(description = "Domain name to check (e.g., example.com)")]
    pub domain: String,
}

/// Arguments of `get_pricing`
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetPricingInput {
    #[schemars(description = "Top-level domain to price (e.g., com, net, org)")]
    pub tld: String,
}

/// Arguments of `register_domain`
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDomainInput {
    #[schemars(description = "Domain name to register (e.g., example.com)")]
    pub domain: String,

    #[schemars(description = "Registration period in years (1-10, default 1)")]
    #[serde(default = "default_years")]
    pub years: u32,

    #[schemars(description = "Comma-separated custom nameservers (optional)")]
    #[serde(default)]
    pub nameservers: Option<String>,

    #[schemars(
        description = "Set to true to purchase the domain. When false or omitted, only a preview is returned"
    )]
    #[serde(default)]
    pub confirm_purchase: bool,

    #[schemars(description = "Enable WhoisGuard privacy protection (default true)")]
    #[serde(default = "default_true")]
    pub enable_whois_privacy: bool,
}

fn default_years() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl From<RegisterDomainInput> for RegistrationRequest {
    fn from(input: RegisterDomainInput) -> Self {
        let mut request = RegistrationRequest::new(input.domain)
            .with_years(input.years)
            .with_confirmation(input.confirm_purchase)
            .with_whois_privacy(input.enable_whois_privacy);
        if let Some(nameservers) = input.nameservers {
            request = request.with_nameservers(nameservers);
        }
        request
    }
}

/// MCP server for domain lookups and registration
#[derive(Clone)]
pub struct DomainToolServer {
    lookup: DomainLookup,
    workflow: RegistrationWorkflow,
    tool_router: ToolRouter<Self>,
}

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

#[tool_router]
impl DomainToolServer {
    /// Create a server over `gateway` and `profiles`
    pub fn new(gateway: Arc<dyn RegistrarGateway>, profiles: Arc<dyn ProfileSource>) -> Self {
        Self {
            lookup: DomainLookup::new(gateway.clone()),
            workflow: RegistrationWorkflow::new(gateway, profiles),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Check if a domain is available for registration")]
    async fn check_domain(
        &self,
        Parameters(input): Parameters<CheckDomainInput>,
    ) -> Result<CallToolResult, McpError> {
        debug!("check_domain({})", input.domain);
        Ok(text_result(self.lookup.check_domain(&input.domain).await))
    }

    #[tool(description = "Get registration pricing for a top-level domain")]
    async fn get_pricing(
        &self,
        Parameters(input): Parameters<GetPricingInput>,
    ) -> Result<CallToolResult, McpError> {
        debug!("get_pricing({})", input.tld);
        Ok(text_result(self.lookup.get_pricing(&input.tld).await))
    }

    #[tool(
        description = "Register a domain. Returns a preview with pricing and contact details unless confirmPurchase is true, in which case the account is charged"
    )]
    async fn register_domain(
        &self,
        Parameters(input): Parameters<RegisterDomainInput>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            "register_domain({}, confirm: {})",
            input.domain, input.confirm_purchase
        );
        let request = RegistrationRequest::from(input);
        Ok(text_result(self.workflow.register(&request).await))
    }
}

#[tool_handler]
impl ServerHandler for DomainToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Check domain availability, look up TLD pricing and register domains \
                through Namecheap. register_domain only charges the account when \
                confirmPurchase is true; call it without confirmation first to show \
                the user a preview."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
