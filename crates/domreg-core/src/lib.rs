// # domreg-core
//
// Core library for the domain registration tools.
//
// ## Architecture Overview
//
// This library provides everything except the wire-level integrations:
// - **RegistrarGateway**: Trait for the registrar's availability, pricing and purchase calls
// - **ProfileSource**: Trait for loading the registrant contact record
// - **IpSource**: Trait for the public IP the registrar authenticates
// - **RegistrationWorkflow**: Availability → profile → pricing → confirmation gate → purchase
// - **DomainLookup**: Availability and pricing reports
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Workflow logic is separate from the registrar client
// 2. **Explicit Outcomes**: Every path ends in a `RegistrationOutcome`, rendered separately
// 3. **Confirmation Gate**: Nothing is bought unless the caller confirms in the same call
// 4. **Library-First**: The MCP binary is a thin layer over this crate

pub mod config;
pub mod domain;
pub mod error;
pub mod profile;
pub mod traits;
pub mod workflow;

// Re-export core types for convenience
pub use config::{IpSourceConfig, ProfileConfig, RegistrarConfig, ServiceConfig};
pub use domain::RegistrationRequest;
pub use error::{Error, Result};
pub use profile::{FileProfileSource, StaticProfileSource};
pub use traits::{IpSource, ProfileSource, RegistrarGateway, RegistrantProfile};
pub use workflow::{DomainLookup, RegistrationOutcome, RegistrationWorkflow};
