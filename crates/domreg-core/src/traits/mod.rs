//! Core traits for the domain registration system
//!
//! This module defines the abstract interfaces the workflow depends on.
//!
//! - [`RegistrarGateway`]: Availability, pricing and purchase calls
//! - [`ProfileSource`]: Registrant contact record loading
//! - [`IpSource`]: Public IP used to authenticate registrar calls

pub mod ip_source;
pub mod profile_source;
pub mod registrar_gateway;

pub use ip_source::{IpSource, StaticIpSource};
pub use profile_source::{ProfileSource, RegistrantProfile};
pub use registrar_gateway::{
    Availability, CreateResult, DomainOrder, PriceTier, PricingQuote, RegistrarGateway,
};
