//! # Domain Search Library
//!
//! Tells whether a single domain is registered by asking an RDAP service,
//! and builds a billing checkout link when it is not.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_search_lib::{AvailabilityResolver, CheckoutLinkConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = AvailabilityResolver::new()?;
//!     let checkout = CheckoutLinkConfig::new("https://bill.example/reg");
//!     let verdict = resolver.check("example.com", &checkout).await?;
//!
//!     println!("{}", verdict.message());
//!     if let Some(url) = &verdict.checkout_url {
//!         println!("Checkout: {}", url);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Behaviour
//!
//! - Input must look like `label.tld`; anything else is rejected before any
//!   network traffic.
//! - RDAP `404` means available, every other status means registered.
//! - Timeouts and connection failures produce a `lookup_failed` verdict
//!   rather than an error.

// Re-export main public API types and functions
// This makes them available as domain_search_lib::TypeName
pub use checkout::build_checkout_url;
pub use config::{
    load_env_config, load_env_config_from, parse_timeout_string, validate_endpoint, CheckoutConfig,
    ConfigManager, EnvConfig, FileConfig, LookupConfig, ServerConfig, Settings, DEFAULT_BIND,
    MAX_TIMEOUT_SECS,
};
pub use error::DomainSearchError;
pub use protocols::{interpret_status, RdapClient};
pub use resolver::AvailabilityResolver;
pub use response::{CheckResponse, Rejection, RejectionKind};
pub use types::{
    AvailabilityStatus, AvailabilityVerdict, CheckoutLinkConfig, ResolverConfig, ValidDomain,
    DEFAULT_LOOKUP_TIMEOUT, DEFAULT_RDAP_ENDPOINT,
};
pub use validator::validate_domain;

// Internal modules - these are not part of the public API
mod checkout;
mod config;
mod error;
mod protocols;
mod resolver;
mod response;
mod types;
mod validator;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, DomainSearchError>;
