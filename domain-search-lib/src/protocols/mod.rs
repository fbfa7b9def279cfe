//! Protocol implementations for domain checking.
//!
//! Availability is looked up over RDAP only.

/// RDAP (Registration Data Access Protocol) implementation
pub mod rdap;

pub use rdap::{interpret_status, RdapClient};
