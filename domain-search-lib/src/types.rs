//! Core data types for domain availability checking.
//!
//! This module defines the verdict produced by one check, the validated
//! domain newtype, and the configuration objects the caller passes in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default RDAP service used for lookups.
pub const DEFAULT_RDAP_ENDPOINT: &str = "https://rdap.org";

/// Default upper bound for a single lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// A domain that passed [`validate_domain`](crate::validate_domain).
///
/// The only way to obtain one is through the validator, so the resolver can
/// rely on the `label.tld` shape without checking again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ValidDomain(String);

impl ValidDomain {
    pub(crate) fn new_unchecked(domain: String) -> Self {
        Self(domain)
    }

    /// The domain as typed (trimmed, case preserved).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ValidDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Outcome category of one availability check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// The registry has no record of the domain (RDAP answered 404)
    Available,

    /// Any other RDAP answer; includes rate limiting and registry errors
    Registered,

    /// The lookup never produced an HTTP status (timeout, DNS, refused)
    LookupFailed,
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "available"),
            AvailabilityStatus::Registered => write!(f, "registered"),
            AvailabilityStatus::LookupFailed => write!(f, "lookup_failed"),
        }
    }
}

/// Result of a domain availability check.
///
/// Verdicts are built by the resolver only; the constructors enforce that
/// `checkout_url` accompanies `Available` and `error_message` accompanies
/// `LookupFailed`, never anything else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailabilityVerdict {
    /// The domain name that was checked (e.g., "example.com")
    pub domain: String,

    /// What the lookup concluded
    pub status: AvailabilityStatus,

    /// Where to send the user to buy the domain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,

    /// Transport failure detail, for logs and diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AvailabilityVerdict {
    pub(crate) fn available(domain: &ValidDomain, checkout_url: Option<String>) -> Self {
        Self {
            domain: domain.to_string(),
            status: AvailabilityStatus::Available,
            checkout_url,
            error_message: None,
        }
    }

    pub(crate) fn registered(domain: &ValidDomain) -> Self {
        Self {
            domain: domain.to_string(),
            status: AvailabilityStatus::Registered,
            checkout_url: None,
            error_message: None,
        }
    }

    pub(crate) fn lookup_failed(domain: &ValidDomain, error_message: String) -> Self {
        Self {
            domain: domain.to_string(),
            status: AvailabilityStatus::LookupFailed,
            checkout_url: None,
            error_message: Some(error_message),
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == AvailabilityStatus::Available
    }

    /// Plain-text message for the person who asked.
    pub fn message(&self) -> String {
        match self.status {
            AvailabilityStatus::Available => format!("{} is available!", self.domain),
            AvailabilityStatus::Registered => format!("{} is already registered.", self.domain),
            AvailabilityStatus::LookupFailed => "An error occurred.".to_string(),
        }
    }
}

/// Billing link settings supplied by the caller for each check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLinkConfig {
    /// Checkout page of the billing system; blank disables the link
    #[serde(default)]
    pub base_url: String,
}

impl CheckoutLinkConfig {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// No checkout link will be produced.
    pub fn none() -> Self {
        Self::default()
    }

    /// Use `self` unless it is blank, in which case use `fallback`.
    pub fn or_default(self, fallback: &CheckoutLinkConfig) -> CheckoutLinkConfig {
        if self.base_url.trim().is_empty() {
            fallback.clone()
        } else {
            self
        }
    }
}

impl From<Option<String>> for CheckoutLinkConfig {
    fn from(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_default(),
        }
    }
}

/// Settings the resolver needs to perform lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// RDAP service root, e.g. `https://rdap.org`
    pub endpoint: String,

    /// Upper bound on the single lookup request
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_RDAP_ENDPOINT.to_string(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

impl ResolverConfig {
    /// Point lookups at a different RDAP service.
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set custom timeout for lookups.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
