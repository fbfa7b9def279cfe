//! Error handling for domain search operations.
//!
//! This module defines the error type shared by the validator, the resolver,
//! the configuration loader and the front-end crates.

use std::fmt;

/// Main error type for domain search operations.
///
/// Only [`DomainSearchError::InvalidDomainFormat`] and
/// [`DomainSearchError::SecurityCheckFailed`] ever reach an end user directly.
/// Lookup transport failures are folded into an
/// [`AvailabilityVerdict`](crate::AvailabilityVerdict) by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainSearchError {
    /// Input failed the `label.tld` syntax check; no lookup was attempted
    InvalidDomainFormat { input: String },

    /// The boundary layer rejected the request token
    SecurityCheckFailed,

    /// Network, DNS or timeout failure while talking to the RDAP endpoint
    LookupTransport { domain: String, message: String },

    /// Configuration errors (invalid settings, unparseable files, etc.)
    ConfigError { message: String },

    /// File I/O errors when reading configuration files
    FileError { path: String, message: String },
}

impl DomainSearchError {
    /// Create a new invalid domain error.
    pub fn invalid_domain<I: Into<String>>(input: I) -> Self {
        Self::InvalidDomainFormat {
            input: input.into(),
        }
    }

    /// Create a new lookup transport error.
    pub fn lookup_transport<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::LookupTransport {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Message suitable for showing to the person who submitted the form.
    ///
    /// Unlike `Display`, this never echoes raw input or transport internals.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidDomainFormat { .. } => "Invalid domain format.",
            Self::SecurityCheckFailed => "Security check failed.",
            Self::LookupTransport { .. } => "An error occurred.",
            Self::ConfigError { .. } | Self::FileError { .. } => "An error occurred.",
        }
    }
}

impl fmt::Display for DomainSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomainFormat { input } => {
                write!(f, "Invalid domain format: '{}'", input)
            }
            Self::SecurityCheckFailed => write!(f, "Security check failed"),
            Self::LookupTransport { domain, message } => {
                write!(f, "RDAP lookup for '{}' failed: {}", domain, message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for DomainSearchError {}

/// Short description of a failed request, without the request URL noise.
pub(crate) fn transport_message(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        format!("request failed: {}", err)
    }
}

impl From<std::io::Error> for DomainSearchError {
    fn from(err: std::io::Error) -> Self {
        Self::ConfigError {
            message: format!("I/O error: {}", err),
        }
    }
}

impl From<toml::de::Error> for DomainSearchError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: format!("Failed to parse TOML configuration: {}", err),
        }
    }
}
