//! RDAP (Registration Data Access Protocol) implementation.
//!
//! Availability is decided from the HTTP status of the domain lookup alone:
//! a registry answers 404 when it holds no record. The response body is never
//! read. Rate limiting and registry errors are indistinguishable from a
//! registered domain here and are reported as such.

use crate::checkout::encode_domain;
use crate::error::{transport_message, DomainSearchError};
use crate::types::{AvailabilityStatus, ResolverConfig, ValidDomain};
use reqwest::StatusCode;
use std::time::{Duration, Instant};
use tracing::debug;

/// RDAP client for checking domain availability.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct RdapClient {
    /// HTTP client for making RDAP requests
    http_client: reqwest::Client,
    /// RDAP service root without trailing slash
    endpoint: String,
    /// Timeout for RDAP requests
    timeout: Duration,
}

impl RdapClient {
    /// Create a new RDAP client pointed at the default public service.
    pub fn new() -> Result<Self, DomainSearchError> {
        Self::with_config(&ResolverConfig::default())
    }

    /// Create a new RDAP client with custom settings.
    pub fn with_config(config: &ResolverConfig) -> Result<Self, DomainSearchError> {
        let http_client = reqwest::Client::builder()
            // Outer tokio timeout fires first
            .timeout(config.timeout.saturating_add(Duration::from_secs(2)))
            .user_agent(concat!("domain-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                DomainSearchError::config(format!("Failed to create RDAP HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.trim().trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    /// URL of the RDAP domain record for `domain`.
    pub fn lookup_url(&self, domain: &ValidDomain) -> String {
        format!("{}/domain/{}", self.endpoint, encode_domain(domain))
    }

    /// Perform the single lookup request and return the HTTP status.
    ///
    /// # Errors
    ///
    /// Returns [`DomainSearchError::LookupTransport`] when no HTTP status was
    /// received: timeouts, DNS failures, refused connections, TLS errors.
    pub async fn lookup_status(&self, domain: &ValidDomain) -> Result<StatusCode, DomainSearchError> {
        let rdap_url = self.lookup_url(domain);
        debug!(url = %rdap_url, "sending RDAP lookup");

        let start_time = Instant::now();
        let result = tokio::time::timeout(self.timeout, self.http_client.get(&rdap_url).send()).await;

        match result {
            Ok(Ok(response)) => {
                let status = response.status();
                debug!(
                    domain = %domain,
                    status = status.as_u16(),
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    "RDAP lookup answered"
                );
                Ok(status)
            }
            Ok(Err(e)) => Err(DomainSearchError::lookup_transport(
                domain.as_str(),
                transport_message(&e),
            )),
            Err(_) => Err(DomainSearchError::lookup_transport(
                domain.as_str(),
                format!("request timed out after {:?}", self.timeout),
            )),
        }
    }

    /// Look up `domain` and map the answer to an availability status.
    pub async fn check_domain(
        &self,
        domain: &ValidDomain,
    ) -> Result<AvailabilityStatus, DomainSearchError> {
        self.lookup_status(domain).await.map(interpret_status)
    }

    /// Timeout applied to each lookup.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// RDAP service root in use.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Map an RDAP HTTP status to availability.
///
/// Only `404 Not Found` means available; every other status, including
/// `429` and `5xx`, is treated as registered.
pub fn interpret_status(status: StatusCode) -> AvailabilityStatus {
    if status == StatusCode::NOT_FOUND {
        AvailabilityStatus::Available
    } else {
        AvailabilityStatus::Registered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_domain;

    #[test]
    fn test_interpret_status() {
        assert_eq!(interpret_status(StatusCode::NOT_FOUND), AvailabilityStatus::Available);
        for code in [200u16, 301, 400, 403, 429, 500, 503] {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(
                interpret_status(status),
                AvailabilityStatus::Registered,
                "status {} should mean registered",
                code
            );
        }
    }

    #[test]
    fn test_lookup_url_uses_domain_path() {
        let client = RdapClient::new().unwrap();
        let domain = validate_domain("example.com").unwrap();
        assert_eq!(client.lookup_url(&domain), "https://rdap.org/domain/example.com");
    }

    #[test]
    fn test_endpoint_trailing_slash_is_tolerated() {
        let config = ResolverConfig::default().with_endpoint("https://rdap.example.net/ ");
        let client = RdapClient::with_config(&config).unwrap();
        let domain = validate_domain("example.com").unwrap();
        assert_eq!(client.endpoint(), "https://rdap.example.net");
        assert_eq!(
            client.lookup_url(&domain),
            "https://rdap.example.net/domain/example.com"
        );
    }

    #[test]
    fn test_default_timeout_is_ten_seconds() {
        let client = RdapClient::new().unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_huge_timeout_does_not_overflow() {
        let config = ResolverConfig::default().with_timeout(Duration::MAX);
        let client = RdapClient::with_config(&config).unwrap();
        assert_eq!(client.timeout(), Duration::MAX);
    }
}
