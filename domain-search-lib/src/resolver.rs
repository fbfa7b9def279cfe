//! Availability resolver.
//!
//! This module provides the `AvailabilityResolver` that turns a validated
//! domain into an [`AvailabilityVerdict`], composing the checkout link when
//! the domain is free.

use crate::checkout::build_checkout_url;
use crate::error::DomainSearchError;
use crate::protocols::RdapClient;
use crate::types::{
    AvailabilityStatus, AvailabilityVerdict, CheckoutLinkConfig, ResolverConfig, ValidDomain,
};
use crate::validator::validate_domain;
use tracing::{debug, warn};

/// Resolves domain availability through a single RDAP lookup.
///
/// The resolver holds no per-check state. One instance can serve any number
/// of concurrent checks; clones share the HTTP connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use domain_search_lib::{AvailabilityResolver, CheckoutLinkConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let resolver = AvailabilityResolver::new()?;
///     let checkout = CheckoutLinkConfig::new("https://bill.example/reg");
///     let verdict = resolver.check("example.com", &checkout).await?;
///     println!("{}: {}", verdict.domain, verdict.status);
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AvailabilityResolver {
    /// Settings this resolver was built from
    config: ResolverConfig,
    /// RDAP client used for every lookup
    rdap_client: RdapClient,
}

impl AvailabilityResolver {
    /// Create a resolver against `https://rdap.org` with a 10 second timeout.
    pub fn new() -> Result<Self, DomainSearchError> {
        Self::with_config(ResolverConfig::default())
    }

    /// Create a resolver with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use domain_search_lib::{AvailabilityResolver, ResolverConfig};
    /// use std::time::Duration;
    ///
    /// let config = ResolverConfig::default()
    ///     .with_endpoint("https://rdap.example.net")
    ///     .with_timeout(Duration::from_secs(5));
    ///
    /// let resolver = AvailabilityResolver::with_config(config).unwrap();
    /// ```
    pub fn with_config(config: ResolverConfig) -> Result<Self, DomainSearchError> {
        let rdap_client = RdapClient::with_config(&config)?;
        Ok(Self {
            config,
            rdap_client,
        })
    }

    /// Resolve the availability of an already validated domain.
    ///
    /// Never fails: transport problems come back as a
    /// [`AvailabilityStatus::LookupFailed`] verdict.
    pub async fn resolve(
        &self,
        domain: &ValidDomain,
        checkout: &CheckoutLinkConfig,
    ) -> AvailabilityVerdict {
        match self.rdap_client.check_domain(domain).await {
            Ok(AvailabilityStatus::Available) => {
                let checkout_url = build_checkout_url(checkout, domain);
                debug!(domain = %domain, has_checkout = checkout_url.is_some(), "domain is available");
                AvailabilityVerdict::available(domain, checkout_url)
            }
            Ok(_) => {
                debug!(domain = %domain, "domain is registered");
                AvailabilityVerdict::registered(domain)
            }
            Err(DomainSearchError::LookupTransport { message, .. }) => {
                warn!(domain = %domain, error = %message, "RDAP lookup failed");
                AvailabilityVerdict::lookup_failed(domain, message)
            }
            Err(other) => {
                warn!(domain = %domain, error = %other, "RDAP lookup failed");
                AvailabilityVerdict::lookup_failed(domain, other.to_string())
            }
        }
    }

    /// Validate raw user input, then resolve it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainSearchError::InvalidDomainFormat`] without touching
    /// the network when `raw` is not a `label.tld` domain.
    pub async fn check(
        &self,
        raw: &str,
        checkout: &CheckoutLinkConfig,
    ) -> Result<AvailabilityVerdict, DomainSearchError> {
        let domain = validate_domain(raw)?;
        Ok(self.resolve(&domain, checkout).await)
    }

    /// Get the configuration this resolver was built with.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Lookup URL that would be requested for `domain`.
    pub fn lookup_url(&self, domain: &ValidDomain) -> String {
        self.rdap_client.lookup_url(domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn resolver_for(server: &MockServer) -> AvailabilityResolver {
        let config = ResolverConfig::default()
            .with_endpoint(server.base_url())
            .with_timeout(Duration::from_secs(2));
        AvailabilityResolver::with_config(config).unwrap()
    }

    fn example() -> ValidDomain {
        validate_domain("example.com").unwrap()
    }

    #[tokio::test]
    async fn test_not_found_means_available() {
        let server = MockServer::start_async().await;
        let lookup = server
            .mock_async(|when, then| {
                when.method(GET).path("/domain/example.com");
                then.status(404);
            })
            .await;

        let resolver = resolver_for(&server);
        let verdict = resolver.resolve(&example(), &CheckoutLinkConfig::none()).await;

        assert_eq!(verdict.domain, "example.com");
        assert_eq!(verdict.status, AvailabilityStatus::Available);
        assert_eq!(verdict.checkout_url, None);
        assert_eq!(verdict.error_message, None);
        lookup.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_record_found_means_registered() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/domain/example.com");
                then.status(200)
                    .header("Content-Type", "application/rdap+json")
                    .body(r#"{"objectClassName":"domain","ldhName":"EXAMPLE.COM"}"#);
            })
            .await;

        let resolver = resolver_for(&server);
        let checkout = CheckoutLinkConfig::new("https://bill.example/reg");
        let verdict = resolver.resolve(&example(), &checkout).await;

        assert_eq!(verdict.status, AvailabilityStatus::Registered);
        assert_eq!(verdict.checkout_url, None);
    }

    #[tokio::test]
    async fn test_any_other_status_means_registered() {
        for code in [429u16, 500, 503, 403] {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/domain/example.com");
                    then.status(code);
                })
                .await;

            let resolver = resolver_for(&server);
            let verdict = resolver.resolve(&example(), &CheckoutLinkConfig::none()).await;
            assert_eq!(
                verdict.status,
                AvailabilityStatus::Registered,
                "status {} should be reported as registered",
                code
            );
        }
    }

    #[tokio::test]
    async fn test_checkout_url_attached_when_available() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/domain/example.com");
                then.status(404);
            })
            .await;

        let resolver = resolver_for(&server);

        let verdict = resolver
            .resolve(&example(), &CheckoutLinkConfig::new("https://bill.example/reg"))
            .await;
        assert_eq!(
            verdict.checkout_url.as_deref(),
            Some("https://bill.example/reg?domain=example.com")
        );

        let verdict = resolver
            .resolve(
                &example(),
                &CheckoutLinkConfig::new("https://bill.example/reg?ref=1"),
            )
            .await;
        assert_eq!(
            verdict.checkout_url.as_deref(),
            Some("https://bill.example/reg?ref=1&domain=example.com")
        );
    }

    #[tokio::test]
    async fn test_timeout_yields_lookup_failed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/domain/example.com");
                then.status(404).delay(Duration::from_secs(2));
            })
            .await;

        let config = ResolverConfig::default()
            .with_endpoint(server.base_url())
            .with_timeout(Duration::from_millis(200));
        let resolver = AvailabilityResolver::with_config(config).unwrap();

        let verdict = resolver
            .resolve(&example(), &CheckoutLinkConfig::new("https://bill.example/reg"))
            .await;

        assert_eq!(verdict.status, AvailabilityStatus::LookupFailed);
        assert_eq!(verdict.checkout_url, None);
        assert!(verdict
            .error_message
            .as_deref()
            .unwrap_or_default()
            .contains("timed out"));
    }

    #[tokio::test]
    async fn test_connection_refused_yields_lookup_failed() {
        // Bind then drop a listener so the port is very likely closed.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = ResolverConfig::default()
            .with_endpoint(format!("http://127.0.0.1:{}", port))
            .with_timeout(Duration::from_secs(2));
        let resolver = AvailabilityResolver::with_config(config).unwrap();

        let verdict = resolver.resolve(&example(), &CheckoutLinkConfig::none()).await;
        assert_eq!(verdict.status, AvailabilityStatus::LookupFailed);
        assert!(verdict.error_message.is_some());
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_network() {
        let server = MockServer::start_async().await;
        let any_lookup = server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(404);
            })
            .await;

        let resolver = resolver_for(&server);
        let result = resolver
            .check("not a domain", &CheckoutLinkConfig::new("https://bill.example/reg"))
            .await;

        assert!(matches!(
            result,
            Err(DomainSearchError::InvalidDomainFormat { .. })
        ));
        any_lookup.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent() {
        let server = MockServer::start_async().await;
        let lookup = server
            .mock_async(|when, then| {
                when.method(GET).path("/domain/example.com");
                then.status(404);
            })
            .await;

        let resolver = resolver_for(&server);
        let checkout = CheckoutLinkConfig::new("https://bill.example/reg");
        let first = resolver.resolve(&example(), &checkout).await;
        let second = resolver.resolve(&example(), &checkout).await;

        assert_eq!(first, second);
        lookup.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn test_concurrent_checks_share_one_resolver() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/domain/free.com");
                then.status(404);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/domain/taken.com");
                then.status(200);
            })
            .await;

        let resolver = resolver_for(&server);
        let checkout = CheckoutLinkConfig::none();

        let mut handles = Vec::new();
        for name in ["free.com", "taken.com", "free.com", "taken.com"] {
            let resolver = resolver.clone();
            let checkout = checkout.clone();
            handles.push(tokio::spawn(async move {
                resolver.check(name, &checkout).await.unwrap()
            }));
        }

        for (handle, name) in handles
            .into_iter()
            .zip(["free.com", "taken.com", "free.com", "taken.com"])
        {
            let verdict = handle.await.unwrap();
            assert_eq!(verdict.domain, name);
            let expected = if name == "free.com" {
                AvailabilityStatus::Available
            } else {
                AvailabilityStatus::Registered
            };
            assert_eq!(verdict.status, expected);
        }
    }
}
