//! Checkout link composition.

use crate::types::{CheckoutLinkConfig, ValidDomain};
use url::form_urlencoded::byte_serialize;

/// Percent-encode a domain for use in a URL path segment or query value.
pub(crate) fn encode_domain(domain: &ValidDomain) -> String {
    byte_serialize(domain.as_str().as_bytes()).collect()
}

/// Append `domain=<domain>` to the configured checkout URL.
///
/// The separator is `&` when the base already carries a query string and `?`
/// otherwise. A blank base yields `None`.
///
/// ```rust
/// use domain_search_lib::{build_checkout_url, validate_domain, CheckoutLinkConfig};
///
/// let domain = validate_domain("example.com").unwrap();
/// let link = build_checkout_url(&CheckoutLinkConfig::new("https://bill.example/reg?ref=1"), &domain);
/// assert_eq!(link.as_deref(), Some("https://bill.example/reg?ref=1&domain=example.com"));
/// ```
pub fn build_checkout_url(checkout: &CheckoutLinkConfig, domain: &ValidDomain) -> Option<String> {
    let base = checkout.base_url.trim();
    if base.is_empty() {
        return None;
    }

    let separator = if base.contains('?') { '&' } else { '?' };
    Some(format!(
        "{}{}domain={}",
        base,
        separator,
        encode_domain(domain)
    ))
}
