//! Input validation for candidate domain names.
//!
//! Only the `label.tld` shape is accepted: one label of ASCII letters, digits
//! and hyphens, a single dot, and an alphabetic TLD of at least two letters.
//! Subdomains, internationalized names and numeric TLDs are rejected.

use crate::error::DomainSearchError;
use crate::types::ValidDomain;
use regex::Regex;

lazy_static::lazy_static! {
    static ref DOMAIN_PATTERN: Regex =
        Regex::new(r"^[A-Za-z0-9\-]+\.[A-Za-z]{2,}$").expect("domain pattern is valid");
}

/// Validate a raw domain string as submitted by a user.
///
/// Surrounding whitespace is trimmed; nothing else is normalized.
///
/// # Errors
///
/// Returns [`DomainSearchError::InvalidDomainFormat`] when the trimmed input
/// does not match `label.tld`.
pub fn validate_domain(raw: &str) -> Result<ValidDomain, DomainSearchError> {
    let candidate = raw.trim();

    if DOMAIN_PATTERN.is_match(candidate) {
        Ok(ValidDomain::new_unchecked(candidate.to_string()))
    } else {
        Err(DomainSearchError::invalid_domain(raw))
    }
}
