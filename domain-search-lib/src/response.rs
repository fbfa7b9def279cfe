//! Response envelope handed back to the form.
//!
//! A check ends either in a verdict the user can act on or in a rejection.
//! On the wire both take the `{"success": bool, "data": {...}}` shape the
//! form script expects; in Rust they stay a typed enum.

use crate::error::DomainSearchError;
use crate::types::{AvailabilityStatus, AvailabilityVerdict};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Why a request did not produce a usable verdict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    InvalidDomainFormat,
    SecurityCheckFailed,
    LookupFailed,
}

/// Failure payload of the envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rejection {
    pub kind: RejectionKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// Outcome of one request at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResponse {
    /// The domain is either available or registered
    Checked(AvailabilityVerdict),
    /// Input, token or lookup problem
    Rejected(Rejection),
}

impl CheckResponse {
    /// Wrap a verdict; lookup failures become rejections.
    pub fn from_verdict(verdict: AvailabilityVerdict) -> Self {
        match verdict.status {
            AvailabilityStatus::LookupFailed => Self::Rejected(Rejection {
                kind: RejectionKind::LookupFailed,
                message: verdict.message(),
                domain: Some(verdict.domain),
            }),
            _ => Self::Checked(verdict),
        }
    }

    /// Wrap an error raised before or instead of a lookup.
    ///
    /// The wire only knows three kinds. Configuration and file errors are
    /// settled at startup and never come from a request; if one is passed
    /// here it is reported as `lookup_failed` with the generic message and
    /// no domain, since no verdict could be produced.
    pub fn from_error(err: &DomainSearchError) -> Self {
        let (kind, domain) = match err {
            DomainSearchError::InvalidDomainFormat { .. } => {
                (RejectionKind::InvalidDomainFormat, None)
            }
            DomainSearchError::SecurityCheckFailed => (RejectionKind::SecurityCheckFailed, None),
            DomainSearchError::LookupTransport { domain, .. } => {
                (RejectionKind::LookupFailed, Some(domain.clone()))
            }
            // Startup-time failures; nothing request-specific to report.
            DomainSearchError::ConfigError { .. } | DomainSearchError::FileError { .. } => {
                (RejectionKind::LookupFailed, None)
            }
        };

        Self::Rejected(Rejection {
            kind,
            message: err.user_message().to_string(),
            domain,
        })
    }

    /// Build from the result of [`AvailabilityResolver::check`](crate::AvailabilityResolver::check).
    pub fn from_result(result: Result<AvailabilityVerdict, DomainSearchError>) -> Self {
        match result {
            Ok(verdict) => Self::from_verdict(verdict),
            Err(err) => Self::from_error(&err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Checked(_))
    }

    /// Human-readable text for either outcome.
    pub fn message(&self) -> String {
        match self {
            Self::Checked(verdict) => verdict.message(),
            Self::Rejected(rejection) => rejection.message.clone(),
        }
    }
}

#[derive(Serialize)]
struct CheckedData<'a> {
    #[serde(flatten)]
    verdict: &'a AvailabilityVerdict,
    message: String,
}

impl Serialize for CheckResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut envelope = serializer.serialize_struct("CheckResponse", 2)?;
        envelope.serialize_field("success", &self.is_success())?;
        match self {
            Self::Checked(verdict) => envelope.serialize_field(
                "data",
                &CheckedData {
                    verdict,
                    message: verdict.message(),
                },
            )?,
            Self::Rejected(rejection) => envelope.serialize_field("data", rejection)?,
        }
        envelope.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CheckoutLinkConfig, ValidDomain};
    use serde_json::json;

    fn domain() -> ValidDomain {
        ValidDomain::new_unchecked("example.com".to_string())
    }

    #[test]
    fn test_available_envelope() {
        let checkout = CheckoutLinkConfig::new("https://bill.example/reg");
        let url = crate::build_checkout_url(&checkout, &domain());
        let response = CheckResponse::from_verdict(AvailabilityVerdict::available(&domain(), url));

        assert!(response.is_success());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": true,
                "data": {
                    "domain": "example.com",
                    "status": "available",
                    "checkout_url": "https://bill.example/reg?domain=example.com",
                    "message": "example.com is available!"
                }
            })
        );
    }

    #[test]
    fn test_registered_envelope() {
        let response = CheckResponse::from_verdict(AvailabilityVerdict::registered(&domain()));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": true,
                "data": {
                    "domain": "example.com",
                    "status": "registered",
                    "message": "example.com is already registered."
                }
            })
        );
    }

    #[test]
    fn test_lookup_failure_is_rejected_without_detail() {
        let verdict = AvailabilityVerdict::lookup_failed(&domain(), "dns error".to_string());
        let response = CheckResponse::from_verdict(verdict);

        assert!(!response.is_success());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": false,
                "data": {
                    "kind": "lookup_failed",
                    "message": "An error occurred.",
                    "domain": "example.com"
                }
            })
        );
    }

    #[test]
    fn test_error_envelopes() {
        let invalid = CheckResponse::from_error(&DomainSearchError::invalid_domain("<b>"));
        assert_eq!(
            serde_json::to_value(&invalid).unwrap(),
            json!({
                "success": false,
                "data": {"kind": "invalid_domain_format", "message": "Invalid domain format."}
            })
        );

        let denied = CheckResponse::from_error(&DomainSearchError::SecurityCheckFailed);
        assert_eq!(denied.message(), "Security check failed.");
        assert!(matches!(
            denied,
            CheckResponse::Rejected(Rejection {
                kind: RejectionKind::SecurityCheckFailed,
                ..
            })
        ));
    }

    #[test]
    fn test_from_result() {
        let ok = CheckResponse::from_result(Ok(AvailabilityVerdict::registered(&domain())));
        assert!(ok.is_success());

        let err = CheckResponse::from_result(Err(DomainSearchError::invalid_domain("x")));
        assert!(!err.is_success());
    }

    #[test]
    fn test_startup_errors_do_not_leak_detail() {
        for err in [
            DomainSearchError::config("bad endpoint 'ftp://x'"),
            DomainSearchError::file_error("/etc/secret.toml", "permission denied"),
        ] {
            assert_eq!(
                serde_json::to_value(CheckResponse::from_error(&err)).unwrap(),
                json!({
                    "success": false,
                    "data": {"kind": "lookup_failed", "message": "An error occurred."}
                })
            );
        }
    }
}
