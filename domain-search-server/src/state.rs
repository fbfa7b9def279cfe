use domain_search_lib::{AvailabilityResolver, CheckoutLinkConfig, DomainSearchError, Settings};
use std::sync::Arc;

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<AvailabilityResolver>,
    /// Used when a request leaves `checkout_url` blank
    pub default_checkout: CheckoutLinkConfig,
    /// When set, every request must send the same value in `token`
    pub token: Option<String>,
}

impl AppState {
    pub fn new(
        resolver: AvailabilityResolver,
        default_checkout: CheckoutLinkConfig,
        token: Option<String>,
    ) -> Self {
        Self {
            resolver: Arc::new(resolver),
            default_checkout,
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, DomainSearchError> {
        let resolver = AvailabilityResolver::with_config(settings.resolver.clone())?;
        Ok(Self::new(
            resolver,
            settings.checkout.clone(),
            settings.token.clone(),
        ))
    }
}
