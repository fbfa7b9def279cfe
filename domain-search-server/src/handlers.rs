use crate::auth::token_matches;
use crate::state::AppState;
use axum::{extract::State, Form, Json};
use domain_search_lib::{CheckResponse, CheckoutLinkConfig, DomainSearchError};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Form fields posted by the search box.
#[derive(Debug, Default, Deserialize)]
pub struct CheckForm {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

pub async fn health_check() -> &'static str {
    debug!("Health check requested");
    "OK"
}

/// `POST /check`: verify the token, then validate and look up the domain.
pub async fn check_domain(
    State(state): State<AppState>,
    Form(form): Form<CheckForm>,
) -> Json<CheckResponse> {
    if !token_matches(state.token.as_deref(), form.token.as_deref()) {
        warn!("rejecting check request with a bad token");
        return Json(CheckResponse::from_error(
            &DomainSearchError::SecurityCheckFailed,
        ));
    }

    let checkout = CheckoutLinkConfig::from(form.checkout_url).or_default(&state.default_checkout);
    let result = state.resolver.check(&form.domain, &checkout).await;

    match &result {
        Ok(verdict) => info!(domain = %verdict.domain, status = %verdict.status, "domain checked"),
        Err(e) => info!(error = %e, "check request rejected"),
    }

    Json(CheckResponse::from_result(result))
}
