//! HTTP inbound adapter exposing REST endpoints.
//!
//! Routes keep the public paths of the marketplace front end
//! (`/LoanRequests`, `/loan-application`, `/users`, ...); there is no
//! versioned prefix.

use actix_web::{error::JsonPayloadError, web};
use tracing::debug;

pub mod envelopes;
pub mod error;
pub mod health;
pub mod loan_applications;
pub mod loan_offers;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// JSON extractor settings: malformed bodies become `invalid_request` errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        debug!(error = %err, "rejected request body");
        validation::invalid_json_error(format!("request body is not valid JSON: {err}")).into()
    })
}

/// Register every API route and the JSON extractor settings.
///
/// Health probes are registered separately because they depend on
/// [`health::HealthState`] rather than [`state::HttpState`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(loan_offers::list_home_offers)
        .service(loan_offers::list_all_offers)
        .service(loan_offers::loan_details)
        .service(loan_offers::create_offer)
        .service(loan_offers::delete_offer)
        .service(loan_offers::set_home_visibility)
        .service(loan_applications::submit_application)
        .service(loan_applications::list_applications)
        .service(loan_applications::applications_by_email)
        .service(loan_applications::my_loans)
        .service(loan_applications::cancel_application)
        .service(loan_applications::set_application_status)
        .service(loan_applications::approved_loans)
        .service(users::list_users)
        .service(users::register_user)
        .service(users::set_user_role)
        .service(users::set_user_status);
}
