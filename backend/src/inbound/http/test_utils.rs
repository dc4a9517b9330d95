//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use serde_json::Value;

use crate::domain::ports::{
    MockLoanApplicationsCommand, MockLoanApplicationsQuery, MockLoanOffersCommand,
    MockLoanOffersQuery, MockUsersCommand, MockUsersQuery,
};
use crate::domain::{Attributes, DocumentId};
use crate::inbound::http::state::HttpState;

/// Well-formed offer identifier.
pub const OFFER_ID: &str = "64b7f0c2a1b2c3d4e5f60718";
/// Well-formed application identifier.
pub const APPLICATION_ID: &str = "64b7f0c2a1b2c3d4e5f60719";
/// Well-formed user identifier.
pub const USER_ID: &str = "64b7f0c2a1b2c3d4e5f6071a";

/// Mocked driving ports; set expectations on the fields, then build state.
#[derive(Default)]
pub struct MockPorts {
    /// Offer mutations.
    pub loan_offers: MockLoanOffersCommand,
    /// Offer reads.
    pub loan_offers_query: MockLoanOffersQuery,
    /// Application mutations.
    pub loan_applications: MockLoanApplicationsCommand,
    /// Application reads.
    pub loan_applications_query: MockLoanApplicationsQuery,
    /// Account mutations.
    pub users: MockUsersCommand,
    /// Account reads.
    pub users_query: MockUsersQuery,
}

impl MockPorts {
    /// Move the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState {
            loan_offers: Arc::new(self.loan_offers),
            loan_offers_query: Arc::new(self.loan_offers_query),
            loan_applications: Arc::new(self.loan_applications),
            loan_applications_query: Arc::new(self.loan_applications_query),
            users: Arc::new(self.users),
            users_query: Arc::new(self.users_query),
        }
    }
}

/// App exposing every API route over the given state.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(crate::inbound::http::configure)
}

/// Parse a literal identifier.
pub fn document_id(raw: &str) -> DocumentId {
    DocumentId::new(raw).expect("valid document id")
}

/// Wrap a JSON object literal as attributes.
pub fn attributes(value: &Value) -> Attributes {
    Attributes::new(value.as_object().cloned().expect("object literal")).expect("valid attributes")
}
