//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (loan offers,
//!   loan applications, users, health)
//! - **Schemas**: request and response bodies plus the domain error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that describe domain types
//!   without coupling them to utoipa
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::envelopes::{
    CancellationEnvelope, DeleteResultBody, InsertResultBody, LoanEnvelope, LoansEnvelope,
    SubmissionEnvelope, UpdateEnvelope, UpdateResultBody,
};
use crate::inbound::http::loan_applications::{
    ApplicationStatusRequest, LoanApplicationBody, LoanApplicationRequest,
};
use crate::inbound::http::loan_offers::{HomeVisibilityRequest, LoanOfferBody, LoanOfferRequest};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{AccountStatusRequest, RoleRequest, UserBody, UserRequest};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Microloan request server API",
        description = "Loan offers, loan applications and user accounts for the microloan marketplace."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::loan_offers::list_home_offers,
        crate::inbound::http::loan_offers::list_all_offers,
        crate::inbound::http::loan_offers::loan_details,
        crate::inbound::http::loan_offers::create_offer,
        crate::inbound::http::loan_offers::delete_offer,
        crate::inbound::http::loan_offers::set_home_visibility,
        crate::inbound::http::loan_applications::submit_application,
        crate::inbound::http::loan_applications::list_applications,
        crate::inbound::http::loan_applications::applications_by_email,
        crate::inbound::http::loan_applications::my_loans,
        crate::inbound::http::loan_applications::cancel_application,
        crate::inbound::http::loan_applications::set_application_status,
        crate::inbound::http::loan_applications::approved_loans,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::set_user_role,
        crate::inbound::http::users::set_user_status,
        crate::inbound::http::health::index,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LoanOfferBody,
        LoanOfferRequest,
        HomeVisibilityRequest,
        LoanApplicationBody,
        LoanApplicationRequest,
        ApplicationStatusRequest,
        UserBody,
        UserRequest,
        RoleRequest,
        AccountStatusRequest,
        InsertResultBody,
        UpdateResultBody,
        DeleteResultBody,
        LoanEnvelope,
        SubmissionEnvelope,
        CancellationEnvelope,
        UpdateEnvelope,
        LoansEnvelope,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "loan-offers", description = "Loan offers published by lenders"),
        (name = "loan-applications", description = "Applications submitted by borrowers"),
        (name = "users", description = "User accounts, roles and account status"),
        (name = "health", description = "Banner and health probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying registered paths and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/LoanRequests")]
    #[case("/AllLoans")]
    #[case("/loan-details/{id}")]
    #[case("/loans/{id}")]
    #[case("/loans/{id}/home")]
    #[case("/loan-application")]
    #[case("/loan-applications")]
    #[case("/loan-applications/{email}")]
    #[case("/my-loans/{email}")]
    #[case("/loan-applications/{id}")]
    #[case("/loan-applications/{id}/status")]
    #[case("/approved-loans")]
    #[case("/users")]
    #[case("/users/{id}/role")]
    #[case("/users/{id}/status")]
    #[case("/")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn openapi_registers_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn openapi_insert_result_schema_is_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let insert = schemas.get("InsertResultBody").expect("insert schema");

        assert_object_schema_has_field(insert, "acknowledged");
        assert_object_schema_has_field(insert, "insertedId");
    }
}
