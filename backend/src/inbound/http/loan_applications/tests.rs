//! Tests for loan application handlers.

use super::*;
use crate::domain::{DeleteOutcome, Email, InsertOutcome, UpdateOutcome};
use crate::inbound::http::test_utils::{
    APPLICATION_ID, MockPorts, attributes, document_id, test_app,
};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;

fn application(status: ApplicationStatus) -> LoanApplication {
    LoanApplication::from_parts(
        document_id(APPLICATION_ID),
        Email::new("ada@example.com").expect("valid email"),
        status,
        attributes(&json!({ "loanTitle": "Clinic bill", "amount": 250 })),
    )
}

async fn call(ports: MockPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports.into_state())).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

#[rstest]
#[actix_web::test]
async fn submission_is_wrapped_in_envelope() {
    let mut ports = MockPorts::default();
    ports
        .loan_applications
        .expect_submit()
        .withf(|draft| {
            draft.email().as_ref() == "ada@example.com"
                && draft.attributes().get("loanTitle") == Some(&json!("Clinic bill"))
                && draft.attributes().get("status").is_none()
        })
        .times(1)
        .return_once(|_| {
            Ok(InsertOutcome {
                inserted_id: document_id(APPLICATION_ID),
            })
        });

    let request = actix_test::TestRequest::post()
        .uri("/loan-application")
        .set_json(json!({
            "email": "ada@example.com",
            "status": "Pending",
            "loanTitle": "Clinic bill"
        }));
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Loan Application Submitted",
            "result": { "acknowledged": true, "insertedId": APPLICATION_ID }
        })
    );
}

#[rstest]
#[case(json!({ "loanTitle": "x" }), "missing_field")]
#[case(json!({ "email": "not-an-email" }), "invalid_email")]
#[case(json!({ "email": "ada@example.com", "status": "Approved" }), "invalid_initial_status")]
#[case(json!({ "email": "ada@example.com", "status": "approved" }), "invalid_status")]
#[case(json!({ "email": "ada@example.com", "_id": "x" }), "invalid_field")]
#[actix_web::test]
async fn submission_failures_use_client_error_status(
    #[case] payload: Value,
    #[case] detail_code: &str,
) {
    let request = actix_test::TestRequest::post()
        .uri("/loan-application")
        .set_json(payload);
    let (status, body) = call(MockPorts::default(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["details"]["code"], json!(detail_code));
}

#[rstest]
#[actix_web::test]
async fn submission_store_failure_is_not_a_success() {
    let mut ports = MockPorts::default();
    ports
        .loan_applications
        .expect_submit()
        .times(1)
        .return_once(|_| Err(Error::service_unavailable("database is not connected")));

    let request = actix_test::TestRequest::post()
        .uri("/loan-application")
        .set_json(json!({ "email": "ada@example.com" }));
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], json!(false));
}

#[rstest]
#[actix_web::test]
async fn list_renders_typed_fields_and_attributes() {
    let mut ports = MockPorts::default();
    ports
        .loan_applications_query
        .expect_all_applications()
        .times(1)
        .return_once(|| Ok(vec![application(ApplicationStatus::Pending)]));

    let (status, body) =
        call(ports, actix_test::TestRequest::get().uri("/loan-applications")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "_id": APPLICATION_ID,
            "email": "ada@example.com",
            "status": "Pending",
            "loanTitle": "Clinic bill",
            "amount": 250
        }])
    );
}

#[rstest]
#[actix_web::test]
async fn email_filter_passes_raw_path_segment() {
    let mut ports = MockPorts::default();
    ports
        .loan_applications_query
        .expect_applications_for()
        .withf(|email| email.to_string() == "Ada@Example.com")
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let request = actix_test::TestRequest::get().uri("/loan-applications/Ada@Example.com");
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn my_loans_wraps_matches() {
    let mut ports = MockPorts::default();
    ports
        .loan_applications_query
        .expect_applications_for()
        .withf(|email| email.to_string() == "ada@example.com")
        .times(1)
        .return_once(|_| Ok(vec![application(ApplicationStatus::Approved)]));

    let request = actix_test::TestRequest::get().uri("/my-loans/ada@example.com");
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["loans"][0]["status"], json!("Approved"));
}

#[rstest]
#[actix_web::test]
async fn approved_loans_wraps_matches() {
    let mut ports = MockPorts::default();
    ports
        .loan_applications_query
        .expect_approved_applications()
        .times(1)
        .return_once(|| Ok(vec![application(ApplicationStatus::Approved)]));

    let (status, body) = call(ports, actix_test::TestRequest::get().uri("/approved-loans")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["loans"].as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn cancellation_reports_deleted_count() {
    let mut ports = MockPorts::default();
    ports
        .loan_applications
        .expect_cancel()
        .withf(|id| id.to_string() == APPLICATION_ID)
        .times(1)
        .return_once(|_| Ok(DeleteOutcome { deleted_count: 1 }));

    let request =
        actix_test::TestRequest::delete().uri(&format!("/loan-applications/{APPLICATION_ID}"));
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Application cancelled",
            "result": { "acknowledged": true, "deletedCount": 1 }
        })
    );
}

#[rstest]
#[case(Error::not_found("Application not found"), StatusCode::NOT_FOUND)]
#[case(
    Error::invalid_request("Only pending applications can be cancelled"),
    StatusCode::BAD_REQUEST
)]
#[actix_web::test]
async fn cancellation_failures_keep_their_status(
    #[case] error: Error,
    #[case] expected: StatusCode,
) {
    let mut ports = MockPorts::default();
    ports
        .loan_applications
        .expect_cancel()
        .times(1)
        .return_once(move |_| Err(error));

    let request =
        actix_test::TestRequest::delete().uri(&format!("/loan-applications/{APPLICATION_ID}"));
    let (status, body) = call(ports, request).await;

    assert_eq!(status, expected);
    assert_eq!(body["success"], json!(false));
}

#[rstest]
#[actix_web::test]
async fn status_update_forwards_parsed_status() {
    let mut ports = MockPorts::default();
    ports
        .loan_applications
        .expect_set_status()
        .withf(|_, status| *status == ApplicationStatus::Rejected)
        .times(1)
        .return_once(|_, _| {
            Ok(UpdateOutcome {
                matched_count: 1,
                modified_count: 1,
            })
        });

    let request = actix_test::TestRequest::put()
        .uri(&format!("/loan-applications/{APPLICATION_ID}/status"))
        .set_json(json!({ "status": "Rejected" }));
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "result": { "acknowledged": true, "matchedCount": 1, "modifiedCount": 1 }
        })
    );
}

#[rstest]
#[case(json!({ "status": "Archived" }), "invalid_status")]
#[case(json!({}), "missing_field")]
#[actix_web::test]
async fn status_update_rejects_unknown_values(#[case] payload: Value, #[case] detail_code: &str) {
    let request = actix_test::TestRequest::put()
        .uri(&format!("/loan-applications/{APPLICATION_ID}/status"))
        .set_json(payload);
    let (status, body) = call(MockPorts::default(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!(detail_code));
}
