//! Tests for user account handlers.

use super::*;
use crate::domain::{AccountStatus, Email, InsertOutcome, Role, UpdateOutcome};
use crate::inbound::http::test_utils::{MockPorts, USER_ID, attributes, document_id, test_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::json;

async fn call(ports: MockPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports.into_state())).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

fn inserted() -> Result<InsertOutcome, Error> {
    Ok(InsertOutcome {
        inserted_id: document_id(USER_ID),
    })
}

#[rstest]
#[actix_web::test]
async fn list_renders_accounts() {
    let mut ports = MockPorts::default();
    ports.users_query.expect_list_users().times(1).return_once(|| {
        Ok(vec![UserAccount::from_parts(
            document_id(USER_ID),
            Email::new("ada@example.com").expect("valid email"),
            Some(Role::new("admin").expect("valid role")),
            AccountStatus::active(),
            attributes(&json!({ "name": "Ada" })),
        )])
    });

    let (status, body) = call(ports, actix_test::TestRequest::get().uri("/users")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "_id": USER_ID,
            "email": "ada@example.com",
            "role": "admin",
            "status": "active",
            "name": "Ada"
        }])
    );
}

#[rstest]
#[actix_web::test]
async fn registration_discards_submitted_status() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_register()
        .withf(|draft| {
            draft.status().as_ref() == AccountStatus::ACTIVE
                && draft.attributes().get("status").is_none()
                && draft.attributes().get("name") == Some(&json!("Ada"))
                && draft.role().is_some_and(|role| role.as_ref() == "borrower")
        })
        .times(1)
        .return_once(|_| inserted());

    let request = actix_test::TestRequest::post().uri("/users").set_json(json!({
        "email": "ada@example.com",
        "name": "Ada",
        "role": "borrower",
        "status": "suspended"
    }));
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "acknowledged": true, "insertedId": USER_ID }));
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_a_client_error() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_register()
        .times(1)
        .return_once(|_| Err(Error::invalid_request("User already exists")));

    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "email": "ada@example.com" }));
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("User already exists"));
}

#[rstest]
#[case(json!({ "name": "Ada" }), "missing_field")]
#[case(json!({ "email": "ada" }), "invalid_email")]
#[case(json!({ "email": "ada@example.com", "role": "  " }), "invalid_label")]
#[actix_web::test]
async fn registration_validates_body(#[case] payload: Value, #[case] detail_code: &str) {
    let request = actix_test::TestRequest::post().uri("/users").set_json(payload);
    let (status, body) = call(MockPorts::default(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!(detail_code));
}

#[rstest]
#[actix_web::test]
async fn role_update_forwards_role() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_set_role()
        .withf(|id, role| id.to_string() == USER_ID && role.as_ref() == "admin")
        .times(1)
        .return_once(|_, _| {
            Ok(UpdateOutcome {
                matched_count: 1,
                modified_count: 1,
            })
        });

    let request = actix_test::TestRequest::put()
        .uri(&format!("/users/{USER_ID}/role"))
        .set_json(json!({ "role": "admin" }));
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "acknowledged": true, "matchedCount": 1, "modifiedCount": 1 })
    );
}

#[rstest]
#[actix_web::test]
async fn status_update_reports_unmatched_id() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_set_status()
        .withf(|_, status| status.as_ref() == "suspended")
        .times(1)
        .return_once(|_, _| Ok(UpdateOutcome::default()));

    let request = actix_test::TestRequest::put()
        .uri(&format!("/users/{USER_ID}/status"))
        .set_json(json!({ "status": "suspended" }));
    let (status, body) = call(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedCount"], json!(0));
}

#[rstest]
#[case("/users/nope/role".to_owned(), json!({ "role": "admin" }), "invalid_object_id")]
#[case(format!("/users/{USER_ID}/role"), json!({}), "missing_field")]
#[case(format!("/users/{USER_ID}/status"), json!({ "status": "" }), "invalid_label")]
#[actix_web::test]
async fn updates_validate_input(
    #[case] uri: String,
    #[case] payload: Value,
    #[case] detail_code: &str,
) {
    let request = actix_test::TestRequest::put().uri(&uri).set_json(payload);
    let (status, body) = call(MockPorts::default(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!(detail_code));
}
