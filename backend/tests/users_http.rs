//! User account routes end to end over the in-memory store.

mod support;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::rstest;
use serde_json::json;

use support::{inserted_id, memory_app, send};

#[rstest]
#[actix_web::test]
async fn registration_forces_active_status() {
    let app = memory_app().await;

    let (status, created) = send(
        &app,
        TestRequest::post().uri("/users").set_json(json!({
            "email": "ada@example.com",
            "name": "Ada",
            "role": "borrower",
            "status": "suspended"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = inserted_id(&created);

    let (_, users) = send(&app, TestRequest::get().uri("/users")).await;
    assert_eq!(
        users,
        json!([{
            "_id": id,
            "email": "ada@example.com",
            "role": "borrower",
            "status": "active",
            "name": "Ada"
        }])
    );
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_rejected_without_second_document() {
    let app = memory_app().await;
    let request = || {
        TestRequest::post()
            .uri("/users")
            .set_json(json!({"email": "ada@example.com"}))
    };

    let (first, _) = send(&app, request()).await;
    let (second, body) = send(&app, request()).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("User already exists"));
    let (_, users) = send(&app, TestRequest::get().uri("/users")).await;
    assert_eq!(users.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn role_and_status_are_updated_independently() {
    let app = memory_app().await;
    let (_, created) = send(
        &app,
        TestRequest::post()
            .uri("/users")
            .set_json(json!({"email": "grace@example.com", "role": "borrower"})),
    )
    .await;
    let id = inserted_id(&created);

    let (status, role) = send(
        &app,
        TestRequest::put()
            .uri(&format!("/users/{id}/role"))
            .set_json(json!({"role": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(role["matchedCount"], json!(1));

    let (status, account) = send(
        &app,
        TestRequest::put()
            .uri(&format!("/users/{id}/status"))
            .set_json(json!({"status": "blocked"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["modifiedCount"], json!(1));

    let (_, users) = send(&app, TestRequest::get().uri("/users")).await;
    assert_eq!(users[0]["role"], json!("admin"));
    assert_eq!(users[0]["status"], json!("blocked"));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_body_is_a_client_error() {
    let app = memory_app().await;

    let (status, body) = send(
        &app,
        TestRequest::post()
            .uri("/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"email\":"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!("invalid_json"));
}
