//! Shared harness for HTTP integration tests over the in-memory store.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self as actix_test, TestRequest};
use actix_web::{App, web};
use microloan_backend::Trace;
use microloan_backend::inbound::http::configure;
use microloan_backend::inbound::http::state::HttpState;
use microloan_backend::outbound::persistence::InMemoryStore;
use serde_json::Value;

/// Initialise the full API over a fresh in-memory store.
pub async fn memory_app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    let store = Arc::new(InMemoryStore::new());
    let state = HttpState::from_repositories(store.clone(), store.clone(), store);
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

/// Send `request` and return the status with the JSON body.
pub async fn send<S, B>(app: &S, request: TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(app, request.to_request()).await;
    let status = res.status();
    let bytes = actix_test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

/// Extract the `insertedId` from an insert acknowledgement.
pub fn inserted_id(body: &Value) -> String {
    body["insertedId"]
        .as_str()
        .expect("insertedId present")
        .to_owned()
}
