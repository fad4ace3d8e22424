//! Sends scenario requests through the reqwest client to the echo fixture
//! and inspects the echoed document field by field.

#![allow(clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use webapi_application::ApiContext;
use webapi_domain::HttpMethod;
use webapi_infrastructure::{ClientConfig, ReqwestHttpClient};

async fn context() -> ApiContext<ReqwestHttpClient> {
    let addr = webapi_echo::spawn(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let client = ReqwestHttpClient::new(&ClientConfig::with_base_url(format!("http://{addr}/")))
        .unwrap();
    ApiContext::with_client(Arc::new(client))
}

fn echoed(context: &ApiContext<ReqwestHttpClient>) -> Value {
    serde_json::from_str(&context.response().unwrap().body).unwrap()
}

#[tokio::test]
async fn test_basic_credentials_reach_the_server_as_one_header() {
    let mut context = context().await;
    context.authenticate_as("user", "pass");
    context.send_request(HttpMethod::Get, "echo").await.unwrap();

    context.assert_status(200).unwrap();
    assert_eq!(
        echoed(&context)["headers"]["authorization"],
        json!(["Basic dXNlcjpwYXNz"])
    );
}

#[tokio::test]
async fn test_authenticating_replaces_a_bearer_header() {
    let mut context = context().await;
    context.set_header("Authorization", "Bearer abc");
    context.authenticate_as("user", "pass");
    context.send_request(HttpMethod::Get, "echo").await.unwrap();

    assert_eq!(
        echoed(&context)["headers"]["authorization"],
        json!(["Basic dXNlcjpwYXNz"])
    );
}

#[tokio::test]
async fn test_array_body_is_echoed_by_position() {
    let mut context = context().await;
    context
        .send_request_with_body(HttpMethod::Put, "echo", "[10, 20]")
        .await
        .unwrap();

    let body = echoed(&context);
    assert_eq!(body["0"], 10);
    assert_eq!(body["1"], 20);
    context.assert_body_contains_json("[10, 20]").unwrap();
}
