use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_utils::test_utils::{JwtTestUtils, MockStoreResponses, TestConfig};
use treatment_cell::router::treatment_routes;

fn test_config(mock_server: &MockServer) -> TestConfig {
    TestConfig::with_store_url(&mock_server.uri())
}

fn app(config: &TestConfig) -> Router {
    treatment_routes(config.to_state())
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn mock_admin_caller(mock_server: &MockServer, email: &str) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", format!("eq.{}", email)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::user(email, Some("admin"))
        ])))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn listing_services_is_public() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server);

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::service("s1", "Cleaning", 100.0, &["9am", "10am"]),
            MockStoreResponses::service("s2", "Whitening", 250.0, &["1pm"])
        ])))
        .mount(&mock_server)
        .await;

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app(&config).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["name"], "Cleaning");
}

#[tokio::test]
async fn creating_a_service_without_token_is_unauthenticated() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server);

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "name": "Cleaning", "price": 100.0, "slots": ["9am"] }).to_string(),
        ))
        .unwrap();

    let response = app(&config).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn creating_a_service_as_non_admin_is_forbidden() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server);

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", "eq.user@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::user("user@x.com", None)
        ])))
        .mount(&mock_server)
        .await;

    let token = JwtTestUtils::create_test_token("user@x.com", &config.jwt_secret, None);

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("Authorization", JwtTestUtils::bearer(&token))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "name": "Cleaning", "price": 100.0, "slots": ["9am"] }).to_string(),
        ))
        .unwrap();

    let response = app(&config).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_creates_a_service() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server);

    mock_admin_caller(&mock_server, "root@x.com").await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .and(query_param("name", "eq.Fluoride"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreResponses::service("s3", "Fluoride", 80.0, &["2pm", "3pm"])
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let token = JwtTestUtils::create_test_token("root@x.com", &config.jwt_secret, None);

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("Authorization", JwtTestUtils::bearer(&token))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "name": "Fluoride", "price": 80.0, "slots": ["2pm", "3pm"] }).to_string(),
        ))
        .unwrap();

    let response = app(&config).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["name"], "Fluoride");
}

#[tokio::test]
async fn duplicate_service_name_is_a_conflict() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server);

    mock_admin_caller(&mock_server, "root@x.com").await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .and(query_param("name", "eq.Cleaning"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::service("s1", "Cleaning", 100.0, &["9am"])
        ])))
        .mount(&mock_server)
        .await;

    let token = JwtTestUtils::create_test_token("root@x.com", &config.jwt_secret, None);

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("Authorization", JwtTestUtils::bearer(&token))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "name": "Cleaning", "price": 100.0, "slots": ["9am"] }).to_string(),
        ))
        .unwrap();

    let response = app(&config).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn admin_deletes_a_service() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server);

    mock_admin_caller(&mock_server, "root@x.com").await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/services"))
        .and(query_param("name", "eq.Cleaning"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let token = JwtTestUtils::create_test_token("root@x.com", &config.jwt_secret, None);

    let request = Request::builder()
        .method("DELETE")
        .uri("/Cleaning")
        .header("Authorization", JwtTestUtils::bearer(&token))
        .body(Body::empty())
        .unwrap();

    let response = app(&config).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({ "deleted": true }));
}
