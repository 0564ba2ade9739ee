use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::router::doctor_routes;
use shared_utils::test_utils::{JwtTestUtils, MockStoreResponses, TestConfig};

fn test_config(mock_server: &MockServer) -> TestConfig {
    TestConfig::with_store_url(&mock_server.uri())
}

fn app(config: &TestConfig) -> Router {
    doctor_routes(config.to_state())
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn mock_caller(mock_server: &MockServer, email: &str, role: Option<&str>) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", format!("eq.{}", email)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::user(email, role)
        ])))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn roster_requires_a_token() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server);

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app(&config).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn roster_is_forbidden_for_non_admins() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server);

    mock_caller(&mock_server, "user@x.com", None).await;

    let token = JwtTestUtils::create_test_token("user@x.com", &config.jwt_secret, None);

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .header("Authorization", JwtTestUtils::bearer(&token))
        .body(Body::empty())
        .unwrap();

    let response = app(&config).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_lists_the_roster() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server);

    mock_caller(&mock_server, "root@x.com", Some("admin")).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::doctor("dr@x.com", "Dr. Strange", "Dentistry")
        ])))
        .mount(&mock_server)
        .await;

    let token = JwtTestUtils::create_test_token("root@x.com", &config.jwt_secret, None);

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .header("Authorization", JwtTestUtils::bearer(&token))
        .body(Body::empty())
        .unwrap();

    let response = app(&config).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body[0]["email"], "dr@x.com");
}

#[tokio::test]
async fn admin_adds_a_doctor() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server);

    mock_caller(&mock_server, "root@x.com", Some("admin")).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("email", "eq.dr@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreResponses::doctor("dr@x.com", "Dr. Strange", "Dentistry")
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
            json!({ "name": "Dr. Strange", "email": "dr@x.com", "specialty": "Dentistry" })
                .to_string(),
        ))
        .unwrap();

    let response = app(&config).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["name"], "Dr. Strange");
}

#[tokio::test]
async fn adding_a_doctor_twice_is_a_conflict() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server);

    mock_caller(&mock_server, "root@x.com", Some("admin")).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("email", "eq.dr@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::doctor("dr@x.com", "Dr. Strange", "Dentistry")
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
            json!({ "name": "Dr. Strange", "email": "dr@x.com" }).to_string(),
        ))
        .unwrap();

    let response = app(&config).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn admin_removes_a_doctor() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server);

    mock_caller(&mock_server, "root@x.com", Some("admin")).await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("email", "eq.dr@x.com"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let token = JwtTestUtils::create_test_token("root@x.com", &config.jwt_secret, None);

    let request = Request::builder()
        .method("DELETE")
        .uri("/dr@x.com")
        .header("Authorization", JwtTestUtils::bearer(&token))
        .body(Body::empty())
        .unwrap();

    let response = app(&config).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({ "deleted": true }));
}
