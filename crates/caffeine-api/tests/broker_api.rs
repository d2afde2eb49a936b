//! Open Service Broker API tests against a mock cache backend

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use caffeine_api::{AppState, MetricsHandle, create_router};
use caffeine_proxy::{CaffeineClient, CaffeineClientConfig};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper: router for the backend at `url`.
fn router_for(url: &str, metrics: Option<Arc<MetricsHandle>>) -> Router {
    let client = CaffeineClient::new(CaffeineClientConfig {
        url: url.to_string(),
        username: "admin".to_string(),
        password: "secret".to_string(),
        skip_tls_verify: false,
        timeout: None,
    })
    .unwrap();

    create_router(AppState::with_client(Arc::new(client)), metrics)
}

/// Helper: router wired to a fresh mock backend.
async fn setup() -> (MockServer, Router) {
    let server = MockServer::start().await;
    let app = router_for(&server.uri(), None);
    (server, app)
}

/// Helper: send a request and return the raw response body.
async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Helper: send a request and decode the JSON response body.
async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, text) = send_raw(app, method, uri, body).await;
    let value = serde_json::from_str(&text).unwrap_or(Value::Null);

    (status, value)
}

fn provision_body(plan_id: &str) -> Value {
    json!({
        "service_id": "caffeine-broker",
        "plan_id": plan_id,
        "organization_guid": "org-guid",
        "space_guid": "space-guid"
    })
}

// ==================== Catalog ====================

#[tokio::test]
async fn test_catalog() {
    let (_server, app) = setup().await;

    let (status, body) = send(app, Method::GET, "/v2/catalog", None).await;

    assert_eq!(status, StatusCode::OK);
    let service = &body["services"][0];
    assert_eq!(service["id"], "caffeine-broker");
    assert_eq!(service["plans"][0]["id"], "strong");
    assert_eq!(
        service["plans"][0]["description"],
        "strong caffeine plan (1000 elements, expires 600 seconds after last access)"
    );
    assert_eq!(service["plans"][1]["id"], "weak");
}

// ==================== Provisioning ====================

#[tokio::test]
async fn test_provision_weak_plan() {
    let (server, app) = setup().await;

    Mock::given(method("POST"))
        .and(path("/caffeine"))
        .and(query_param("service_id", "inst-1"))
        .and(query_param("expire_second", "60"))
        .and(query_param("maximum_size", "100"))
        .and(basic_auth("admin", "secret"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = send(
        app,
        Method::PUT,
        "/v2/service_instances/inst-1",
        Some(provision_body("weak")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_provision_conflict() {
    let (server, app) = setup().await;

    Mock::given(method("POST"))
        .and(path("/caffeine"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let (status, body) = send(
        app,
        Method::PUT,
        "/v2/service_instances/inst-1",
        Some(provision_body("strong")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["description"],
        "Service instance with the given ID already exists: serviceInstanceId=inst-1, serviceDefinitionId=caffeine-broker"
    );
}

#[tokio::test]
async fn test_provision_unknown_service_definition() {
    let (server, app) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = send(
        app,
        Method::PUT,
        "/v2/service_instances/inst-1",
        Some(json!({"service_id": "redis", "plan_id": "weak"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["description"], "Service definition does not exist: id=redis");
}

#[tokio::test]
async fn test_provision_unknown_plan() {
    let (server, app) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = send(
        app,
        Method::PUT,
        "/v2/service_instances/inst-1",
        Some(provision_body("gold")),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["description"], "Configuration error: Unknown plan tier: gold");
}

#[tokio::test]
async fn test_provision_unreachable_backend_is_conflict() {
    // Nothing listens on port 1
    let app = router_for("http://127.0.0.1:1", None);

    let (status, body) = send(
        app,
        Method::PUT,
        "/v2/service_instances/inst-9",
        Some(provision_body("weak")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["description"],
        "Service instance with the given ID already exists: serviceInstanceId=inst-9, serviceDefinitionId=caffeine-broker"
    );
}

#[tokio::test]
async fn test_provision_rejects_incomplete_body() {
    let (_server, app) = setup().await;

    let (status, _) = send(
        app,
        Method::PUT,
        "/v2/service_instances/inst-1",
        Some(json!({"service_id": "caffeine-broker"})),
    )
    .await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_update_is_accepted() {
    let (server, app) = setup().await;

    let (status, body) = send(
        app,
        Method::PATCH,
        "/v2/service_instances/inst-1",
        Some(json!({"service_id": "caffeine-broker", "plan_id": "strong"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_last_operation_succeeded() {
    let (server, app) = setup().await;

    let (status, body) = send(
        app,
        Method::GET,
        "/v2/service_instances/never-created/last_operation",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"state": "succeeded"}));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ==================== Deprovisioning ====================

#[tokio::test]
async fn test_deprovision() {
    let (server, app) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/caffeine/inst-1"))
        .and(basic_auth("admin", "secret"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = send(
        app,
        Method::DELETE,
        "/v2/service_instances/inst-1?service_id=caffeine-broker&plan_id=weak",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_deprovision_backend_failure() {
    let (server, app) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/caffeine/inst-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let (status, body) = send(app, Method::DELETE, "/v2/service_instances/inst-1", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["description"], "Backend returned error: 500 - boom");
}

// ==================== Bindings ====================

#[tokio::test]
async fn test_bind_returns_credentials_with_uri() {
    let (server, app) = setup().await;

    Mock::given(method("POST"))
        .and(path("/credentials"))
        .and(query_param("service_id", "inst-1"))
        .and(query_param("username", "bind-1"))
        .and(basic_auth("admin", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"password": "p1"})))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = send(
        app,
        Method::PUT,
        "/v2/service_instances/inst-1/service_bindings/bind-1",
        Some(json!({
            "service_id": "caffeine-broker",
            "plan_id": "weak",
            "bind_resource": {"app_guid": "app-guid"}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "credentials": {
                "password": "p1",
                "uri": format!("{}/caffeine/inst-1", server.uri())
            }
        })
    );
}

#[tokio::test]
async fn test_bind_backend_failure() {
    let (server, app) = setup().await;

    Mock::given(method("POST"))
        .and(path("/credentials"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (status, _) = send(
        app,
        Method::PUT,
        "/v2/service_instances/inst-1/service_bindings/bind-1",
        Some(json!({"service_id": "caffeine-broker", "plan_id": "weak"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unbind() {
    let (server, app) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/credentials/inst-1/bind-1"))
        .and(basic_auth("admin", "secret"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = send(
        app,
        Method::DELETE,
        "/v2/service_instances/inst-1/service_bindings/bind-1?service_id=caffeine-broker&plan_id=weak",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

// ==================== Health ====================

#[tokio::test]
async fn test_health() {
    let (_server, app) = setup().await;

    let (status, body) = send(app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["broker_api_version"], "2.13");
}

// ==================== Metrics ====================

#[tokio::test]
async fn test_metrics_not_mounted_without_handle() {
    let (_server, app) = setup().await;

    let (status, _) = send_raw(app, Method::GET, "/metrics", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_count_operations_by_outcome() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = Arc::new(recorder.handle());
    let _guard = metrics::set_default_local_recorder(&recorder);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/caffeine"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;
    let app = router_for(&server.uri(), Some(handle));

    let (status, _) = send(
        app.clone(),
        Method::PUT,
        "/v2/service_instances/inst-1",
        Some(provision_body("weak")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(app.clone(), Method::GET, "/v2/catalog", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, text) = send_raw(app, Method::GET, "/metrics", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(text.contains(
        "caffeine_broker_operations_total{operation=\"provision\",outcome=\"failure\"} 1"
    ));
    assert!(text.contains(
        "caffeine_broker_operations_total{operation=\"catalog\",outcome=\"success\"} 1"
    ));
}
