use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

use edge_gate::app::build_router;
use edge_gate::config::Config;
use edge_gate::services::gate::EdgeGate;
use edge_gate::services::settings::{InMemoryParameterStore, ParameterStoreProvider};
use edge_gate::state::AppState;

const SECRET_PARAM: &str = "/apps/cf-lambda-geo-auth/jwt-secret";
const AUTH_URL_PARAM: &str = "/apps/cf-lambda-geo-auth/auth-url";
const EXPECTED_LOCATION: &str =
    "https://example.com/hallo?cdn_resource=https%3A%2F%2Fd123.cf.net%2Ftest%3Ffoo%3Dbar";

fn token(secret: &str, exp_offset: i64, nbf_offset: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = json!({
        "user": "fakeuser",
        "exp": now + exp_offset,
        "nbf": now + nbf_offset,
    });
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn app(store: InMemoryParameterStore) -> Router {
    let state = AppState::new(
        EdgeGate::default(),
        Arc::new(ParameterStoreProvider::new(store)),
    );
    build_router(state, &Config::default())
}

fn full_store() -> InMemoryParameterStore {
    InMemoryParameterStore::new()
        .with(SECRET_PARAM, "secret")
        .with(AUTH_URL_PARAM, "https://example.com/hallo")
}

fn event(cookie: Option<String>) -> Value {
    let mut headers = json!({"host": [{"key": "Host", "value": "d123.cf.net"}]});
    if let Some(value) = cookie {
        headers["cookie"] = json!([{"key": "Cookie", "value": value}]);
    }
    json!({
        "Records": [{
            "cf": {
                "config": {"distributionId": "EXAMPLE"},
                "request": {
                    "uri": "/test",
                    "method": "GET",
                    "querystring": "foo=bar",
                    "headers": headers
                }
            }
        }]
    })
}

fn with_token(token: &str) -> Value {
    event(Some(format!(
        "mitlcdnauthjwt={token};AnotherOne=A; X-Experiment-Name=B"
    )))
}

async fn invoke(app: Router, body: &Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/invoke")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn redirect_body() -> Value {
    json!({
        "status": "302",
        "statusDescription": "Found",
        "headers": {
            "location": [{"key": "Location", "value": EXPECTED_LOCATION}]
        }
    })
}

#[tokio::test]
async fn valid_token_returns_original_request() {
    let ev = with_token(&token("secret", 60, -300));
    let (status, body) = invoke(app(full_store()), &ev).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ev["Records"][0]["cf"]["request"]);
}

#[tokio::test]
async fn missing_cookie_redirects_to_portal() {
    let (status, body) = invoke(app(full_store()), &event(None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, redirect_body());
}

#[tokio::test]
async fn expired_token_redirects_to_portal() {
    let ev = with_token(&token("secret", -600, -300));
    let (_, body) = invoke(app(full_store()), &ev).await;
    assert_eq!(body, redirect_body());
}

#[tokio::test]
async fn forged_token_redirects_to_portal() {
    let ev = with_token(&token("wrong_secret", 60, -300));
    let (_, body) = invoke(app(full_store()), &ev).await;
    assert_eq!(body, redirect_body());
}

#[tokio::test]
async fn missing_secret_fails_the_invocation() {
    let store = full_store();
    store.remove(SECRET_PARAM);

    let ev = with_token(&token("secret", 60, -300));
    let (status, body) = invoke(app(store), &ev).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "SETTINGS_UNAVAILABLE");
    assert!(body.get("status").is_none());
}

#[tokio::test]
async fn missing_auth_url_fails_the_invocation() {
    let store = full_store();
    store.remove(AUTH_URL_PARAM);

    let (status, body) = invoke(app(store), &event(None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "SETTINGS_UNAVAILABLE");
}

#[tokio::test]
async fn event_without_records_is_bad_request() {
    let (status, body) = invoke(app(full_store()), &json!({"Records": []})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_EVENT");
}

#[tokio::test]
async fn event_missing_required_field_is_bad_request() {
    let ev = json!({"Records": [{"cf": {"request": {"method": "GET"}}}]});
    let (status, body) = invoke(app(full_store()), &ev).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_EVENT");
}

#[tokio::test]
async fn non_json_body_is_bad_request() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/invoke")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let resp = app(full_store()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "INVALID_EVENT");
}

#[tokio::test]
async fn header_entry_without_key_still_decides() {
    let mut ev = event(None);
    ev["Records"][0]["cf"]["request"]["headers"]["host"] = json!([{"value": "d123.cf.net"}]);

    let (status, body) = invoke(app(full_store()), &ev).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, redirect_body());
}

#[tokio::test]
async fn pass_through_keeps_omitted_fields_omitted() {
    let t = token("secret", 60, -300);
    let request = json!({
        "uri": "/x",
        "method": "GET",
        "headers": {
            "host": [{"key": "Host", "value": "d123.cf.net"}],
            "cookie": [{"key": "Cookie", "value": format!("mitlcdnauthjwt={t}")}]
        }
    });
    let ev = json!({"Records": [{"cf": {"request": request.clone()}}]});

    let (status, body) = invoke(app(full_store()), &ev).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, request);
}

#[tokio::test]
async fn health_is_ok_without_settings() {
    let req = Request::builder()
        .uri("/api/v1/health")
        .body(Body::empty())
        .unwrap();

    let resp = app(InMemoryParameterStore::new())
        .oneshot(req)
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["cookie"], "mitlcdnauthjwt");
}

#[tokio::test]
async fn caller_request_id_is_echoed() {
    let req = Request::builder()
        .uri("/api/v1/health")
        .header("x-request-id", "edge-req-42")
        .body(Body::empty())
        .unwrap();

    let resp = app(full_store()).oneshot(req).await.unwrap();
    assert_eq!(resp.headers()["x-request-id"], "edge-req-42");
}
