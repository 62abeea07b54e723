use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header as header_matcher, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_utils::test_utils::{body_json, TestConfig};
use triage_cell::services::diet::UNCONFIGURED_DIET;
use triage_cell::triage_routes;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn symptom_check_recommends_specialist() {
    let (state, _store) = TestConfig::default().to_state();
    let app = triage_routes(state);

    let response = app
        .clone()
        .oneshot(post_json("/api/symptom-check", json!({"symptoms": "I have chest pain and palpitations"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"recommendation": "a Cardiologist", "specialty": "Cardiologist", "matches": 2})
    );

    let empty = app.oneshot(post_json("/api/symptom-check", json!({}))).await.unwrap();
    assert_eq!(body_json(empty).await["recommendation"], "a General Physician for a consultation");
}

#[tokio::test]
async fn diet_falls_back_when_ai_is_not_configured() {
    let (state, _store) = TestConfig::default().to_state();
    let app = triage_routes(state);

    let response = app
        .oneshot(post_json("/api/diet-recommendation", json!({"disease": "Diabetes"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["diet"], UNCONFIGURED_DIET);
}

#[tokio::test]
async fn diet_is_generated_by_the_ai_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header_matcher("Authorization", "Bearer test-llm-key"))
        .and(header_matcher("HTTP-Referer", "http://localhost:5000"))
        .and(header_matcher("X-Title", "MediSmart AI"))
        .and(body_partial_json(json!({"model": "test-model"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "  Eat more leafy greens.  "}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (state, _store) = TestConfig::default().with_llm(&server.uri()).to_state();
    let app = triage_routes(state);

    let response = app
        .oneshot(post_json(
            "/api/diet-recommendation",
            json!({"disease": "Hypertension", "notes": "low sodium preferred"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["diet"], "Eat more leafy greens.");

    let requests = server.received_requests().await.expect("recorded requests");
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = sent["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.contains("Hypertension"));
    assert!(prompt.contains("low sodium preferred"));
}

#[tokio::test]
async fn diet_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let (state, _store) = TestConfig::default().with_llm(&server.uri()).to_state();
    let app = triage_routes(state);

    let response = app
        .oneshot(post_json("/api/diet-recommendation", json!({"disease": "Hypertension"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn diet_requires_a_disease() {
    let (state, _store) = TestConfig::default().to_state();
    let app = triage_routes(state);

    let response = app
        .oneshot(post_json("/api/diet-recommendation", json!({"notes": "anything"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
