use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use consultation_cell::consultation_routes;
use shared_database::{collections, DocumentStore, Filter};
use shared_utils::test_utils::{body_json, TestConfig, TestUser};

fn json_request(method: &str, uri: &str, cookie: Option<String>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
    builder.body(body).unwrap()
}

fn contact() -> Value {
    json!({
        "name": "Anita",
        "email": "anita@example.com",
        "subject": "Opening hours",
        "message": "Are you open on Sundays?"
    })
}

#[tokio::test]
async fn contact_is_public_and_tags_logged_in_users() {
    let (state, store) = TestConfig::default().to_state();
    let config = state.config.clone();
    let app = consultation_routes(state);
    let user = TestUser::patient("Anita");

    let anonymous = app
        .clone()
        .oneshot(json_request("POST", "/api/contact", None, Some(contact())))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::CREATED);

    let known = app
        .oneshot(json_request("POST", "/api/contact", Some(user.cookie(&config)), Some(contact())))
        .await
        .unwrap();
    assert_eq!(known.status(), StatusCode::CREATED);

    let tagged = store
        .find(collections::CONTACTS, &Filter::new().eq("userId", user.id.clone()))
        .await
        .unwrap();
    assert_eq!(tagged.len(), 1);
    assert_eq!(store.count(collections::CONTACTS).await, 2);
}

#[tokio::test]
async fn incomplete_contact_is_bad_request() {
    let (state, store) = TestConfig::default().to_state();
    let app = consultation_routes(state);

    let response = app
        .oneshot(json_request("POST", "/api/contact", None, Some(json!({"name": "Anita"}))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "email is required");
    assert_eq!(store.count(collections::CONTACTS).await, 0);
}

#[tokio::test]
async fn consultations_are_created_and_listed_per_user() {
    let (state, _store) = TestConfig::default().to_state();
    let config = state.config.clone();
    let app = consultation_routes(state);
    let ravi = TestUser::patient("Ravi");
    let anita = TestUser::patient("Anita");

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/consultations",
            Some(ravi.cookie(&config)),
            Some(json!({
                "name": "Ravi",
                "disease": "Migraine",
                "doctor": {"name": "Dr. Meera Iyer", "specialization": "Neurologist"},
                "date": "2026-11-03",
                "time": "15:00"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    assert!(body_json(created).await["consultationId"].is_string());

    let list = |user: &TestUser| {
        let app = app.clone();
        let cookie = user.cookie(&config);
        async move {
            let response = app
                .oneshot(json_request("GET", "/api/consultations", Some(cookie), None))
                .await
                .unwrap();
            body_json(response).await
        }
    };

    let mine = list(&ravi).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["doctor"]["specialization"], "Neurologist");
    assert_eq!(mine[0]["patientId"], ravi.id.as_str());

    assert_eq!(list(&anita).await, json!([]));
}

#[tokio::test]
async fn consultations_require_a_session() {
    let (state, _store) = TestConfig::default().to_state();
    let app = consultation_routes(state);

    let response = app
        .oneshot(json_request("GET", "/api/consultations", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
