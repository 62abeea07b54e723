use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

use doctor_cell::doctor_routes;
use shared_database::collections;
use shared_utils::test_utils::{body_json, TestConfig, TestUser};

fn post_doctor(cookie: Option<String>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/doctors")
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn doctor_can_add_profile_and_everyone_can_list_it() {
    let (state, _store) = TestConfig::default().to_state();
    let config = state.config.clone();
    let app = doctor_routes(state);
    let doctor = TestUser::doctor("Meera Iyer");

    let response = app
        .clone()
        .oneshot(post_doctor(
            Some(doctor.cookie(&config)),
            r#"{"name": "Dr. Meera Iyer", "specialty": "Neurologist", "hospital": "City Care"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["message"], "Doctor added successfully!");

    let listed = app
        .oneshot(Request::builder().uri("/api/doctors").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(listed.status(), StatusCode::OK);
    let body = body_json(listed).await;
    let doctors = body.as_array().expect("array of doctors");
    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0]["specialty"], "Neurologist");
    assert!(doctors[0].get("_id").is_none());
    assert!(doctors[0].get("createdBy").is_none());
}

#[tokio::test]
async fn patient_is_forbidden_from_adding_profiles() {
    let (state, store) = TestConfig::default().to_state();
    let config = state.config.clone();
    let app = doctor_routes(state);

    let response = app
        .oneshot(post_doctor(Some(TestUser::patient("Ravi").cookie(&config)), r#"{"name": "Dr. Fake"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(store.count(collections::DOCTORS).await, 0);
}

#[tokio::test]
async fn non_object_or_malformed_body_is_bad_request() {
    let (state, _store) = TestConfig::default().to_state();
    let config = state.config.clone();
    let app = doctor_routes(state);
    let doctor = TestUser::doctor("Meera Iyer");

    for body in [r#"["Dr. Who"]"#, "\"just a string\"", "{not json"] {
        let response = app
            .clone()
            .oneshot(post_doctor(Some(doctor.cookie(&config)), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
    }
}

#[tokio::test]
async fn adding_requires_a_session() {
    let (state, _store) = TestConfig::default().to_state();
    let app = doctor_routes(state);

    let response = app.oneshot(post_doctor(None, r#"{"name": "Dr. Who"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
