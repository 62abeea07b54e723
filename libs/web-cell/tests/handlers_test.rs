use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt;

use shared_config::AppConfig;
use shared_database::MemoryDocumentStore;
use shared_utils::test_utils::{body_text, TestConfig, TestUser};
use shared_utils::AppState;
use web_cell::web_routes;

fn state_with(config: AppConfig) -> AppState {
    AppState::new(config, Arc::new(MemoryDocumentStore::new())).unwrap()
}

async fn get(app: &Router, uri: &str, cookie: Option<String>) -> axum::response::Response {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    app.clone().oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
}

#[tokio::test]
async fn public_pages_render_with_their_scripts() {
    let (state, _store) = TestConfig::default().to_state();
    let app = web_routes(state);

    for (uri, script) in [
        ("/doctors", "doctor.js"),
        ("/contact", "contact.js"),
        ("/elder-ai", "elderly.js"),
        ("/nutri-ai", "nutriAI.js"),
        ("/symptom-checker", "symptom_checker.js"),
    ] {
        let response = get(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        assert!(body_text(response).await.contains(&format!("/static/{}", script)), "{}", uri);
    }

    let home = body_text(get(&app, "/", None).await).await;
    assert!(home.contains("MediSmart AI"));
}

#[tokio::test]
async fn member_pages_redirect_anonymous_visitors_to_login() {
    let (state, _store) = TestConfig::default().to_state();
    let app = web_routes(state);

    for uri in ["/appointments", "/consult-online", "/dashboard"] {
        let response = get(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }
}

#[tokio::test]
async fn dashboard_carries_the_user_role() {
    let (state, _store) = TestConfig::default().to_state();
    let config = state.config.clone();
    let app = web_routes(state);
    let doctor = TestUser::doctor("Meera Iyer");

    let response = get(&app, "/dashboard", Some(doctor.cookie(&config))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains(r#"data-user-role="Doctor""#));
    assert!(page.contains(r#"href="/logout""#));
}

#[tokio::test]
async fn static_assets_are_served_from_the_configured_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("style.css"), "body { margin: 0; }").unwrap();

    let mut config = TestConfig::default().to_app_config();
    config.static_dir = dir.path().to_string_lossy().into_owned();
    let app = web_routes(state_with(config));

    let response = get(&app, "/static/style.css", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "body { margin: 0; }");

    let missing = get(&app, "/static/missing.js", None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn doctors_page_offers_add_only_to_doctors() {
    let (state, _store) = TestConfig::default().to_state();
    let config = state.config.clone();
    let app = web_routes(state);

    let anonymous = body_text(get(&app, "/doctors", None).await).await;
    assert!(anonymous.contains(r#"data-domain="Cardiologist""#));
    assert!(anonymous.contains("view-doctors-btn"));
    assert!(!anonymous.contains(r#"class="add-doctor-btn""#));

    let patient = TestUser::patient("Ravi Kumar");
    let as_patient = body_text(get(&app, "/doctors", Some(patient.cookie(&config))).await).await;
    assert!(!as_patient.contains(r#"class="add-doctor-btn""#));

    let doctor = TestUser::doctor("Meera Iyer");
    let as_doctor = body_text(get(&app, "/doctors", Some(doctor.cookie(&config))).await).await;
    assert!(as_doctor.contains(r#"class="add-doctor-btn""#));
}

#[tokio::test]
async fn user_names_are_escaped_in_pages() {
    let (state, _store) = TestConfig::default().to_state();
    let config = state.config.clone();
    let app = web_routes(state);
    let patient = TestUser::patient("<b>Ravi</b>");

    let page = body_text(get(&app, "/contact", Some(patient.cookie(&config))).await).await;

    assert!(page.contains("&lt;b&gt;Ravi&lt;"));
    assert!(!page.contains("<b>Ravi</b>"));
}

#[tokio::test]
async fn shipped_scripts_are_served() {
    let mut config = TestConfig::default().to_app_config();
    config.static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../../static").to_string();
    let app = web_routes(state_with(config));

    let response = get(&app, "/static/appointment.js", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let script = body_text(response).await;
    assert!(script.contains("/api/appointments"));
    assert!(script.contains("status === 207"));

    let nutri = body_text(get(&app, "/static/nutriAI.js", None).await).await;
    assert!(nutri.contains("notes"));

    for asset in ["app.js", "style.css", "doctor.js", "elderly.js", "dashboard.js"] {
        let response = get(&app, &format!("/static/{}", asset), None).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", asset);
    }
}
