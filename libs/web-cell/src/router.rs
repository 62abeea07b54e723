use axum::{middleware, routing::get, Router};
use tower_http::services::ServeDir;
use tracing::debug;

use shared_utils::extractor::page_auth_middleware;
use shared_utils::AppState;

use crate::handlers;

pub fn web_routes(state: AppState) -> Router {
    debug!("Serving static assets from {}", state.config.static_dir);

    let public_pages = Router::new()
        .route("/", get(handlers::index))
        .route("/doctors", get(handlers::doctors))
        .route("/contact", get(handlers::contact))
        .route("/elder-ai", get(handlers::elder_ai))
        .route("/nutri-ai", get(handlers::nutri_ai))
        .route("/symptom-checker", get(handlers::symptom_checker));

    let member_pages = Router::new()
        .route("/appointments", get(handlers::appointments))
        .route("/consult-online", get(handlers::consult_online))
        .route("/dashboard", get(handlers::dashboard))
        .layer(middleware::from_fn_with_state(state.clone(), page_auth_middleware));

    Router::new()
        .merge(public_pages)
        .merge(member_pages)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .with_state(state)
}
