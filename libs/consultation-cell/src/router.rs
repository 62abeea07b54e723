use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_utils::extractor::auth_middleware;
use shared_utils::AppState;

use crate::handlers;

pub fn consultation_routes(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/contact", post(handlers::submit_contact));

    let protected_routes = Router::new()
        .route(
            "/api/consultations",
            get(handlers::list_consultations).post(handlers::request_consultation),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
