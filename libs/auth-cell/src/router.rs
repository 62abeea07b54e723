use axum::{middleware, routing::get, Router};

use shared_utils::extractor::{auth_middleware, page_auth_middleware};
use shared_utils::AppState;

use crate::handlers;

pub fn auth_routes(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/signup", get(handlers::signup_page).post(handlers::signup))
        .route("/login", get(handlers::login_page).post(handlers::login));

    let page_routes = Router::new()
        .route("/logout", get(handlers::logout))
        .layer(middleware::from_fn_with_state(state.clone(), page_auth_middleware));

    let api_routes = Router::new()
        .route("/api/me", get(handlers::me))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(page_routes)
        .merge(api_routes)
        .with_state(state)
}
