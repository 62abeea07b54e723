use axum::{
    middleware,
    routing::{delete, get},
    Router,
};

use shared_utils::extractor::auth_middleware;
use shared_utils::AppState;

use crate::handlers;

pub fn elder_care_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/health-records",
            get(handlers::list_health_records).post(handlers::add_health_record),
        )
        .route(
            "/api/medications",
            get(handlers::list_medications).post(handlers::add_medication),
        )
        .route("/api/medications/{medication_id}", delete(handlers::delete_medication))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
