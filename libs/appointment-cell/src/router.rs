use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_utils::extractor::auth_middleware;
use shared_utils::AppState;

use crate::handlers;

pub fn appointment_routes(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/schedule-suggestions", post(handlers::schedule_suggestions));

    let protected_routes = Router::new()
        .route("/api/appointments", post(handlers::book_appointment))
        .route("/api/appointments/{appointment_id}/cancel", post(handlers::cancel_appointment))
        .route("/api/my-appointments", get(handlers::my_appointments))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
