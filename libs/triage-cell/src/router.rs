use axum::{routing::post, Router};

use shared_utils::AppState;

use crate::handlers;

pub fn triage_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/symptom-check", post(handlers::symptom_check))
        .route("/api/diet-recommendation", post(handlers::diet_recommendation))
        .with_state(state)
}
