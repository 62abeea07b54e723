use axum::Router;

use appointment_cell::appointment_routes;
use auth_cell::auth_routes;
use consultation_cell::consultation_routes;
use doctor_cell::doctor_routes;
use elder_care_cell::elder_care_routes;
use shared_utils::AppState;
use triage_cell::triage_routes;
use web_cell::web_routes;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(web_routes(state.clone()))
        .merge(auth_routes(state.clone()))
        .merge(doctor_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(consultation_routes(state.clone()))
        .merge(elder_care_routes(state.clone()))
        .merge(triage_routes(state))
}
