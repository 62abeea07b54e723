use axum::{
    extract::{Extension, State},
    response::Html,
};

use shared_models::auth::CurrentUser;
use shared_models::error::AppError;
use shared_utils::extractor::MaybeUser;
use shared_utils::views::{render, Context};
use shared_utils::AppState;

/// Specialties doctors file their profiles under, in display order.
pub const DOCTOR_DOMAINS: &[&str] = &[
    "Dermatologist",
    "Cardiologist",
    "Neurologist",
    "Orthopedic",
    "General Physician",
];

// Public pages

#[axum::debug_handler]
pub async fn index(State(state): State<AppState>, MaybeUser(user): MaybeUser) -> Result<Html<String>, AppError> {
    render(&state.views, "home.html", user.as_ref(), Context::new())
}

#[axum::debug_handler]
pub async fn doctors(State(state): State<AppState>, MaybeUser(user): MaybeUser) -> Result<Html<String>, AppError> {
    let mut context = Context::new();
    context.insert("domains", DOCTOR_DOMAINS);

    render(&state.views, "doctors.html", user.as_ref(), context)
}

#[axum::debug_handler]
pub async fn contact(State(state): State<AppState>, MaybeUser(user): MaybeUser) -> Result<Html<String>, AppError> {
    render(&state.views, "contact.html", user.as_ref(), Context::new())
}

#[axum::debug_handler]
pub async fn elder_ai(State(state): State<AppState>, MaybeUser(user): MaybeUser) -> Result<Html<String>, AppError> {
    render(&state.views, "elder_ai.html", user.as_ref(), Context::new())
}

#[axum::debug_handler]
pub async fn nutri_ai(State(state): State<AppState>, MaybeUser(user): MaybeUser) -> Result<Html<String>, AppError> {
    render(&state.views, "nutri_ai.html", user.as_ref(), Context::new())
}

#[axum::debug_handler]
pub async fn symptom_checker(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<Html<String>, AppError> {
    render(&state.views, "symptom_checker.html", user.as_ref(), Context::new())
}

// Login required

#[axum::debug_handler]
pub async fn appointments(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Html<String>, AppError> {
    render(&state.views, "appointments.html", Some(&user), Context::new())
}

#[axum::debug_handler]
pub async fn consult_online(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Html<String>, AppError> {
    render(&state.views, "consult_online.html", Some(&user), Context::new())
}

#[axum::debug_handler]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Html<String>, AppError> {
    render(&state.views, "dashboard.html", Some(&user), Context::new())
}
