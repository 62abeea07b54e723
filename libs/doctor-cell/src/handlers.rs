use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::auth::CurrentUser;
use shared_models::error::AppError;
use shared_utils::AppState;

use crate::services::DoctorService;

#[axum::debug_handler]
pub async fn list_doctors(State(state): State<AppState>) -> Result<Json<Vec<Value>>, AppError> {
    let doctors = DoctorService::new(state.store.clone()).list_doctors().await?;
    Ok(Json(doctors))
}

#[axum::debug_handler]
pub async fn add_doctor(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(profile) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    DoctorService::new(state.store.clone()).add_doctor(&user, profile).await?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Doctor added successfully!" }))))
}
