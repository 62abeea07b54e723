use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::debug;

use shared_models::error::AppError;
use shared_utils::AppState;

use crate::models::{DietRequest, DietResponse, SymptomCheckRequest, SymptomCheckResponse};
use crate::services::{check_symptoms, DietService};

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

#[axum::debug_handler]
pub async fn symptom_check(
    payload: Result<Json<SymptomCheckRequest>, JsonRejection>,
) -> Result<Json<SymptomCheckResponse>, AppError> {
    let request = json_body(payload)?;
    let result = check_symptoms(request.symptoms.as_deref().unwrap_or_default());

    debug!("Symptom check matched {} ({} hits)", result.specialty, result.matches);
    Ok(Json(result.into_response()))
}

#[axum::debug_handler]
pub async fn diet_recommendation(
    State(state): State<AppState>,
    payload: Result<Json<DietRequest>, JsonRejection>,
) -> Result<Json<DietResponse>, AppError> {
    let request = json_body(payload)?;

    let diet = DietService::new(state.config.clone()).recommend(request).await?;
    Ok(Json(DietResponse { diet }))
}
