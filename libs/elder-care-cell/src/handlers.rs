use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::auth::CurrentUser;
use shared_models::error::AppError;
use shared_utils::AppState;

use crate::models::{HealthRecordRequest, MedicationRequest};
use crate::services::{HealthRecordService, MedicationService};

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

// ==============================================================================
// HEALTH RECORDS
// ==============================================================================

#[axum::debug_handler]
pub async fn add_health_record(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<HealthRecordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let request = json_body(payload)?;
    let id = HealthRecordService::new(state.store.clone()).add(&user, request).await?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Health record saved", "recordId": id }))))
}

#[axum::debug_handler]
pub async fn list_health_records(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Value>>, AppError> {
    let records = HealthRecordService::new(state.store.clone()).list_for(&user).await?;
    Ok(Json(records))
}

// ==============================================================================
// MEDICATIONS
// ==============================================================================

#[axum::debug_handler]
pub async fn add_medication(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<MedicationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let request = json_body(payload)?;
    let id = MedicationService::new(state.store.clone()).add(&user, request).await?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Medication added", "medicationId": id }))))
}

#[axum::debug_handler]
pub async fn list_medications(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Value>>, AppError> {
    let medications = MedicationService::new(state.store.clone()).list_for(&user).await?;
    Ok(Json(medications))
}

#[axum::debug_handler]
pub async fn delete_medication(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(medication_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    MedicationService::new(state.store.clone())
        .delete(&user, &medication_id)
        .await?;

    Ok(Json(json!({ "message": "Medication deleted" })))
}
