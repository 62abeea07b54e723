use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::auth::CurrentUser;
use shared_models::error::AppError;
use shared_utils::extractor::MaybeUser;
use shared_utils::AppState;

use crate::models::{ConsultationRequest, ContactRequest};
use crate::services::{ConsultationService, ContactService};

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

#[axum::debug_handler]
pub async fn submit_contact(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let request = json_body(payload)?;

    let id = ContactService::new(state.store.clone())
        .submit(user.as_ref(), request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Your message has been received.", "contactId": id })),
    ))
}

#[axum::debug_handler]
pub async fn request_consultation(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<ConsultationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let request = json_body(payload)?;

    let id = ConsultationService::new(state.store.clone())
        .request(&user, request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Consultation booked successfully!", "consultationId": id })),
    ))
}

#[axum::debug_handler]
pub async fn list_consultations(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Value>>, AppError> {
    let consultations = ConsultationService::new(state.store.clone()).list_for(&user).await?;
    Ok(Json(consultations))
}
