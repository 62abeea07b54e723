use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::auth::CurrentUser;
use shared_models::error::AppError;
use shared_utils::AppState;

use crate::models::{BookAppointmentRequest, ScheduleRequest, SlotSuggestion};
use crate::services::{BookingService, ScheduleService};

pub const BOOKED_MESSAGE: &str = "Appointment booked! A confirmation has been sent to your email.";
pub const BOOKED_WITHOUT_MAIL_MESSAGE: &str = "Appointment booked, but the confirmation email could not be sent.";

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<BookAppointmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let request = json_body(payload)?;

    let outcome = BookingService::new(&state).book(&user, request).await?;

    let (status, message) = if outcome.confirmation_sent {
        (StatusCode::CREATED, BOOKED_MESSAGE)
    } else {
        (StatusCode::MULTI_STATUS, BOOKED_WITHOUT_MAIL_MESSAGE)
    };

    Ok((
        status,
        Json(json!({
            "message": message,
            "appointmentId": outcome.appointment.id,
        })),
    ))
}

#[axum::debug_handler]
pub async fn my_appointments(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Value>>, AppError> {
    debug!("Listing appointments for {} ({})", user.id, user.role);

    let appointments = BookingService::new(&state).appointments_for(&user).await?;
    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    BookingService::new(&state).cancel(&user, &appointment_id).await?;

    Ok(Json(json!({ "message": "Appointment cancelled successfully" })))
}

#[axum::debug_handler]
pub async fn schedule_suggestions(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<Json<Vec<SlotSuggestion>>, AppError> {
    let request = json_body(payload)?;

    let suggestions = ScheduleService::new(state.store.clone()).suggestions(request).await?;
    Ok(Json(suggestions))
}
