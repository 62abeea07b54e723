use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::error::AppError;
use shared_utils::mail::MailError;

// ==============================================================================
// APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentType {
    Online,
    Offline,
}

impl AppointmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Online => "Online",
            AppointmentType::Offline => "Offline",
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentType {
    type Err = AppointmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(AppointmentType::Online),
            "offline" => Ok(AppointmentType::Offline),
            _ => Err(AppointmentError::Validation(
                "appointmentType must be Online or Offline".to_string(),
            )),
        }
    }
}

/// A stored appointment. `id` is empty until the store has assigned one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub patient_email: String,
    pub doctor_name: String,
    pub date: String,
    pub time: String,
    pub appointment_type: AppointmentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital_location: Option<String>,
    pub created_at: String,
}

impl Appointment {
    /// Hospital line for offline visits, when any location detail was given.
    pub fn location(&self) -> Option<String> {
        if self.appointment_type != AppointmentType::Offline {
            return None;
        }

        match (self.hospital_name.as_deref(), self.hospital_location.as_deref()) {
            (Some(name), Some(place)) => Some(format!("{}, {}", name, place)),
            (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
            (None, None) => None,
        }
    }
}

// ==============================================================================
// REQUEST / RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub doctor_name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub appointment_type: Option<String>,
    pub additional_notes: Option<String>,
    pub hospital_name: Option<String>,
    pub hospital_location: Option<String>,
}

#[derive(Debug)]
pub struct BookingOutcome {
    pub appointment: Appointment,
    pub confirmation_sent: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub doctor_name: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Optimal,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSuggestion {
    pub time: String,
    pub status: SlotStatus,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("Confirmation document error: {0}")]
    Confirmation(String),

    #[error(transparent)]
    Mail(#[from] MailError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Carries a field-validation failure into the appointment error.
pub(crate) fn validation(err: AppError) -> AppointmentError {
    match err {
        AppError::ValidationError(msg) => AppointmentError::Validation(msg),
        other => AppointmentError::Validation(other.to_string()),
    }
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
            AppointmentError::Unauthorized => AppError::Forbidden("Unauthorized".to_string()),
            AppointmentError::Validation(msg) => AppError::ValidationError(msg),
            AppointmentError::Confirmation(msg) => AppError::Internal(msg),
            AppointmentError::Mail(mail) => AppError::ExternalService(mail.to_string()),
            AppointmentError::Serialization(e) => AppError::Internal(e.to_string()),
            AppointmentError::Store(store) => store.into(),
        }
    }
}
