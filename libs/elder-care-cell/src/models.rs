use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use shared_database::StoreError;
use shared_models::error::AppError;

/// A vital or observation logged by the user, e.g. a blood-pressure reading.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecordRequest {
    pub record_type: Option<String>,
    pub value: Option<Value>,
    pub notes: Option<String>,
    /// RFC 3339 timestamp; server time when absent.
    pub recorded_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedicationRequest {
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub time: Option<String>,
    pub notes: Option<String>,
}

#[derive(Error, Debug)]
pub enum ElderCareError {
    #[error("{0}")]
    Validation(String),

    #[error("Medication not found")]
    MedicationNotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AppError> for ElderCareError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::ValidationError(msg) => ElderCareError::Validation(msg),
            other => ElderCareError::Validation(other.to_string()),
        }
    }
}

impl From<ElderCareError> for AppError {
    fn from(err: ElderCareError) -> Self {
        match err {
            ElderCareError::Validation(msg) => AppError::ValidationError(msg),
            ElderCareError::MedicationNotFound => AppError::NotFound("Medication not found".to_string()),
            ElderCareError::Store(store) => store.into(),
        }
    }
}
