use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use shared_database::StoreError;
use shared_models::error::AppError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// An online-consultation request. `doctor` is whatever the client picked
/// from the directory, usually the full doctor profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsultationRequest {
    pub name: Option<String>,
    pub disease: Option<String>,
    pub doctor: Option<Value>,
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(Error, Debug)]
pub enum ConsultationError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AppError> for ConsultationError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::ValidationError(msg) => ConsultationError::Validation(msg),
            other => ConsultationError::Validation(other.to_string()),
        }
    }
}

impl From<ConsultationError> for AppError {
    fn from(err: ConsultationError) -> Self {
        match err {
            ConsultationError::Validation(msg) => AppError::ValidationError(msg),
            ConsultationError::Store(store) => store.into(),
        }
    }
}
