use serde_json::{Map, Value};
use thiserror::Error;

use shared_database::{Document, StoreError};
use shared_models::error::AppError;

/// Fields stored alongside a submitted profile that the public listing hides.
pub const PRIVATE_FIELDS: &[&str] = &["createdBy"];

/// A directory entry as shown to visitors: the submitted profile without
/// its identifier or submitter.
pub fn public_profile(doc: &Document) -> Value {
    let profile: Map<String, Value> = doc
        .body
        .iter()
        .filter(|(key, _)| !PRIVATE_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Value::Object(profile)
}

#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("Only doctors can add doctor profiles")]
    NotADoctor,

    #[error("Doctor profile must be a JSON object")]
    InvalidProfile,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotADoctor => AppError::Forbidden("Only doctors can add doctor profiles".to_string()),
            DoctorError::InvalidProfile => AppError::BadRequest("Doctor profile must be a JSON object".to_string()),
            DoctorError::Store(store) => store.into(),
        }
    }
}
