use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use shared_database::{collections, DocumentStore, Filter};
use shared_models::auth::CurrentUser;

use crate::models::{public_profile, DoctorError};

pub struct DoctorService {
    store: Arc<dyn DocumentStore>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Value>, DoctorError> {
        debug!("Listing doctor directory");

        let docs = self.store.find(collections::DOCTORS, &Filter::new()).await?;
        Ok(docs.iter().map(public_profile).collect())
    }

    /// Stores a free-form profile submitted by a doctor. The profile is kept
    /// as sent; only `createdBy` and `createdAt` are added.
    pub async fn add_doctor(&self, user: &CurrentUser, profile: Value) -> Result<String, DoctorError> {
        if !user.is_doctor() {
            return Err(DoctorError::NotADoctor);
        }

        let Value::Object(mut profile) = profile else {
            return Err(DoctorError::InvalidProfile);
        };

        profile.remove("_id");
        profile.insert("createdBy".to_string(), Value::String(user.id.clone()));
        profile
            .entry("createdAt")
            .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));

        let doc = self.store.insert(collections::DOCTORS, Value::Object(profile)).await?;

        info!("Doctor profile {} added by {}", doc.id, user.id);
        Ok(doc.id)
    }
}
