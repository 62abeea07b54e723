use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use shared_database::{collections, DocumentStore, Filter};
use shared_models::auth::CurrentUser;
use shared_utils::validation::{optional, parse_time, required};

use crate::models::{ElderCareError, MedicationRequest};

pub struct MedicationService {
    store: Arc<dyn DocumentStore>,
}

impl MedicationService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn add(&self, user: &CurrentUser, request: MedicationRequest) -> Result<String, ElderCareError> {
        let name = required(request.name.as_deref(), "name")?;
        let time = parse_time(&required(request.time.as_deref(), "time")?, "time")?;

        let mut record = json!({
            "userId": user.id,
            "name": name,
            "time": time.format("%H:%M").to_string(),
            "createdAt": Utc::now().to_rfc3339(),
        });
        if let Some(dosage) = optional(request.dosage.as_deref()) {
            record["dosage"] = Value::String(dosage);
        }
        if let Some(notes) = optional(request.notes.as_deref()) {
            record["notes"] = Value::String(notes);
        }

        let doc = self.store.insert(collections::MEDICATIONS, record).await?;
        info!("Medication {} added for {}", doc.id, user.id);

        Ok(doc.id)
    }

    /// The user's medications in the order they are taken through the day.
    pub async fn list_for(&self, user: &CurrentUser) -> Result<Vec<Value>, ElderCareError> {
        let filter = Filter::new().eq("userId", user.id.clone());
        let mut docs = self.store.find(collections::MEDICATIONS, &filter).await?;

        docs.sort_by(|a, b| a.get_str("time").cmp(&b.get_str("time")));

        Ok(docs.iter().map(|doc| doc.to_json()).collect())
    }

    /// Deletes a medication the user owns. Unknown and foreign ids are
    /// reported the same way and leave the store untouched.
    pub async fn delete(&self, user: &CurrentUser, medication_id: &str) -> Result<(), ElderCareError> {
        let owned = self
            .store
            .find_by_id(collections::MEDICATIONS, medication_id)
            .await?
            .is_some_and(|doc| doc.get_str("userId") == Some(user.id.as_str()));

        if !owned {
            warn!("User {} cannot delete medication {}", user.id, medication_id);
            return Err(ElderCareError::MedicationNotFound);
        }

        if !self.store.delete_by_id(collections::MEDICATIONS, medication_id).await? {
            return Err(ElderCareError::MedicationNotFound);
        }

        debug!("Medication {} deleted by {}", medication_id, user.id);
        Ok(())
    }
}
