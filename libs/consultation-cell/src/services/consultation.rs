use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, info};

use shared_database::{collections, DocumentStore, Filter};
use shared_models::auth::CurrentUser;
use shared_utils::validation::{parse_date, parse_time, required};

use crate::models::{ConsultationError, ConsultationRequest};

fn has_content(doctor: &Value) -> bool {
    match doctor {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

pub struct ConsultationService {
    store: Arc<dyn DocumentStore>,
}

impl ConsultationService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn request(
        &self,
        user: &CurrentUser,
        request: ConsultationRequest,
    ) -> Result<String, ConsultationError> {
        let name = required(request.name.as_deref(), "name")?;
        let disease = required(request.disease.as_deref(), "disease")?;
        let doctor = request
            .doctor
            .filter(has_content)
            .ok_or_else(|| ConsultationError::Validation("doctor is required".to_string()))?;
        let date = parse_date(&required(request.date.as_deref(), "date")?, "date")?;
        let time = parse_time(&required(request.time.as_deref(), "time")?, "time")?;

        debug!("Consultation request from {} for {}", user.id, disease);

        let doc = self
            .store
            .insert(
                collections::CONSULTATIONS,
                json!({
                    "patientId": user.id,
                    "name": name,
                    "disease": disease,
                    "doctor": doctor,
                    "date": date.format("%Y-%m-%d").to_string(),
                    "time": time.format("%H:%M").to_string(),
                    "createdAt": Utc::now().to_rfc3339(),
                }),
            )
            .await?;

        info!("Consultation {} requested by {}", doc.id, user.id);
        Ok(doc.id)
    }

    pub async fn list_for(&self, user: &CurrentUser) -> Result<Vec<Value>, ConsultationError> {
        let filter = Filter::new().eq("patientId", user.id.clone());
        let docs = self.store.find(collections::CONSULTATIONS, &filter).await?;

        Ok(docs.iter().map(|doc| doc.to_json()).collect())
    }
}
