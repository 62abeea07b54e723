use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::{debug, info};

use shared_database::{collections, DocumentStore, Filter};
use shared_models::auth::CurrentUser;
use shared_utils::validation::{optional, required};

use crate::models::{ElderCareError, HealthRecordRequest};

pub struct HealthRecordService {
    store: Arc<dyn DocumentStore>,
}

impl HealthRecordService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn add(&self, user: &CurrentUser, request: HealthRecordRequest) -> Result<String, ElderCareError> {
        let record_type = required(request.record_type.as_deref(), "recordType")?;
        let value = match request.value {
            Some(Value::String(s)) if !s.trim().is_empty() => Value::String(s.trim().to_string()),
            Some(v @ (Value::Number(_) | Value::Bool(_) | Value::Object(_) | Value::Array(_))) => v,
            _ => return Err(ElderCareError::Validation("value is required".to_string())),
        };

        let now = Utc::now();
        let recorded_at = match optional(request.recorded_at.as_deref()) {
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|_| ElderCareError::Validation("recordedAt must be an RFC 3339 timestamp".to_string()))?,
            None => now,
        };

        debug!("Recording {} for {}", record_type, user.id);

        let mut record = json!({
            "userId": user.id,
            "recordType": record_type,
            "value": value,
            "recordedAt": recorded_at.to_rfc3339(),
            "createdAt": now.to_rfc3339(),
        });
        if let Some(notes) = optional(request.notes.as_deref()) {
            record["notes"] = Value::String(notes);
        }

        let doc = self.store.insert(collections::HEALTH_RECORDS, record).await?;
        info!("Health record {} stored for {}", doc.id, user.id);

        Ok(doc.id)
    }

    /// The user's records, newest first.
    pub async fn list_for(&self, user: &CurrentUser) -> Result<Vec<Value>, ElderCareError> {
        let filter = Filter::new().eq("userId", user.id.clone());
        let mut docs = self.store.find(collections::HEALTH_RECORDS, &filter).await?;

        docs.sort_by_key(|doc| {
            Reverse(
                doc.get_str("createdAt")
                    .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
                    .map(|t| t.with_timezone(&Utc)),
            )
        });

        Ok(docs.iter().map(|doc| doc.to_json()).collect())
    }
}
