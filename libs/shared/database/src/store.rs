use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document must be a JSON object")]
    NotAnObject,

    #[error("Duplicate document: {0}")]
    Conflict(String),

    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Store API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Store returned no rows for {0}")]
    EmptyResponse(String),

    #[error("Invalid store response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotAnObject => AppError::BadRequest("Document must be a JSON object".to_string()),
            StoreError::Conflict(msg) => AppError::Conflict(msg),
            other => AppError::Database(other.to_string()),
        }
    }
}

/// A stored record: the generated identifier plus the schema-less body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: Map<String, Value>,
}

impl Document {
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.body.get(field).and_then(Value::as_str)
    }

    /// The body with the identifier exposed as `_id`.
    pub fn to_json(&self) -> Value {
        let mut body = self.body.clone();
        body.insert("_id".to_string(), Value::String(self.id.clone()));
        Value::Object(body)
    }
}

/// Equality conditions on top-level fields, all of which must hold.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<String>) -> Self {
        self.conditions.push((field.to_string(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    pub fn matches(&self, body: &Map<String, Value>) -> bool {
        self.conditions.iter().all(|(field, expected)| match body.get(field) {
            Some(Value::String(actual)) => actual == expected,
            Some(Value::Null) | None => false,
            Some(other) => other.to_string() == *expected,
        })
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores `body` under a freshly generated identifier. Any `_id` supplied
    /// by the caller is discarded.
    async fn insert(&self, collection: &str, body: Value) -> Result<Document, StoreError>;

    /// Returns matching documents in insertion order.
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Returns whether a document was removed.
    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>, StoreError> {
        Ok(self.find(collection, filter).await?.into_iter().next())
    }
}

pub(crate) fn into_object(body: Value) -> Result<Map<String, Value>, StoreError> {
    match body {
        Value::Object(mut map) => {
            map.remove("_id");
            Ok(map)
        }
        _ => Err(StoreError::NotAnObject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn filter_matches_all_conditions() {
        let doc = body(json!({"doctorName": "Rao", "date": "2025-03-01", "time": "09:00"}));

        assert!(Filter::new().matches(&doc));
        assert!(Filter::new().eq("doctorName", "Rao").eq("date", "2025-03-01").matches(&doc));
        assert!(!Filter::new().eq("doctorName", "Rao").eq("date", "2025-03-02").matches(&doc));
        assert!(!Filter::new().eq("missing", "x").matches(&doc));
    }

    #[test]
    fn filter_compares_non_string_values_textually() {
        let doc = body(json!({"experience": 12, "active": true}));
        assert!(Filter::new().eq("experience", "12").matches(&doc));
        assert!(Filter::new().eq("active", "true").matches(&doc));
    }

    #[test]
    fn to_json_exposes_id() {
        let doc = Document { id: "abc".to_string(), body: body(json!({"name": "Ana"})) };
        assert_eq!(doc.to_json(), json!({"_id": "abc", "name": "Ana"}));
        assert_eq!(doc.get_str("name"), Some("Ana"));
    }

    #[test]
    fn into_object_strips_client_id() {
        let map = into_object(json!({"_id": "forged", "name": "Ana"})).unwrap();
        assert!(!map.contains_key("_id"));
        assert!(matches!(into_object(json!([1, 2])), Err(StoreError::NotAnObject)));
    }
}
