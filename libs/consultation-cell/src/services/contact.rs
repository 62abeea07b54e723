use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, info};

use shared_database::{collections, DocumentStore};
use shared_models::auth::CurrentUser;
use shared_utils::validation::{is_valid_email, required};

use crate::models::{ConsultationError, ContactRequest};

pub struct ContactService {
    store: Arc<dyn DocumentStore>,
}

impl ContactService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Stores a contact-form message. Messages from logged-in visitors carry
    /// their user id.
    pub async fn submit(
        &self,
        user: Option<&CurrentUser>,
        request: ContactRequest,
    ) -> Result<String, ConsultationError> {
        let name = required(request.name.as_deref(), "name")?;
        let email = required(request.email.as_deref(), "email")?;
        let subject = required(request.subject.as_deref(), "subject")?;
        let message = required(request.message.as_deref(), "message")?;

        if !is_valid_email(&email) {
            return Err(ConsultationError::Validation(format!("{} is not a valid email", email)));
        }

        debug!("Contact message from {} about '{}'", email, subject);

        let mut record = json!({
            "name": name,
            "email": email,
            "subject": subject,
            "message": message,
            "createdAt": Utc::now().to_rfc3339(),
        });
        if let Some(user) = user {
            record["userId"] = Value::String(user.id.clone());
        }

        let doc = self.store.insert(collections::CONTACTS, record).await?;
        info!("Contact message {} stored", doc.id);

        Ok(doc.id)
    }
}
