use std::sync::Arc;

use axum::{body::Body, http::Response};
use serde_json::Value;
use uuid::Uuid;

use shared_config::{AppConfig, MEMORY_DATABASE_URL};
use shared_database::MemoryDocumentStore;
use shared_models::auth::{CurrentUser, Role};

use crate::mail::MailTransport;
use crate::session::{issue_token, SESSION_COOKIE};
use crate::state::AppState;

pub struct TestConfig {
    pub session_secret: String,
    pub database_url: String,
    pub mail: Option<Arc<dyn MailTransport>>,
    pub llm_base_url: String,
    pub llm_api_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            session_secret: "test-secret-key-for-session-signing-must-be-long-enough".to_string(),
            database_url: MEMORY_DATABASE_URL.to_string(),
            mail: None,
            llm_base_url: String::new(),
            llm_api_key: String::new(),
        }
    }
}

impl TestConfig {
    /// Turns mail on with `transport` standing in for the SMTP relay,
    /// typically a lettre `StubTransport`.
    pub fn with_mail<T: MailTransport + 'static>(mut self, transport: T) -> Self {
        self.mail = Some(Arc::new(transport));
        self
    }

    pub fn with_llm(mut self, llm_base_url: &str) -> Self {
        self.llm_base_url = llm_base_url.to_string();
        self.llm_api_key = "test-llm-key".to_string();
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        let mail_credential = |value: &str| {
            if self.mail.is_some() {
                value.to_string()
            } else {
                String::new()
            }
        };

        AppConfig {
            port: 0,
            database_url: self.database_url.clone(),
            database_api_key: String::new(),
            session_secret: self.session_secret.clone(),
            session_ttl_hours: 24,
            mail_server: "smtp.example.com".to_string(),
            mail_port: 587,
            mail_username: mail_credential("clinic@example.com"),
            mail_password: mail_credential("test-mail-password"),
            mail_sender: "clinic@example.com".to_string(),
            llm_api_key: self.llm_api_key.clone(),
            llm_base_url: self.llm_base_url.clone(),
            llm_model: "test-model".to_string(),
            app_base_url: "http://localhost:5000".to_string(),
            static_dir: "static".to_string(),
        }
    }

    /// State backed by a fresh in-memory store; the store handle is returned
    /// too so tests can seed and inspect it.
    pub fn to_state(&self) -> (AppState, Arc<MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::new());
        let state = AppState::new(self.to_app_config(), store.clone()).expect("page templates");

        let state = match &self.mail {
            Some(transport) => state.with_mail(transport.clone()),
            None => state,
        };
        (state, store)
    }
}

pub struct TestUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl TestUser {
    pub fn new(name: &str, email: &str, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
        }
    }

    pub fn patient(name: &str) -> Self {
        let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
        Self::new(name, &email, Role::Patient)
    }

    pub fn doctor(name: &str) -> Self {
        let email = format!("dr.{}@example.com", name.to_lowercase().replace(' ', "."));
        Self::new(name, &email, Role::Doctor)
    }

    pub fn to_user(&self) -> CurrentUser {
        CurrentUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            session_started_at: None,
        }
    }

    pub fn token(&self, config: &AppConfig) -> String {
        SessionTestUtils::create_token(self, &config.session_secret, 24)
    }

    /// `Cookie` header value carrying a valid session for this user.
    pub fn cookie(&self, config: &AppConfig) -> String {
        format!("{}={}", SESSION_COOKIE, self.token(config))
    }
}

pub struct SessionTestUtils;

impl SessionTestUtils {
    pub fn create_token(user: &TestUser, secret: &str, ttl_hours: i64) -> String {
        issue_token(&user.to_user(), secret, ttl_hours).expect("test token")
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_token(user, secret, -1)
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_token(user, "wrong-secret", 24)
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("JSON body")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    String::from_utf8_lossy(&bytes).into_owned()
}
