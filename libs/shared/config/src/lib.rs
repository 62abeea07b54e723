use std::env;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use tracing::warn;

pub const MEMORY_DATABASE_URL: &str = "memory://";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub database_api_key: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub mail_server: String,
    pub mail_port: u16,
    pub mail_username: String,
    pub mail_password: String,
    pub mail_sender: String,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub app_base_url: String,
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("DATABASE_URL not set, using in-memory document store");
                    MEMORY_DATABASE_URL.to_string()
                }),
            database_api_key: env::var("DATABASE_API_KEY").unwrap_or_default(),
            session_secret: env::var("SESSION_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SESSION_SECRET not set, sessions will not survive a restart");
                    random_secret()
                }),
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            mail_server: env::var("MAIL_SERVER")
                .unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            mail_port: env::var("MAIL_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            mail_username: env::var("MAIL_USERNAME")
                .unwrap_or_else(|_| {
                    warn!("MAIL_USERNAME not set, confirmation emails are disabled");
                    String::new()
                }),
            mail_password: env::var("MAIL_PASSWORD")
                .unwrap_or_else(|_| {
                    warn!("MAIL_PASSWORD not set, confirmation emails are disabled");
                    String::new()
                }),
            mail_sender: env::var("MAIL_DEFAULT_SENDER")
                .or_else(|_| env::var("MAIL_USERNAME"))
                .unwrap_or_default(),
            llm_api_key: env::var("OPENROUTER_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("OPENROUTER_API_KEY not set, AI features will be disabled");
                    String::new()
                }),
            llm_base_url: env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string()),
            llm_model: env::var("LLM_MODEL")
                .unwrap_or_else(|_| "mistralai/mistral-7b-instruct:free".to_string()),
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            static_dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| "static".to_string()),
        };

        if config.is_database_remote() && config.database_api_key.is_empty() {
            warn!("DATABASE_API_KEY not set for remote document store");
        }

        config
    }

    pub fn is_database_remote(&self) -> bool {
        self.database_url.starts_with("http://") || self.database_url.starts_with("https://")
    }

    pub fn is_mail_configured(&self) -> bool {
        !self.mail_server.is_empty()
            && !self.mail_username.is_empty()
            && !self.mail_password.is_empty()
            && !self.mail_sender.is_empty()
    }

    pub fn is_llm_configured(&self) -> bool {
        !self.llm_api_key.is_empty() && !self.llm_base_url.is_empty()
    }
}

fn random_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
