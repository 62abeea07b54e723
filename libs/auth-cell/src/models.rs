use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::{Document, StoreError};
use shared_models::auth::{CurrentUser, Role};
use shared_models::error::AppError;

/// Fields of the signup form. Every field is optional at the extractor level
/// so that missing input is reported through validation, not a 422.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AuthPageQuery {
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl UserRecord {
    pub fn from_document(doc: &Document) -> Result<Self, AuthError> {
        let field = |name: &str| {
            doc.get_str(name)
                .map(str::to_string)
                .ok_or_else(|| AuthError::CorruptRecord(format!("user {} has no {}", doc.id, name)))
        };

        let role = field("role")?
            .parse::<Role>()
            .map_err(AuthError::CorruptRecord)?;

        Ok(Self {
            id: doc.id.clone(),
            name: field("name")?,
            email: field("email")?,
            role,
            password_hash: field("password")?,
        })
    }

    pub fn to_current_user(&self) -> CurrentUser {
        CurrentUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            session_started_at: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Invalid signup details: {0}")]
    InvalidInput(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Corrupt user record: {0}")]
    CorruptRecord(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailTaken => AppError::Conflict("An account with this email already exists".to_string()),
            AuthError::InvalidInput(msg) => AppError::ValidationError(msg),
            AuthError::InvalidCredentials => AppError::Auth("Invalid email or password".to_string()),
            AuthError::Store(store) => store.into(),
            other => AppError::Internal(other.to_string()),
        }
    }
}
