use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use shared_database::{collections, DocumentStore, Filter};
use shared_models::auth::Role;
use shared_models::error::AppError;
use shared_utils::validation::{is_valid_email, required};

use crate::models::{AuthError, LoginForm, SignupForm, UserRecord};
use crate::services::password::PasswordService;

fn invalid(err: AppError) -> AuthError {
    match err {
        AppError::ValidationError(msg) => AuthError::InvalidInput(msg),
        other => AuthError::InvalidInput(other.to_string()),
    }
}

pub struct UserService {
    store: Arc<dyn DocumentStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError> {
        let filter = Filter::new().eq("email", Self::normalize_email(email));
        self.store
            .find_one(collections::USERS, &filter)
            .await?
            .map(|doc| UserRecord::from_document(&doc))
            .transpose()
    }

    /// Creates a user after checking the email is not already registered.
    pub async fn register(&self, form: SignupForm) -> Result<UserRecord, AuthError> {
        let name = required(form.name.as_deref(), "name").map_err(invalid)?;
        let email = Self::normalize_email(&required(form.email.as_deref(), "email").map_err(invalid)?);
        let password = form
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AuthError::InvalidInput("password is required".to_string()))?;
        let role = required(form.role.as_deref(), "role")
            .map_err(invalid)?
            .parse::<Role>()
            .map_err(AuthError::InvalidInput)?;

        if !is_valid_email(&email) {
            return Err(AuthError::InvalidInput(format!("{} is not a valid email", email)));
        }

        debug!("Registering {} as {}", email, role);

        if self.find_by_email(&email).await?.is_some() {
            warn!("Signup rejected, email already registered: {}", email);
            return Err(AuthError::EmailTaken);
        }

        let password_hash =
            PasswordService::hash_password(&password).map_err(|e| AuthError::Hashing(e.to_string()))?;

        let doc = self
            .store
            .insert(
                collections::USERS,
                json!({
                    "name": name,
                    "email": email,
                    "password": password_hash,
                    "role": role,
                    "createdAt": Utc::now().to_rfc3339(),
                }),
            )
            .await?;

        info!("User {} registered with role {}", doc.id, role);
        UserRecord::from_document(&doc)
    }

    /// Returns the user only when the password matches the stored hash.
    pub async fn authenticate(&self, form: LoginForm) -> Result<UserRecord, AuthError> {
        let (Some(email), Some(password)) = (form.email, form.password) else {
            return Err(AuthError::InvalidCredentials);
        };

        let Some(user) = self.find_by_email(&email).await? else {
            debug!("Login failed, unknown email: {}", email);
            return Err(AuthError::InvalidCredentials);
        };

        let matches = PasswordService::verify_password(&password, &user.password_hash)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        if !matches {
            debug!("Login failed, wrong password for: {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        info!("User {} logged in", user.id);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared_database::MemoryDocumentStore;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryDocumentStore::new()))
    }

    fn signup(email: &str) -> SignupForm {
        SignupForm {
            name: Some("Asha Rao".to_string()),
            email: Some(email.to_string()),
            password: Some("s3cret-pass".to_string()),
            role: Some("Patient".to_string()),
        }
    }

    #[tokio::test]
    async fn register_stores_hash_not_password() {
        let users = service();
        let user = users.register(signup("Asha@Example.com ")).await.unwrap();

        assert_eq!(user.email, "asha@example.com");
        assert_eq!(user.role, Role::Patient);
        assert_ne!(user.password_hash, "s3cret-pass");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let users = service();
        users.register(signup("asha@example.com")).await.unwrap();

        let second = users.register(signup("ASHA@example.com")).await;
        assert_matches!(second, Err(AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn invalid_role_or_email_is_rejected() {
        let users = service();

        let mut bad_role = signup("a@example.com");
        bad_role.role = Some("Admin".to_string());
        assert_matches!(users.register(bad_role).await, Err(AuthError::InvalidInput(_)));

        assert_matches!(users.register(signup("not-an-email")).await, Err(AuthError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn authenticate_checks_password() {
        let users = service();
        users.register(signup("asha@example.com")).await.unwrap();

        let ok = users
            .authenticate(LoginForm {
                email: Some("asha@example.com".to_string()),
                password: Some("s3cret-pass".to_string()),
            })
            .await;
        assert!(ok.is_ok());

        let wrong = users
            .authenticate(LoginForm {
                email: Some("asha@example.com".to_string()),
                password: Some("guess".to_string()),
            })
            .await;
        assert_matches!(wrong, Err(AuthError::InvalidCredentials));

        let unknown = users
            .authenticate(LoginForm {
                email: Some("nobody@example.com".to_string()),
                password: Some("s3cret-pass".to_string()),
            })
            .await;
        assert_matches!(unknown, Err(AuthError::InvalidCredentials));
    }
}
