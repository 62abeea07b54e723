use std::sync::Arc;

use tera::Tera;

use shared_config::AppConfig;
use shared_database::DocumentStore;

use crate::mail::{self, MailTransport};
use crate::views;

/// Shared handles passed to every router: configuration, the document store
/// connection, the page templates and the outbound mail transport.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub views: Arc<Tera>,
    pub mail: Option<Arc<dyn MailTransport>>,
}

impl AppState {
    /// State without a mail transport; see [`AppState::with_mail`].
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> Result<Self, tera::Error> {
        Ok(Self {
            config: Arc::new(config),
            store,
            views: Arc::new(views::templates()?),
            mail: None,
        })
    }

    pub fn from_config(config: AppConfig) -> Result<Self, tera::Error> {
        let store = shared_database::connect(&config);
        let transport = mail::connect(&config);

        let state = Self::new(config, store)?;
        Ok(match transport {
            Some(transport) => state.with_mail(transport),
            None => state,
        })
    }

    pub fn with_mail(mut self, transport: Arc<dyn MailTransport>) -> Self {
        self.mail = Some(transport);
        self
    }
}
