pub mod memory;
pub mod rest;
pub mod store;

pub use memory::MemoryDocumentStore;
pub use rest::RestDocumentStore;
pub use store::{Document, DocumentStore, Filter, StoreError};

use std::sync::Arc;

use shared_config::AppConfig;

/// Collection names shared by every cell.
pub mod collections {
    pub const USERS: &str = "users";
    pub const DOCTORS: &str = "doctors";
    pub const APPOINTMENTS: &str = "appointments";
    pub const CONTACTS: &str = "contacts";
    pub const CONSULTATIONS: &str = "consultations";
    pub const HEALTH_RECORDS: &str = "health_records";
    pub const MEDICATIONS: &str = "medications";
}

/// Picks the store backing `DATABASE_URL`: an http(s) URL talks to the REST
/// document API, anything else keeps documents in process memory.
pub fn connect(config: &AppConfig) -> Arc<dyn DocumentStore> {
    if config.is_database_remote() {
        tracing::info!("Using REST document store at {}", config.database_url);
        Arc::new(RestDocumentStore::new(config))
    } else {
        tracing::info!("Using in-memory document store");
        Arc::new(MemoryDocumentStore::new())
    }
}
