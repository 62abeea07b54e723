use std::sync::Arc;

use tracing::{debug, info};

use shared_config::AppConfig;
use shared_utils::validation::{optional, required};

use crate::models::{DietRequest, TriageError};
use crate::services::llm::LlmClient;

pub const UNCONFIGURED_DIET: &str = "A general balanced diet (AI service not configured).";

const NUTRITIONIST_PROMPT: &str =
    "You are a clinical nutritionist. Answer with one short paragraph describing a diet plan.";

pub fn diet_prompt(disease: &str, notes: Option<&str>) -> String {
    match notes {
        Some(notes) => format!(
            "Suggest a concise diet for a patient with {}. Additional notes from the patient: {}",
            disease, notes
        ),
        None => format!("Suggest a concise diet for a patient with {}.", disease),
    }
}

pub struct DietService {
    config: Arc<AppConfig>,
}

impl DietService {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    /// Diet advice for the given condition. Without an AI key a fixed
    /// general recommendation is returned.
    pub async fn recommend(&self, request: DietRequest) -> Result<String, TriageError> {
        let disease = required(request.disease.as_deref(), "disease")?;
        let notes = optional(request.notes.as_deref());

        if !self.config.is_llm_configured() {
            debug!("AI service not configured, returning general diet");
            return Ok(UNCONFIGURED_DIET.to_string());
        }

        let client = LlmClient::new(&self.config)?;
        let diet = client
            .complete(NUTRITIONIST_PROMPT, &diet_prompt(&disease, notes.as_deref()))
            .await?;

        info!("Diet recommendation generated for {}", disease);
        Ok(diet)
    }
}
