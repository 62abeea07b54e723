use reqwest::{header, Client};
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, TriageError};

/// `X-Title` sent with every completion request.
pub const APP_TITLE: &str = "MediSmart AI";

/// Client for an OpenAI-compatible chat-completions API.
pub struct LlmClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
    referer: String,
}

impl LlmClient {
    pub fn new(config: &AppConfig) -> Result<Self, TriageError> {
        if !config.is_llm_configured() {
            return Err(TriageError::NotConfigured);
        }

        Ok(Self {
            http_client: Client::new(),
            api_key: config.llm_api_key.clone(),
            base_url: config.llm_base_url.trim_end_matches('/').to_string(),
            model: config.llm_model.clone(),
            referer: config.app_base_url.clone(),
        })
    }

    /// Sends one system + user exchange and returns the reply text.
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, TriageError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage { role: "system".to_string(), content: system.to_string() },
                ChatMessage { role: "user".to_string(), content: prompt.to_string() },
            ],
            temperature: 0.5,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!("Requesting completion from {} with model {}", url, self.model);

        let response = self
            .http_client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", APP_TITLE)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("AI service error: {} - {}", status, message);
            return Err(TriageError::Api { status: status.as_u16(), message });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(TriageError::EmptyCompletion)
    }
}
