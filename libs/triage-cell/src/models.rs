use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SymptomCheckRequest {
    #[serde(default)]
    pub symptoms: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomCheckResponse {
    pub recommendation: String,
    pub specialty: String,
    pub matches: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DietRequest {
    pub disease: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DietResponse {
    pub diet: String,
}

// OpenAI-compatible chat completion payloads.

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("{0}")]
    Validation(String),

    #[error("AI service is not configured")]
    NotConfigured,

    #[error("AI request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("AI service error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("AI service returned no recommendation")]
    EmptyCompletion,
}

impl From<AppError> for TriageError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::ValidationError(msg) => TriageError::Validation(msg),
            other => TriageError::Validation(other.to_string()),
        }
    }
}

impl From<TriageError> for AppError {
    fn from(err: TriageError) -> Self {
        match err {
            TriageError::Validation(msg) => AppError::ValidationError(msg),
            TriageError::NotConfigured => AppError::Internal("AI service is not configured".to_string()),
            other => AppError::ExternalService(other.to_string()),
        }
    }
}
