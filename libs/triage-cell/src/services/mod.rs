pub mod diet;
pub mod llm;
pub mod matcher;

pub use diet::DietService;
pub use llm::LlmClient;
pub use matcher::{check_symptoms, SymptomMatch};
