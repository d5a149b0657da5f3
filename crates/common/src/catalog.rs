//! Static catalog of language models the console can label calls with
//!
//! Reference data only: nothing here is sent to the summarization backend.

use serde::{Deserialize, Serialize};

/// Capability label used to decide whether a model can summarize calls
pub const SUMMARIZATION_CAPABILITY: &str = "Summarization";

/// Language model catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiModel {
    /// Stable identifier (e.g., "gpt-4o")
    pub id: String,

    /// Display name
    pub name: String,

    /// Vendor offering the model
    pub provider: String,

    /// Capability labels shown in the console
    pub capabilities: Vec<String>,
}

impl AiModel {
    fn new(id: &str, name: &str, provider: &str, capabilities: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            provider: provider.to_string(),
            capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Whether the model advertises call summarization
    pub fn supports_summarization(&self) -> bool {
        self.capabilities.iter().any(|c| c == SUMMARIZATION_CAPABILITY)
    }
}

/// Available language models
pub fn available_ai_models() -> Vec<AiModel> {
    vec![
        AiModel::new(
            "gemini-1.5-flash",
            "Gemini 1.5 Flash",
            "Google",
            &["Text Generation", "Summarization"],
        ),
        AiModel::new(
            "gpt-4o",
            "GPT-4o",
            "OpenAI",
            &["Text Generation", "Summarization", "Translation"],
        ),
        AiModel::new(
            "claude-3-opus",
            "Claude 3 Opus",
            "Anthropic",
            &["Text Generation", "Summarization", "Analysis"],
        ),
        AiModel::new(
            "deepseek-coder",
            "DeepSeek Coder",
            "DeepSeek",
            &["Code Generation", "Text Generation"],
        ),
    ]
}

/// Look up a catalog entry by id
pub fn find_model(id: &str) -> Option<AiModel> {
    available_ai_models().into_iter().find(|m| m.id == id)
}
