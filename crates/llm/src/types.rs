use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Summarization input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Full call transcript; missing or null in JSON reads as empty and fails validation
    #[serde(default, alias = "callTranscript", deserialize_with = "null_as_empty")]
    pub transcript: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SummaryRequest {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
        }
    }
}

/// Summarization result
///
/// Only built from a schema-valid backend reply, hence no public constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryResponse {
    summary: String,
}

impl SummaryResponse {
    pub(crate) fn new(summary: String) -> Self {
        Self { summary }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn into_summary(self) -> String {
        self.summary
    }
}

/// Ollama generate request
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GenerateRequest {
    /// Model name (e.g., "llama3.2", "gemma2")
    pub model: String,

    /// Prompt text
    pub prompt: String,

    /// Disable streaming
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    /// JSON schema the reply must follow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,

    /// Generation options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerateOptions>,
}

/// Generation options
#[derive(Debug, Clone, Serialize, Default)]
pub(crate) struct GenerateOptions {
    /// Temperature (0.0 - 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Top-p sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<i32>,
}

/// Ollama generate response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenerateResponse {
    /// Generated text (JSON when `format` was set)
    pub response: String,

    /// Whether generation is complete
    #[serde(default)]
    pub done: bool,
}

/// OpenAI chat message
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// OpenAI chat completion request
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,

    /// Set instead of `content` when the model declines
    #[serde(default)]
    pub refusal: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_accepts_console_field_name() {
        let req: SummaryRequest =
            serde_json::from_value(json!({ "callTranscript": "Caller: hi" })).unwrap();
        assert_eq!(req.transcript, "Caller: hi");

        let req: SummaryRequest = serde_json::from_value(json!({ "transcript": "AI: hello" })).unwrap();
        assert_eq!(req.transcript, "AI: hello");
    }

    #[test]
    fn test_missing_transcript_reads_as_empty() {
        let req: SummaryRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.transcript.is_empty());
    }

    #[test]
    fn test_null_transcript_reads_as_empty() {
        let req: SummaryRequest = serde_json::from_value(json!({ "transcript": null })).unwrap();
        assert!(req.transcript.is_empty());

        let req: SummaryRequest = serde_json::from_value(json!({ "callTranscript": null })).unwrap();
        assert!(req.transcript.is_empty());
    }

    #[test]
    fn test_non_string_transcript_is_rejected() {
        assert!(serde_json::from_value::<SummaryRequest>(json!({ "transcript": 42 })).is_err());
    }

    #[test]
    fn test_response_serializes_single_field() {
        let resp = SummaryResponse::new("Order delayed.".to_string());
        assert_eq!(serde_json::to_value(&resp).unwrap(), json!({ "summary": "Order delayed." }));
    }

    #[test]
    fn test_generate_request_skips_unset_fields() {
        let req = GenerateRequest {
            model: "llama3.2".to_string(),
            prompt: "p".to_string(),
            stream: Some(false),
            format: None,
            options: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("format").is_none());
        assert!(value.get("options").is_none());
        assert_eq!(value["stream"], false);
    }
}
