//! CallConsole LLM Integration
//!
//! Call transcript summarization against Ollama or an OpenAI-compatible backend

mod client;
mod error;
mod llm_trait;
mod openai;
mod prompts;
mod schema;
mod summarize;
mod types;

pub use client::OllamaClient;
pub use error::{SummarizationError, SummarizationErrorKind};
pub use llm_trait::{BackendError, LlmBackend};
pub use openai::OpenAiClient;
pub use prompts::{call_summary_prompt, SUMMARIZER_PERSONA, SUMMARY_CUE};
pub use schema::{summary_output_schema, validate_summary_reply};
pub use summarize::{build_backend, CallSummarizer, DEFAULT_TIMEOUT};
pub use types::{SummaryRequest, SummaryResponse};

// Re-export so callers can cancel without depending on tokio-util directly
pub use tokio_util::sync::CancellationToken;
