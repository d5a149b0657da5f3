use callconsole_common::AppConfig;
use callconsole_llm::CallSummarizer;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Call summarizer; holds no per-request state
    pub summarizer: CallSummarizer,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig, summarizer: CallSummarizer) -> Self {
        Self { config, summarizer }
    }
}
