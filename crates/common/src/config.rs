use crate::catalog::find_model;
use crate::error::ConsoleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

/// Language-model backend flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Local Ollama server (`/api/generate`)
    Ollama,
    /// OpenAI-compatible chat completions API
    OpenAi,
}

impl BackendKind {
    /// Base URL used when `LLM_BASE_URL` is not set
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Ollama => DEFAULT_OLLAMA_URL,
            Self::OpenAi => DEFAULT_OPENAI_URL,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ollama => write!(f, "ollama"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAi),
            other => Err(ConsoleError::config(format!(
                "Unknown LLM backend '{}' (expected 'ollama' or 'openai')",
                other
            ))),
        }
    }
}

/// CallConsole application configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Which backend serves summaries
    pub llm_backend: BackendKind,

    /// Backend API base URL
    pub llm_base_url: String,

    /// Backend API key (required for OpenAI)
    #[serde(skip_serializing)]
    pub llm_api_key: Option<String>,

    /// Model name sent to the backend
    pub llm_model: String,

    /// Upper bound on a single summarization call, in seconds
    pub llm_timeout_secs: u64,

    /// Catalog id the console preselects
    pub default_ai_model: String,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

// Hand-written so the API key never ends up in logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("llm_backend", &self.llm_backend)
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_api_key", &self.llm_api_key.as_ref().map(|_| "***"))
            .field("llm_model", &self.llm_model)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("default_ai_model", &self.default_ai_model)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("log_dir", &self.log_dir)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm_backend: BackendKind::Ollama,
            llm_base_url: DEFAULT_OLLAMA_URL.to_string(),
            llm_api_key: None,
            llm_model: "llama3.2:latest".to_string(),
            llm_timeout_secs: 60,
            default_ai_model: "gemini-1.5-flash".to_string(),
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, ConsoleError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConsoleError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let llm_backend = match lookup("LLM_BACKEND") {
            Some(raw) => raw.parse()?,
            None => defaults.llm_backend,
        };

        let llm_timeout_secs = match lookup("LLM_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ConsoleError::config(format!("LLM_TIMEOUT_SECS must be a number, got '{}'", raw))
            })?,
            None => defaults.llm_timeout_secs,
        };

        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ConsoleError::config(format!("SERVER_PORT must be a port number, got '{}'", raw))
            })?,
            None => defaults.server_port,
        };

        Ok(Self {
            llm_backend,
            llm_base_url: lookup("LLM_BASE_URL")
                .unwrap_or_else(|| llm_backend.default_base_url().to_string()),
            llm_api_key: lookup("LLM_API_KEY").filter(|k| !k.trim().is_empty()),
            llm_model: lookup("LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_timeout_secs,
            default_ai_model: lookup("DEFAULT_AI_MODEL").unwrap_or(defaults.default_ai_model),
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            log_dir: lookup("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Bounded wait applied to every backend call
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConsoleError> {
        if !self.llm_base_url.starts_with("http://") && !self.llm_base_url.starts_with("https://") {
            return Err(ConsoleError::config(
                "LLM base URL must start with http:// or https://",
            ));
        }

        if self.llm_model.trim().is_empty() {
            return Err(ConsoleError::config("LLM model name cannot be empty"));
        }

        if self.llm_backend == BackendKind::OpenAi && self.llm_api_key.is_none() {
            return Err(ConsoleError::config("LLM_API_KEY is required for the openai backend"));
        }

        if self.llm_timeout_secs == 0 {
            return Err(ConsoleError::config("LLM timeout must be at least one second"));
        }

        if find_model(&self.default_ai_model).is_none() {
            return Err(ConsoleError::config(format!(
                "Default AI model '{}' is not in the catalog",
                self.default_ai_model
            )));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(ConsoleError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}
