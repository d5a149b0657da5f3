use callconsole_common::ConsoleError;
use std::fmt;
use std::time::Duration;

use crate::llm_trait::BackendError;

/// Longest backend error body kept in an error message
const MAX_BODY_CHARS: usize = 512;

/// Coarse failure category, safe to log and branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummarizationErrorKind {
    Validation,
    BackendUnavailable,
    BackendRejected,
    SchemaViolation,
    Timeout,
    Cancelled,
}

impl fmt::Display for SummarizationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::BackendUnavailable => "backend_unavailable",
            Self::BackendRejected => "backend_rejected",
            Self::SchemaViolation => "schema_violation",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Why a call summary could not be produced
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummarizationError {
    /// Transcript missing or empty; the backend was not called
    #[error("invalid summary request: {0}")]
    Validation(String),

    /// Backend unreachable or failing on its side
    #[error("language-model backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Backend refused the request (auth, quota, bad request)
    #[error("language-model backend rejected the request (HTTP {status}): {message}")]
    BackendRejected { status: u16, message: String },

    /// Backend replied with something other than `{ "summary": string }`
    #[error("backend reply violates the summary schema: {0}")]
    SchemaViolation(String),

    /// No reply within the bounded wait
    #[error("language-model backend did not respond within {0:?}")]
    Timeout(Duration),

    /// Caller withdrew the request
    #[error("summarization cancelled")]
    Cancelled,
}

impl SummarizationError {
    pub fn kind(&self) -> SummarizationErrorKind {
        match self {
            Self::Validation(_) => SummarizationErrorKind::Validation,
            Self::BackendUnavailable(_) => SummarizationErrorKind::BackendUnavailable,
            Self::BackendRejected { .. } => SummarizationErrorKind::BackendRejected,
            Self::SchemaViolation(_) => SummarizationErrorKind::SchemaViolation,
            Self::Timeout(_) => SummarizationErrorKind::Timeout,
            Self::Cancelled => SummarizationErrorKind::Cancelled,
        }
    }

    /// Normalize a transport failure; `waited` is the bound the caller applied
    pub fn from_backend(error: BackendError, waited: Duration) -> Self {
        match error {
            BackendError::Connection(msg) => Self::BackendUnavailable(msg),
            BackendError::Timeout => Self::Timeout(waited),
            BackendError::Decode(msg) => Self::SchemaViolation(msg),
            BackendError::Status { status, body } if status >= 500 => {
                Self::BackendUnavailable(format!("HTTP {}: {}", status, truncate(&body)))
            }
            BackendError::Status { status, body } => Self::BackendRejected {
                status,
                message: truncate(&body),
            },
        }
    }

    /// True when the transcript itself was the problem
    pub fn is_transcript_unavailable(&self) -> bool {
        self.kind() == SummarizationErrorKind::Validation
    }

    /// Message suitable for end users; never reveals the internal kind
    pub fn user_message(&self) -> &'static str {
        if self.is_transcript_unavailable() {
            "Transcript unavailable"
        } else {
            "Cannot generate summary"
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            SummarizationErrorKind::Validation => 400,
            SummarizationErrorKind::BackendRejected => 502,
            SummarizationErrorKind::SchemaViolation => 502,
            SummarizationErrorKind::BackendUnavailable => 503,
            SummarizationErrorKind::Timeout => 504,
            // nginx's "client closed request"
            SummarizationErrorKind::Cancelled => 499,
        }
    }
}

fn truncate(body: &str) -> String {
    if body.chars().count() <= MAX_BODY_CHARS {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX_BODY_CHARS).collect();
        format!("{}...", cut)
    }
}

impl From<SummarizationError> for ConsoleError {
    fn from(error: SummarizationError) -> Self {
        match error.kind() {
            SummarizationErrorKind::Validation => ConsoleError::invalid_input(error.to_string()),
            SummarizationErrorKind::BackendUnavailable => ConsoleError::network(error.to_string()),
            SummarizationErrorKind::Timeout => ConsoleError::timeout(error.to_string()),
            _ => ConsoleError::summarization(error.to_string()),
        }
    }
}
