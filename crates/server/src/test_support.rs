use async_trait::async_trait;
use callconsole_common::AppConfig;
use callconsole_llm::{BackendError, CallSummarizer, LlmBackend};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::state::AppState;

/// Backend that always answers with the same reply
pub struct FixedBackend {
    reply: Result<Value, BackendError>,
    reachable: bool,
    pub calls: AtomicUsize,
}

impl FixedBackend {
    pub fn replying(reply: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply),
            reachable: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(error: BackendError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(error),
            reachable: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmBackend for FixedBackend {
    fn name(&self) -> &str {
        "fixed"
    }

    fn model(&self) -> &str {
        "fixed-model"
    }

    async fn generate(&self, _prompt: &str) -> Result<Value, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }

    async fn test_connection(&self) -> bool {
        self.reachable
    }
}

pub fn state_with(backend: Arc<FixedBackend>) -> Arc<AppState> {
    Arc::new(AppState::new(AppConfig::default(), CallSummarizer::new(backend)))
}
