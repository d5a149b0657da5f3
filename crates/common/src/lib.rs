pub mod catalog;
pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use catalog::{available_ai_models, find_model, AiModel};
pub use config::{AppConfig, BackendKind};
pub use error::ConsoleError;
pub type Result<T> = std::result::Result<T, ConsoleError>;
