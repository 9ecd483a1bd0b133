//! Completion-service collaborator for the clinical documentation assistant.
//!
//! The crate exposes:
//! - [`config`]: env-driven [`LlmModelConfig`] and [`RetryPolicy`].
//! - [`completion`]: the [`CompletionClient`] trait used by the summarizer.
//! - [`services::open_ai_service::OpenAiService`]: OpenAI-compatible chat client
//!   with timeout and exponential backoff.
//! - [`error_handler`]: the unified [`AiLlmError`].
//! - [`telemetry`]: tracing layer helpers shared by the binary.

pub mod completion;
pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use completion::{CompletionClient, CompletionRequest};
pub use config::{llm_model_config::LlmModelConfig, retry_policy::RetryPolicy};
pub use error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind};
pub use services::open_ai_service::OpenAiService;
