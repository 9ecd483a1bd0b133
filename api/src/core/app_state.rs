use std::sync::Arc;

use ai_llm_service::{OpenAiService, config::default_config::config_github_models};
use note_pipeline::ClinicalResources;
use tracing::{info, warn};

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Lexicon and policy corpus, shared by every request.
    pub resources: Arc<ClinicalResources>,
    /// Completion client; `None` when no token is configured.
    pub llm: Option<Arc<OpenAiService>>,
}

impl AppState {
    pub fn new(resources: ClinicalResources, llm: Option<OpenAiService>) -> Self {
        Self {
            resources: Arc::new(resources),
            llm: llm.map(Arc::new),
        }
    }

    /// Builds the standard resources and, if a token is set, the completion client.
    ///
    /// # Errors
    /// Invalid completion settings or broken built-in tables.
    pub fn from_env() -> Result<Self, AppError> {
        let resources = ClinicalResources::standard()?;

        let llm = match config_github_models()? {
            Some(cfg) => {
                info!(model = %cfg.model, endpoint = %cfg.endpoint, "AI summarization enabled");
                Some(OpenAiService::new(cfg)?)
            }
            None => {
                warn!("GITHUB_MODELS_TOKEN not set; AI summarization disabled");
                None
            }
        };

        Ok(Self::new(resources, llm))
    }

    pub fn ai_enabled(&self) -> bool {
        self.llm.is_some()
    }
}
