//! Application state: the shared text-generation client plus prompts and sampling parameters.
//!
//! Built once at startup and shared read-only across requests.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::{load_bot_config_from_env, BotConfig, GenerationParams, Prompts};
use crate::llm::{generator_from_env, TextGenerator};

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub prompts: Prompts,
    pub question: GenerationParams,
    pub evaluation: GenerationParams,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>, cfg: BotConfig) -> Self {
        Self {
            generator,
            prompts: cfg.prompts,
            question: cfg.question,
            evaluation: cfg.evaluation,
        }
    }

    /// Build state from env: load optional TOML config and construct the provider client.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Result<Self, String> {
        let cfg = load_bot_config_from_env();
        let generator = generator_from_env()?;
        info!(
            target: "interview_bot",
            provider = generator.provider(),
            question_max_tokens = cfg.question.max_tokens,
            question_temperature = cfg.question.temperature,
            evaluation_max_tokens = cfg.evaluation.max_tokens,
            evaluation_temperature = cfg.evaluation.temperature,
            "Application state ready"
        );
        Ok(Self::new(generator, cfg))
    }
}
