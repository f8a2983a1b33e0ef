//! Loading bot configuration (prompt templates + generation parameters) from TOML.
//!
//! Every table and every key is optional; anything missing falls back to the
//! defaults of its own table (question: 100 tokens / 0.7, evaluation: 500 / 0.6).
//!
//! ```toml
//! [prompts]
//! question_template = "Give me a {difficulty} question about {topic}."
//!
//! [question]
//! temperature = 0.8
//!
//! [evaluation]
//! model = "command-r"
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, PartialEq)]
pub struct BotConfig {
  pub prompts: Prompts,
  pub question: GenerationParams,
  pub evaluation: GenerationParams,
}

/// On-disk shape: each key may be left out.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
  prompts: Prompts,
  question: ParamsOverride,
  evaluation: ParamsOverride,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ParamsOverride {
  max_tokens: Option<u32>,
  temperature: Option<f32>,
  model: Option<String>,
}

impl ParamsOverride {
  fn apply_to(self, base: GenerationParams) -> GenerationParams {
    GenerationParams {
      max_tokens: self.max_tokens.unwrap_or(base.max_tokens),
      temperature: self.temperature.unwrap_or(base.temperature),
      model: self.model.or(base.model),
    }
  }
}

/// Prompt templates. `{difficulty}` and `{topic}` are filled for questions,
/// `{answer}` for evaluations.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Prompts {
  pub question_template: String,
  pub evaluation_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      question_template: "Give me a {difficulty} coding interview question on the topic of {topic}. Keep the question under 80 words.".into(),
      evaluation_template: r#"
You are a senior technical interviewer evaluating a candidate's answer to a coding interview question.

Candidate's answer:
"""{answer}"""

Please evaluate the answer based on:
1. Correctness
2. Clarity
3. Efficiency
4. Completeness

Give helpful feedback and end with a score like:
**Score: X/10**

If the answer is invalid, say:
"This answer is not valid or relevant."
**Score: 0/10**
"#.into(),
    }
  }
}

/// Sampling parameters for one kind of model call.
/// `model = None` means "use the provider's configured model".
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationParams {
  pub max_tokens: u32,
  pub temperature: f32,
  pub model: Option<String>,
}

impl GenerationParams {
  pub fn question() -> Self {
    Self { max_tokens: 100, temperature: 0.7, model: None }
  }

  pub fn evaluation() -> Self {
    Self { max_tokens: 500, temperature: 0.6, model: None }
  }
}

impl Default for BotConfig {
  fn default() -> Self {
    Self {
      prompts: Prompts::default(),
      question: GenerationParams::question(),
      evaluation: GenerationParams::evaluation(),
    }
  }
}

impl BotConfig {
  pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
    let file = toml::from_str::<ConfigFile>(s)?;
    Ok(Self {
      prompts: file.prompts,
      question: file.question.apply_to(GenerationParams::question()),
      evaluation: file.evaluation.apply_to(GenerationParams::evaluation()),
    })
  }
}

/// Load `BotConfig` from BOT_CONFIG_PATH. Unset path, IO or parse errors all yield the defaults.
pub fn load_bot_config_from_env() -> BotConfig {
  match std::env::var("BOT_CONFIG_PATH") {
    Ok(path) => load_bot_config(Path::new(&path)),
    Err(_) => BotConfig::default(),
  }
}

pub fn load_bot_config(path: &Path) -> BotConfig {
  let path = path.display().to_string();
  match std::fs::read_to_string(&path) {
    Ok(s) => match BotConfig::from_toml_str(&s) {
      Ok(cfg) => {
        info!(target: "interview_bot", %path, "Loaded bot config (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "interview_bot", %path, error = %e, "Failed to parse TOML config; using defaults");
        BotConfig::default()
      }
    },
    Err(e) => {
      error!(target: "interview_bot", %path, error = %e, "Failed to read TOML config file; using defaults");
      BotConfig::default()
    }
  }
}
