use std::time::Duration;

use clap::Parser;
use inkwell_core::llm::{
    ModelConfig,
    config::{DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE},
};

#[derive(Debug, Clone, Parser)]
pub struct HttpOpts {
    /// Address/port for the HTTP listener
    #[arg(long, env = "INKWELL_HOST", default_value = "0.0.0.0:8000")]
    pub host: String,

    #[arg(
        long,
        value_delimiter = ';',
        default_value = "http://localhost:8000;http://127.0.0.1:8000",
        env = "INKWELL_CORS_ORIGINS"
    )]
    pub origins: Vec<String>,
}

#[derive(Clone, Debug, Parser)]
pub struct ModelOpts {
    /// API key for the model provider
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model identifier
    #[arg(long, env = "GROQ_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "INKWELL_MODEL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Deadline for one model call, in seconds
    #[arg(
        long,
        env = "INKWELL_MODEL_TIMEOUT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    #[arg(long, env = "INKWELL_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    #[arg(long, env = "INKWELL_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Do not request JSON mode from the provider
    #[arg(long, env = "INKWELL_NO_JSON_MODE")]
    pub no_json_mode: bool,
}

impl ModelOpts {
    pub fn to_config(&self) -> ModelConfig {
        ModelConfig {
            api_key: self.api_key.clone().filter(|key| !key.is_empty()),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: Duration::from_secs(self.timeout_secs),
            json_mode: !self.no_json_mode,
        }
    }
}
