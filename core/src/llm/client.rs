use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    StatusCode,
    header::{HeaderMap, RETRY_AFTER},
};
use serde_json::{Value, json};

use crate::error::{GenerationError, Result};
use crate::llm::config::ModelConfig;
use crate::prompt::CompiledPrompt;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Longest provider error body kept in an error message.
const ERROR_BODY_LIMIT: usize = 500;

/// A text-generation backend: compiled prompt in, raw reply text out.
///
/// Implementations classify their failures into the invocation kinds of
/// [`GenerationError`] and never retry on their own.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, prompt: &CompiledPrompt) -> Result<String>;

    fn model_id(&self) -> &str;
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint (Groq by
/// default). Holds one pooled `reqwest::Client` for the process.
pub struct OpenAiClient {
    config: ModelConfig,
    http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: ModelConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        Ok(Self { config, http })
    }

    fn payload(&self, prompt: &CompiledPrompt) -> Value {
        let mut payload = json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "system",
                    "content": prompt.system
                },
                {
                    "role": "user",
                    "content": prompt.user
                }
            ],
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens
        });
        if self.config.json_mode {
            payload["response_format"] = json!({ "type": "json_object" });
        }
        payload
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    async fn complete(&self, prompt: &CompiledPrompt) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| GenerationError::Auth("API key not configured".to_string()))?;

        let response = self
            .http
            .post(self.config.chat_completions_url())
            .bearer_auth(api_key)
            .json(&self.payload(prompt))
            .send()
            .await
            .map_err(|e| classify(e, self.config.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = retry_after(response.headers());
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, retry_after, &body));
        }

        let result: Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                GenerationError::MalformedResponse(e.to_string())
            } else {
                classify(e, self.config.timeout)
            }
        })?;

        message_content(&result)
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}

/// Connection failures, connect timeouts included, are transport errors.
/// Any other timeout is reported against the call deadline.
pub(crate) fn classify(err: reqwest::Error, deadline: Duration) -> GenerationError {
    if err.is_timeout() && !err.is_connect() {
        GenerationError::Timeout(deadline)
    } else {
        GenerationError::Transport(err.to_string())
    }
}

/// Map a non-success provider status to its error kind.
pub(crate) fn status_error(
    status: StatusCode,
    retry_after: Option<Duration>,
    body: &str,
) -> GenerationError {
    let message: String = body.chars().take(ERROR_BODY_LIMIT).collect();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationError::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited { retry_after },
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            GenerationError::Transport(format!("{status}: {message}"))
        }
        _ => GenerationError::Provider {
            status: status.as_u16(),
            message,
        },
    }
}

/// `Retry-After` in delta-seconds form; HTTP dates are ignored.
pub(crate) fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Pull `choices[0].message.content` out of a chat-completions envelope.
pub(crate) fn message_content(result: &Value) -> Result<String> {
    let content = result["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| {
            GenerationError::MalformedResponse("missing choices[0].message.content".to_string())
        })?;
    if content.trim().is_empty() {
        return Err(GenerationError::MalformedResponse(
            "empty message content".to_string(),
        ));
    }
    Ok(content.to_string())
}
