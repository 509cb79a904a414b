use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerationError>;

pub const REASON_REQUIRED: &str = "required";
pub const REASON_NOT_ALLOWED: &str = "not in allowed set";
pub const REASON_NOT_STRING: &str = "must be a string";

/// A rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("invalid field `{field}`: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
    /// Legal values, filled in for categorical fields only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<&'static str>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
            allowed_values: Vec::new(),
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, REASON_REQUIRED)
    }

    pub fn not_allowed(field: impl Into<String>, allowed_values: Vec<&'static str>) -> Self {
        Self {
            field: field.into(),
            reason: REASON_NOT_ALLOWED.to_string(),
            allowed_values,
        }
    }

    pub fn too_long(field: impl Into<String>, max_chars: usize) -> Self {
        Self::new(field, format!("must be at most {max_chars} characters"))
    }
}

/// Terminal failure of one generation request.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("rate limited by provider")]
    RateLimited { retry_after: Option<Duration> },

    #[error("model call exceeded {0:?}")]
    Timeout(Duration),

    #[error("provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("unparseable model reply: {0}")]
    Parse(String),
}

impl GenerationError {
    /// Stable machine-readable tag for the failure.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Validation(_) => "validation_error",
            GenerationError::Transport(_) => "transport_error",
            GenerationError::Auth(_) => "auth_error",
            GenerationError::RateLimited { .. } => "rate_limited",
            GenerationError::Timeout(_) => "timeout",
            GenerationError::Provider { .. } => "provider_error",
            GenerationError::MalformedResponse(_) => "malformed_response",
            GenerationError::Parse(_) => "parse_error",
        }
    }

    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        GenerationError::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct() {
        let errors = [
            GenerationError::Validation(ValidationError::required("tone")),
            GenerationError::Transport("refused".into()),
            GenerationError::Auth("bad key".into()),
            GenerationError::RateLimited { retry_after: None },
            GenerationError::Timeout(Duration::from_secs(30)),
            GenerationError::Provider {
                status: 500,
                message: "boom".into(),
            },
            GenerationError::MalformedResponse("no choices".into()),
            GenerationError::Parse("no json".into()),
        ];
        let mut kinds: Vec<_> = errors.iter().map(GenerationError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_validation_error_serializes_without_empty_allowed_values() {
        let value = serde_json::to_value(ValidationError::required("key_points")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"field": "key_points", "reason": "required"})
        );
    }
}
