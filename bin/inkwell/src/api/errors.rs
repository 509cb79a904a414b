use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use inkwell_core::GenerationError;

use crate::model::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

/// HTTP status for each failure kind.
pub fn status_for(err: &GenerationError) -> StatusCode {
    match err {
        GenerationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GenerationError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        GenerationError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        GenerationError::Transport(_)
        | GenerationError::Auth(_)
        | GenerationError::Provider { .. }
        | GenerationError::MalformedResponse(_)
        | GenerationError::Parse(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Message shown to the person using the form.
pub fn user_message(err: &GenerationError) -> String {
    match err {
        GenerationError::Validation(v) => match v.reason.as_str() {
            inkwell_core::error::REASON_REQUIRED => format!("Please fill in `{}`.", v.field),
            _ => format!("`{}` {}.", v.field, v.reason),
        },
        GenerationError::Transport(_) | GenerationError::Provider { .. } => {
            "The writing service could not be reached. Please try again shortly.".to_string()
        }
        GenerationError::Auth(_) => {
            "The writing service is not configured correctly. Please contact the administrator."
                .to_string()
        }
        GenerationError::RateLimited { retry_after } => match retry_after {
            Some(wait) => format!(
                "Too many requests right now. Please try again in {} seconds.",
                wait.as_secs().max(1)
            ),
            None => "Too many requests right now. Please try again in a moment.".to_string(),
        },
        GenerationError::Timeout(_) => {
            "The writing service took too long to respond. Please try again.".to_string()
        }
        GenerationError::MalformedResponse(_) | GenerationError::Parse(_) => {
            "The draft came back in an unexpected format. Please try again.".to_string()
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidBody(rejection) => {
                let body = ErrorResponse {
                    error: "invalid_body",
                    message: rejection.body_text(),
                    validation: None,
                    retry_after_secs: None,
                };
                (rejection.status(), Json(body)).into_response()
            }
            Error::Generation(err) => {
                let retry_after_secs = match &err {
                    GenerationError::RateLimited { retry_after } => {
                        retry_after.map(|d| d.as_secs())
                    }
                    _ => None,
                };
                let body = ErrorResponse {
                    error: err.kind(),
                    message: user_message(&err),
                    retry_after_secs,
                    validation: match err {
                        GenerationError::Validation(ref v) => Some(v.clone()),
                        _ => None,
                    },
                };
                let mut response = (status_for(&err), Json(body)).into_response();
                if let Some(secs) = retry_after_secs {
                    response
                        .headers_mut()
                        .insert(RETRY_AFTER, HeaderValue::from(secs));
                }
                response
            }
        }
    }
}
