use std::{sync::Arc, time::Duration};

use tracing::{Instrument, debug, info, info_span, warn};

use crate::error::{GenerationError, Result};
use crate::llm::{ModelClient, config::DEFAULT_TIMEOUT};
use crate::model::{GenerationRequest, GenerationResult};
use crate::parser::parse_reply;
use crate::prompt::compile;
use crate::validator::{RawParams, validate};

/// Compile, invoke and parse one request.
///
/// The model call is the only suspension point and runs under `timeout`.
/// Dropping the returned future cancels the call.
pub async fn generate(
    request: &GenerationRequest,
    client: &dyn ModelClient,
    timeout: Duration,
) -> Result<GenerationResult> {
    let prompt = compile(request);
    debug!(
        purpose = %request.purpose(),
        prompt_chars = prompt.system.len() + prompt.user.len(),
        "prompt compiled"
    );

    let raw = tokio::time::timeout(timeout, client.complete(&prompt))
        .instrument(info_span!("model_call", model = client.model_id()))
        .await
        .map_err(|_| GenerationError::Timeout(timeout))??;

    parse_reply(&raw)
}

/// Request pipeline bound to a model client and a deadline.
///
/// Cheap to clone; clones share the client.
#[derive(Clone)]
pub struct Generator {
    client: Arc<dyn ModelClient>,
    timeout: Duration,
}

impl Generator {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model_id(&self) -> &str {
        self.client.model_id()
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let outcome = generate(request, self.client.as_ref(), self.timeout).await;
        match &outcome {
            Ok(result) => info!(
                spam_score = result.spam_score(),
                word_count = result.word_count(),
                "email generated"
            ),
            Err(e) => warn!(kind = e.kind(), error = %e, "generation failed"),
        }
        outcome
    }

    /// Validate raw parameters, then run [`Generator::generate`].
    pub async fn generate_from_params(&self, raw: &RawParams) -> Result<GenerationResult> {
        let request = validate(raw).inspect_err(|e| {
            info!(field = %e.field, reason = %e.reason, "request rejected");
        })?;
        self.generate(&request).await
    }
}
