use serde::Deserialize;

use crate::error::{GenerationError, Result};
use crate::helper_utils::json::extract_json_object;
use crate::model::GenerationResult;

pub const SPAM_SCORE_MAX: i64 = 100;
/// Longest reply accepted for parsing.
pub const MAX_REPLY_BYTES: usize = 64 * 1024;

/// Reply shape requested by the output contract. Extra keys are ignored.
#[derive(Debug, Deserialize)]
struct ModelReply {
    subject: String,
    subject_variants: Vec<String>,
    body: String,
    spam_score: i64,
    spam_warnings: Vec<String>,
}

/// Parse raw model text into a [`GenerationResult`].
///
/// Out-of-range spam scores and wrong variant counts are rejected rather
/// than clamped or truncated.
pub fn parse_reply(raw: &str) -> Result<GenerationResult> {
    if raw.len() > MAX_REPLY_BYTES {
        return Err(GenerationError::parse(format!(
            "reply is {} bytes, limit is {MAX_REPLY_BYTES}",
            raw.len()
        )));
    }

    let span = extract_json_object(raw)
        .ok_or_else(|| GenerationError::parse("no JSON object found in model reply"))?;

    let reply: ModelReply = serde_json::from_str(span)
        .map_err(|e| GenerationError::parse(format!("reply does not match schema: {e}")))?;

    if reply.subject.trim().is_empty() {
        return Err(GenerationError::parse("`subject` is empty"));
    }
    if reply.body.trim().is_empty() {
        return Err(GenerationError::parse("`body` is empty"));
    }
    if !(0..=SPAM_SCORE_MAX).contains(&reply.spam_score) {
        return Err(GenerationError::parse(format!(
            "`spam_score` {} outside 0..={SPAM_SCORE_MAX}",
            reply.spam_score
        )));
    }

    let count = reply.subject_variants.len();
    let subject_variants: [String; 2] = reply.subject_variants.try_into().map_err(|_| {
        GenerationError::parse(format!(
            "`subject_variants` must have exactly 2 entries, got {count}"
        ))
    })?;
    if subject_variants.iter().any(|v| v.trim().is_empty()) {
        return Err(GenerationError::parse("`subject_variants` contains an empty entry"));
    }

    Ok(GenerationResult {
        subject: reply.subject,
        subject_variants,
        body: reply.body,
        spam_score: reply.spam_score as u8,
        spam_warnings: reply.spam_warnings,
    })
}
