use inkwell_core::{
    GenerationResult, ValidationError,
    model::{Audience, Industry, Language, Length, Purpose, ReplyType, Tone, Urgency},
    validator::allowed_values,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub subject: String,
    pub subject_variants: [String; 2],
    pub body: String,
    pub spam_score: u8,
    pub spam_warnings: Vec<String>,
    pub word_count: usize,
    pub read_time_seconds: u64,
    pub read_time_display: String,
}

impl From<&GenerationResult> for GenerateResponse {
    fn from(result: &GenerationResult) -> Self {
        Self {
            subject: result.subject().to_string(),
            subject_variants: result.subject_variants().clone(),
            body: result.body().to_string(),
            spam_score: result.spam_score(),
            spam_warnings: result.spam_warnings().to_vec(),
            word_count: result.word_count(),
            read_time_seconds: result.read_time_seconds(),
            read_time_display: result.read_time_display(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
    #[serde(flatten)]
    pub validation: Option<ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

/// Every enumerated set, keyed by input field name.
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub tone: Vec<&'static str>,
    pub length: Vec<&'static str>,
    pub purpose: Vec<&'static str>,
    pub language: Vec<&'static str>,
    pub audience: Vec<&'static str>,
    pub industry: Vec<&'static str>,
    pub urgency: Vec<&'static str>,
    pub reply_type: Vec<&'static str>,
}

impl OptionsResponse {
    pub fn collect() -> Self {
        Self {
            tone: allowed_values::<Tone>(),
            length: allowed_values::<Length>(),
            purpose: allowed_values::<Purpose>(),
            language: allowed_values::<Language>(),
            audience: allowed_values::<Audience>(),
            industry: allowed_values::<Industry>(),
            urgency: allowed_values::<Urgency>(),
            reply_type: allowed_values::<ReplyType>(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub model: String,
}
