//! Email drafting core: request validation, prompt compilation, model
//! invocation and reply parsing.

pub mod error;
pub mod generator;
pub mod helper_utils;
pub mod llm;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod validator;

pub use error::{GenerationError, ValidationError};
pub use generator::{Generator, generate};
pub use llm::{ModelClient, ModelConfig, OpenAiClient};
pub use model::{GenerationRequest, GenerationResult};
pub use parser::parse_reply;
pub use prompt::{CompiledPrompt, compile};
pub use validator::{RawParams, raw_params_from_json, validate};
