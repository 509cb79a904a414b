pub mod client;
pub mod config;

pub use client::{ModelClient, OpenAiClient};
pub use config::ModelConfig;
