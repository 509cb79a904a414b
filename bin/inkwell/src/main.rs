pub mod api;
pub mod cli;
pub mod http;
pub mod model;
pub mod opts;

use anyhow::{Context, Result};
use inkwell_core::{compile, raw_params_from_json, validate};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, Parser};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.subcommand {
        Commands::Serve { http, model } => {
            let runtime = Cli::create_runtime(cli.worker_threads)?;
            runtime.block_on(async move { http::run(http, model).await })
        }
        Commands::Prompt { params } => {
            println!("{}", render_prompt(&params)?);
            Ok(())
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Compile the prompt for JSON-encoded parameters without calling a model.
fn render_prompt(params: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(params).context("--params is not valid JSON")?;
    let map = value
        .as_object()
        .context("--params must be a JSON object")?;
    let request = validate(&raw_params_from_json(map)?)?;
    Ok(compile(&request).to_text())
}
