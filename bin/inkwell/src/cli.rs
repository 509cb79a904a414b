pub use clap::{self, Parser};

use crate::opts::{HttpOpts, ModelOpts};

#[derive(Parser, Debug)]
#[clap(
    name = "inkwell",
    version,
    about,
    rename_all = "kebab-case",
    rename_all_env = "screaming-snake"
)]
pub struct Cli {
    /// Tokio worker threads (optional override)
    #[arg(long, env = "INKWELL_WORKER_THREADS", global = true)]
    pub worker_threads: Option<usize>,

    /// Emit logs as JSON lines
    #[arg(long, env = "INKWELL_LOG_JSON", global = true)]
    pub log_json: bool,

    /// Subcommands
    #[clap(subcommand)]
    pub subcommand: Commands,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        #[clap(flatten)]
        http: HttpOpts,

        #[clap(flatten)]
        model: ModelOpts,
    },
    /// Validate request parameters and print the compiled prompt
    Prompt {
        /// Request parameters as a JSON object
        #[arg(long)]
        params: String,
    },
}

impl Cli {
    pub fn create_runtime(
        worker_threads: Option<usize>,
    ) -> anyhow::Result<tokio::runtime::Runtime> {
        let mut builder = tokio::runtime::Builder::new_multi_thread();
        if let Some(n) = worker_threads {
            builder.worker_threads(n);
        }
        builder.enable_all().build().map_err(Into::into)
    }
}
