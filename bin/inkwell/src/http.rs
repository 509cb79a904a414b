use crate::{api, opts::*};

use std::sync::Arc;

use inkwell_core::{Generator, OpenAiClient};
use tokio::net::TcpListener;

pub async fn run(http_opts: HttpOpts, model_opts: ModelOpts) -> anyhow::Result<()> {
    let config = model_opts.to_config();
    if config.api_key.is_none() {
        tracing::warn!("no API key configured, generation requests will fail with auth_error");
    }
    tracing::info!(model = %config.model, base_url = %config.base_url, timeout = ?config.timeout, "model client configured");

    let timeout = config.timeout;
    let client = OpenAiClient::new(config)?;
    let generator = Generator::new(Arc::new(client)).with_timeout(timeout);

    start_http(http_opts, api::state::AppState::new(generator)).await
}

pub async fn start_http(http_opts: HttpOpts, app_state: api::state::AppState) -> anyhow::Result<()> {
    tracing::info!("http listening on {}", http_opts.host);
    let app = api::build_app(&http_opts, app_state)?;
    let listener = TcpListener::bind(&http_opts.host).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
