pub mod errors;
pub mod generate;
pub mod render;
pub mod state;

use crate::{model::ServiceInfo, opts::HttpOpts};

use std::time::Duration;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, Request, StatusCode, header},
    response::Html,
    routing::get,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_app(opts: &HttpOpts, state: state::AppState) -> anyhow::Result<Router> {
    let service_info = ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        model: state.generator.model_id().to_string(),
    };

    let allowed_origins = opts
        .origins
        .iter()
        .map(|v| v.parse::<HeaderValue>())
        .collect::<Result<Vec<HeaderValue>, _>>()?;

    Ok(Router::new()
        .route("/", get(|| async { Html(render::index_page()) }))
        .route(
            "/infoz",
            get(move || {
                let info = service_info.clone();
                async move { Json(info) }
            }),
        )
        .route("/healthz", get(|| async { StatusCode::OK }))
        .merge(generate::routes())
        .layer(
            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
                .max_age(Duration::from_secs(3600)),
        )
        .layer(
            tower::ServiceBuilder::new().layer(TraceLayer::new_for_http().make_span_with(
                |request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri()
                    )
                },
            )),
        )
        .with_state(state))
}
