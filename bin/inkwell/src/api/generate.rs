use crate::api::{errors::Error, render, state::AppState};
use crate::model::{GenerateResponse, OptionsResponse};
use axum::{
    Form, Router,
    extract::{Json, State, rejection::JsonRejection},
    response::Html,
    routing::{get, post},
};
use inkwell_core::{GenerationError, RawParams, raw_params_from_json};
use serde_json::{Map, Value};
use tracing::instrument;

pub fn routes() -> Router<AppState> {
    Router::new()
        // form submission, answered with an HTML fragment
        .route("/generate", post(generate_form_handler))
        // JSON API
        .route("/api/generate", post(generate_json_handler))
        .route("/api/options", get(options_handler))
}

/// Generate from form fields. Errors are rendered into the fragment so the
/// page can swap them in place.
#[instrument(skip(state, form))]
pub async fn generate_form_handler(
    State(state): State<AppState>,
    Form(form): Form<RawParams>,
) -> Html<String> {
    match state.generator.generate_from_params(&form).await {
        Ok(result) => Html(render::result_fragment(&result)),
        Err(e) => Html(render::error_fragment(&e)),
    }
}

/// Generate from a JSON object of string fields.
#[instrument(skip(state, payload))]
pub async fn generate_json_handler(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<GenerateResponse>, Error> {
    let Json(body) = payload?;
    let raw = raw_params_from_json(&body).map_err(GenerationError::from)?;
    let result = state.generator.generate_from_params(&raw).await?;
    Ok(Json(GenerateResponse::from(&result)))
}

pub async fn options_handler() -> Json<OptionsResponse> {
    Json(OptionsResponse::collect())
}
