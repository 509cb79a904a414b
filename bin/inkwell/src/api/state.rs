use axum::extract::FromRef;
use inkwell_core::Generator;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub generator: Generator,
}

impl AppState {
    pub fn new(generator: Generator) -> Self {
        Self { generator }
    }
}
