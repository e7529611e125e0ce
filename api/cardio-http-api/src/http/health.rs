use axum::{Json, extract::State};
use serde::Serialize;

use crate::http::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    model: String,
    default_variant: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.app.predict_use_case.model_description(),
        default_variant: state.settings.default_variant.to_string(),
    })
}
