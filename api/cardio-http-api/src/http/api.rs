use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use cardio_app::domain::{
    prediction::DiagnosisClass,
    vitals::{FEATURE_COUNT, VitalsInput},
};
use log::warn;
use serde::Serialize;

use crate::{
    error::{ServiceError, ServiceResult},
    http::{AppState, VariantQuery},
};

#[derive(Serialize)]
pub struct JsonPredictionResponse {
    prediction: u8,
    class: DiagnosisClass,
    probability: [f64; 2],
    percent: String,
    features: [f64; FEATURE_COUNT],
}

pub async fn predict_json(
    State(state): State<AppState>,
    Query(query): Query<VariantQuery>,
    input: Result<Json<VitalsInput>, JsonRejection>,
) -> ServiceResult<Json<JsonPredictionResponse>> {
    let Json(input) = input.map_err(|rejection| {
        warn!("Rejected prediction body: {}", rejection.body_text());
        ServiceError::from(rejection)
    })?;
    let variant = query.resolve(&state.settings);
    let vitals = input.into_vitals(variant)?;
    let report = state.app.predict_use_case.predict(&vitals).await?;
    let prediction = report.prediction;
    Ok(Json(JsonPredictionResponse {
        prediction: prediction.class.label(),
        class: prediction.class,
        probability: [
            prediction.probabilities.negative,
            prediction.probabilities.positive,
        ],
        percent: prediction.confidence_percent(),
        features: report.features.0,
    }))
}
