use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::rejection::FormRejection,
    http::StatusCode,
    routing::{get, post},
};
use cardio_app::{Application, domain::variant::FormVariant};
use log::info;
use serde::Deserialize;
use tower_http::limit::RequestBodyLimitLayer;

mod api;
mod feedback;
mod form;
mod health;
mod predict;

/// Upper bound for any request body; the largest legitimate one is a
/// feedback message.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug, Default)]
pub struct PageSettings {
    pub default_variant: FormVariant,
    pub footer_credit: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
    pub settings: Arc<PageSettings>,
}

#[derive(Deserialize, Default)]
pub struct VariantQuery {
    variant: Option<String>,
}

impl VariantQuery {
    /// Unknown or missing names fall back to the configured default.
    pub(crate) fn resolve(&self, settings: &PageSettings) -> FormVariant {
        self.variant
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or(settings.default_variant)
    }
}

/// Status for a form body that could not be decoded. Undecodable values are
/// invalid input like any other; an oversized body keeps its 413.
pub(crate) fn form_rejection_status(rejection: &FormRejection) -> StatusCode {
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    }
}

pub fn router(app: Arc<Application>, settings: PageSettings) -> Router {
    Router::new()
        .route("/", get(form::default_page))
        .route("/health", get(health::health))
        .route("/predict", post(predict::predict_form))
        .route("/feedback", post(feedback::send_feedback))
        .route("/api/v1/predict", post(api::predict_json))
        .route("/{variant}", get(form::variant_page))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(AppState {
            app,
            settings: Arc::new(settings),
        })
}

pub async fn run(
    app: Arc<Application>,
    settings: PageSettings,
    addr: SocketAddr,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let router = router(app, settings);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("HTTP server listening on {}", listener.local_addr()?);
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await?;

    info!("HTTP server shut down gracefully");
    Ok(())
}
