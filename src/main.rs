use std::{process::ExitCode, sync::Arc};

use cardio_app::build_application;
use cardio_email_lettre::LettreEmailAdapter;
use cardio_http_api::PageSettings;
use cardio_model_json::JsonModelClassifier;
use cardio_secrets_env::EnvSecrets;
use log::{error, info, warn};

mod config;
mod logs;

use config::AppConfig;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logs::init_logger(config.log.as_ref()) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("Failed to load .env file: {}", e);
        }
    }

    let listen_addr = match config.resolve_listen_addr().await {
        Ok(addr) => addr,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let classifier = match JsonModelClassifier::load(&config.model_path) {
        Ok(classifier) => Arc::new(classifier),
        Err(e) => {
            error!("Cannot start without the classifier: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let secrets = Arc::new(EnvSecrets::new());
    let email_adapter = Arc::new(LettreEmailAdapter::new(
        config.smtp_host.clone(),
        config.smtp_port,
    ));

    let app = Arc::new(build_application(classifier, secrets, email_adapter));

    let settings = PageSettings {
        default_variant: config.default_variant,
        footer_credit: config.footer_credit.clone(),
    };

    info!(
        "Starting application ({} form by default)",
        config.default_variant
    );

    match cardio_http_api::run(app, settings, listen_addr, shutdown_signal()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("HTTP server failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
