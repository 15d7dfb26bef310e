//! Core library for the booking intake service: validation, the JSON
//! collection store, and the HTTP routes built on top of them.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
pub mod validation;

pub use config::{AppConfig, LegacyEnv};
pub use error::{AppError, Result};
pub use handlers::{create_admin_routes, create_routes};
pub use middleware::admin::AdminGate;
pub use models::{Booking, BookingRequest, Contact, ContactRequest};
pub use services::IntakeService;
pub use store::{Collection, CollectionStore, Record, RemoveOutcome, StoreError};

use axum::Router;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::services::ServeDir;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub intake: IntakeService,
    pub admin: AdminGate,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_store(
            CollectionStore::new(config.storage.data_dir.clone()),
            config.admin.password.as_str(),
        )
    }

    pub fn with_store(store: CollectionStore, admin_password: &str) -> Self {
        Self {
            app_name: "Booking Intake Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            intake: IntakeService::new(store),
            admin: AdminGate::new(admin_password),
        }
    }
}

pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        .merge(create_routes())
        .merge(create_admin_routes(state.clone()))
        .fallback_service(ServeDir::new(&config.server.public_dir))
        .layer(middleware::cors::cors_layer_from_config(&config.cors));

    middleware::logging::with_request_logging(router).with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> std::io::Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
