//! Disaster Risk Classifier
//!
//! Collects region attributes, derives engineered features, asks a
//! pre-trained classifier for a risk label and renders it on a map.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  DISASTER RISK CLASSIFIER                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────────────────────────────┐   │
//! │  │  Form /   │   │  InteractionController               │   │
//! │  │  JSON API ├──▶│  derive → predict → render → persist │   │
//! │  │  (Axum)   │   └───────┬──────────────────┬───────────┘   │
//! │  └───────────┘           ▼                  ▼               │
//! │                  ┌──────────────┐   ┌──────────────────┐    │
//! │                  │  Classifier  │   │  Map snapshot    │    │
//! │                  │ (ONNX / JSON)│   │  (HTML on disk)  │    │
//! │                  └──────────────┘   └──────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod constants;
mod controller;
mod error;
mod features;
mod handlers;
mod map;
mod model;
mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use controller::InteractionController;
use map::{MapRenderer, MapStore};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "disaster_risk=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("{} v{} starting...", constants::APP_NAME, constants::APP_VERSION);
    tracing::info!("Model: {}", config.model_path.display());
    tracing::info!("Map snapshot: {}", config.map_path.display());

    // Model is loaded exactly once; a failure halts the session
    let session = Session::start(&config);

    // Build application state
    let state = AppState {
        session: Arc::new(session),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Lifecycle of the loaded model
pub enum Session {
    Ready(Arc<InteractionController>),
    /// No usable model; every request gets this message and nothing is predicted
    Halted { reason: String },
}

impl Session {
    fn start(config: &config::Config) -> Self {
        match model::load(&config.model_path, &config.model_classes) {
            Ok(classifier) => {
                let renderer = MapRenderer::new(MapStore::new(config.map_path.clone()));
                Session::Ready(Arc::new(InteractionController::new(classifier, renderer)))
            }
            Err(model::ModelError::NotFound(path)) => {
                let reason = format!(
                    "Model file not found. Please ensure '{}' is available in the app directory.",
                    path.display()
                );
                tracing::error!("{}", reason);
                Session::Halted { reason }
            }
            Err(e) => {
                let reason = format!("Model could not be loaded: {}", e);
                tracing::error!("{}", reason);
                Session::Halted { reason }
            }
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Session>,
}

impl AppState {
    /// Controller handle, or the halted reason as an error
    pub fn controller(&self) -> AppResult<Arc<InteractionController>> {
        match self.session.as_ref() {
            Session::Ready(controller) => Ok(controller.clone()),
            Session::Halted { reason } => Err(AppError::ModelUnavailable(reason.clone())),
        }
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Interactive form
    let page_routes = Router::new()
        .route("/", get(handlers::page::index))
        .route("/predict", post(handlers::page::predict))
        .route("/map", get(handlers::map::full_map));

    // JSON API
    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/predict", post(handlers::api::predict));

    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Config;

    fn config_for(model: &str, dir: &tempfile::TempDir) -> Config {
        Config {
            model_path: dir.path().join(model),
            map_path: dir.path().join("disaster_risk_map.html"),
            ..Config::default()
        }
    }

    fn halted_reason(session: Session) -> String {
        match session {
            Session::Halted { reason } => reason,
            Session::Ready(_) => panic!("expected a halted session"),
        }
    }

    #[test]
    fn test_missing_model_halts_with_message() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for("disaster_model.onnx", &dir);

        let reason = halted_reason(Session::start(&config));
        assert_eq!(
            reason,
            format!(
                "Model file not found. Please ensure '{}' is available in the app directory.",
                config.model_path.display()
            )
        );
    }

    #[test]
    fn test_unreadable_model_halts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for("disaster_model.pkl", &dir);
        std::fs::write(&config.model_path, b"\x80\x04pickle").unwrap();

        let reason = halted_reason(Session::start(&config));
        assert!(reason.starts_with("Model could not be loaded: "));
        assert!(reason.contains("disaster_model.pkl"));
    }

    #[test]
    fn test_json_model_starts_ready() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for("disaster_model.json", &dir);
        std::fs::write(
            &config.model_path,
            r#"{"classes": ["High", "Low", "Medium"], "trees": [{"nodes": [{"value": [0.0, 1.0, 0.0]}]}]}"#,
        )
        .unwrap();

        match Session::start(&config) {
            Session::Ready(controller) => assert_eq!(controller.backend(), "tree-ensemble"),
            Session::Halted { reason } => panic!("unexpected halt: {}", reason),
        }
    }
}
