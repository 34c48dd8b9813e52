//! Documentation of the mood check-in backend for a student wellness app.
//!
//!
//!
//! # General Infrastructure
//! - Single page frontend talks to one endpoint, `POST /api/mood`
//! - Frontend captures a webcam frame and sends it as a base64 data URI
//! - Server forwards the image to a hosted multimodal model with a fixed prompt
//! - Server answers with one emotion word, validated against the closed label set
//! - Frontend reconciles that word with the day's mood score through the `mood` crate
//!
//!
//!
//! # Request Flow
//!
//! To backend
//! - JSON `{ "image": "data:image/png;base64,..." }`, prefix optional
//!
//! From backend
//! - `200 { "emotion": "surprise", "recognized": true, "canonical": "happy" }`
//! - `400 { "error": "No image provided" }` when the image is missing or empty
//! - `400 { "error": "Malformed image payload" }` when it is not base64
//! - `413 { "error": "Image too large" }` above `MAX_BODY_BYTES`
//! - `500 { "error": "Failed to analyze mood" }` on any provider failure, details stay in the logs
//!
//!
//!
//! # Known Gaps
//! - No authentication on the endpoint
//! - No timeout, retry or concurrency limit on the outbound call, a slow provider holds the request
//! - Under load the provider quota is the only backpressure
//!
//!
//!
//! # Setup
//!
//! Secrets are read from the environment first, then `/run/secrets`.
//! ```sh
//! export GEMINI_API_KEY=...
//! RUST_LOG=info cargo run -p moodlight
//! ```
//!
//! Other variables: `RUST_PORT` (5000), `GEMINI_MODEL` (gemini-1.5-flash),
//! `GEMINI_API_BASE`, `MAX_BODY_BYTES` (10 MiB).
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::ctrl_c;
#[cfg(unix)]
use signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod image;
pub mod inference;
pub mod routes;
pub mod state;

use config::Config;
use error::ServerError;
use routes::{health_handler, mood_handler};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/mood", post(mood_handler))
        .route("/api/health", get(health_handler))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> Result<(), ServerError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config);

    info!("Starting server...");
    let address = format!("0.0.0.0:{}", state.config.port);
    let app = router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
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
}
