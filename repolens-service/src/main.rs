mod error;
mod routes;
mod state;

use axum::routing::{get, post};
use axum::Router;
use repolens_core::Config;
use state::{AppState, SharedState};
use std::path::Path;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port: u16 = std::env::args()
        .position(|a| a == "--port")
        .and_then(|i| std::env::args().nth(i + 1))
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let bind: String = std::env::args()
        .position(|a| a == "--bind")
        .and_then(|i| std::env::args().nth(i + 1))
        .unwrap_or_else(|| "127.0.0.1".to_string());

    let config = match std::env::args()
        .position(|a| a == "--config")
        .and_then(|i| std::env::args().nth(i + 1))
    {
        Some(path) => match Config::load(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("repolens-service: failed to load config {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let state: SharedState = match AppState::new(config) {
        Ok(state) => Arc::new(state),
        Err(err) => {
            eprintln!("repolens-service: {}", err);
            std::process::exit(1);
        }
    };

    let app = Router::new()
        .route("/summarize", post(routes::summarize))
        .route("/status", get(routes::status))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", bind, port);
    tracing::info!("repolens-service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
