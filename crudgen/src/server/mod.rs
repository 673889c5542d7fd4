//! HTTP API: `POST /gerar` and `GET /download/{zip_name}`

mod handlers;
mod response;

pub use handlers::GenerateResponse;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::generator::ProjectGenerator;
use crate::inspector::MySqlInspector;
use crate::store::ProjectStore;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub generator: ProjectGenerator,
}

/// Build the API router around a generator
///
/// CORS is open to any origin, method and header.
pub fn router(generator: ProjectGenerator) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/gerar", post(handlers::generate))
        .route("/download/{zip_name}", get(handlers::download))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState { generator })
}

/// Run the API with a live MySQL inspector until Ctrl+C
pub async fn serve(config: &ServerConfig) -> Result<()> {
    config.validate()?;

    let store = Arc::new(ProjectStore::new(&config.output_dir)?);
    let inspector = Arc::new(MySqlInspector::new(config.connect_timeout()));
    let app = router(ProjectGenerator::new(inspector, store));

    let listener = tokio::net::TcpListener::bind(config.socket_addr()?).await?;
    info!(
        "Listening on {} (projects in {})",
        listener.local_addr()?,
        config.output_dir.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
