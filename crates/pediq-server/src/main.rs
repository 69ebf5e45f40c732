use std::env;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod error;
mod middleware;
mod routes;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging, filtered by RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let bind_addr = env::var("PEDIQ_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/protocols", get(routes::protocols::list_protocols))
        .route("/protocols/{id}", get(routes::protocols::get_protocol_detail))
        .route(
            "/protocols/{id}/evaluate",
            post(routes::protocols::evaluate_protocol),
        )
        .route("/documents", get(routes::documents::list_documents))
        .route("/documents/{id}", get(routes::documents::get_document_detail))
        .layer(axum_mw::from_fn(middleware::request_log::request_log))
        .layer(cors);

    tracing::info!(addr = %bind_addr, "starting pediq server");
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
