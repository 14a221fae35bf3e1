//! HTTP API server for folio.
//!
//! Exposes the activity aggregator, the blog store, and the metadata
//! scraper as JSON endpoints for the site frontend.

pub mod routes;
pub mod state;

use axum::Router;
use folio_core::AppConfig;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = state.config.server.cors;

    let mut app = Router::new()
        .merge(routes::health_routes())
        .merge(routes::github_routes())
        .merge(routes::blog_routes())
        .merge(routes::metadata_routes())
        .with_state(state);

    app = app.layer(TraceLayer::new_for_http());

    if cors {
        // The site frontend is served from another origin; the API is
        // read-only, so permissive CORS is acceptable.
        app = app.layer(CorsLayer::permissive());
    }

    app
}

/// Start the HTTP server.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let state = AppState::new(config.clone());
    let router = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
