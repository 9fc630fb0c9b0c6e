pub mod api;
pub mod error;
pub mod pages;
pub mod state;
pub mod templates;

pub use state::AppState;

use crate::error::Result;
use axum::http::{header, Method};
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "center_search",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::render(),
    )
}

/// Every page, API and operational route.
pub fn create_router(state: AppState) -> Router {
    // Map pages fetch the JSON API from the browser
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        // Pages
        .route("/", get(pages::index))
        .route("/center/main", get(pages::center_main))
        .route("/center/view/quarter/:area", get(pages::center_quarter))
        .route("/center/choose/locate", get(pages::choose_locate))
        .route("/center/locate", get(pages::locate))
        .route("/center/create", get(pages::create_form))
        .route("/center/view/:id", get(pages::detail))
        .route("/center/:id/update", get(pages::update_form))
        .route("/center/nav/start", get(pages::nav_start))
        .route("/center/nav/waypoints", get(pages::nav_waypoints))
        .route("/center/nav/goal", get(pages::nav_goal))
        .route("/center/nav/result", get(pages::nav_result))
        // JSON API
        .route(
            "/api/v1/location",
            get(api::list_locations).post(api::create_location),
        )
        .route("/api/v1/location/search", get(api::search_locations))
        .route("/api/v1/location/:id", get(api::get_location))
        .route("/api/v1/location/:id/update", post(api::update_location))
        .route(
            "/api/v1/location/:id/change/status",
            post(api::change_status),
        )
        // Stylesheets and map scripts
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn start_server(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = create_router(state);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| crate::error::CenterError::Config(format!("Invalid bind address {host}:{port}: {e}")))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Startup banner

    info!("HTTP server listening on {addr}");
    println!("🚀 Center search running on http://localhost:{port}");
    println!("💚 Health check: http://localhost:{port}/health");
    println!("📈 Metrics:      http://localhost:{port}/metrics");

    axum::serve(listener, app).await?;
    Ok(())
}
