// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::{load_app_config, load_recommendations_config};
use crate::infrastructure::meter_api_repository::MeterApiRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_bill, get_consumption, health_check, list_alerts, list_recommendations, mark_alert_read,
    refresh,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let app_config = load_app_config()?;
    let recommendations_config = load_recommendations_config()?;
    app_config.engine.tariffs.validate()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(MeterApiRepository::new(
        app_config.meter_api.base_url,
        app_config.meter_api.household_id,
    ));

    // Create the engine (application layer)
    let dashboard_service = DashboardService::new(
        repository,
        app_config.engine,
        recommendations_config.recommendations,
    );

    // Load the initial window; the service starts empty if the feed is down
    // and can be reloaded later through POST /refresh
    if let Err(e) = dashboard_service.refresh().await {
        tracing::warn!("initial window load failed, starting empty: {e:#}");
    }

    // Create application state
    let state = Arc::new(AppState { dashboard_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/refresh", post(refresh))
        .route("/consumption", get(get_consumption))
        .route("/bill", get(get_bill))
        .route("/alerts", get(list_alerts))
        .route("/alerts/:id/read", post(mark_alert_read))
        .route("/recommendations", get(list_recommendations))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = app_config.server.listen_addr.parse()?;
    tracing::info!("starting utility-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
