use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::{error, info};

use desk_api::{build_router, AppState};
use desk_core::repositories::{TicketRepository, UserDirectoryRepository};
use desk_core::services::TicketService;
use desk_core::SystemClock;
use desk_infrastructure::{InMemoryTicketRepository, InMemoryUserDirectory, SeedData};
use desk_shared::config::AppConfig;
use desk_shared::constants::TENANT_HEADER;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry; the guard flushes file logs on exit
    let _log_guard = desk_shared::telemetry::init_telemetry(&config.logging);

    info!(env = %config.app.env, "{} starting...", config.app.name);

    // Stores
    let (tickets, users): (Arc<dyn TicketRepository>, Arc<dyn UserDirectoryRepository>) =
        match &config.seed.path {
            Some(path) => {
                let seed = SeedData::load(path).map_err(|e| {
                    error!("Failed to load seed data from {}: {}", path, e);
                    e
                })?;
                let (tickets, users) = seed.into_stores();
                (Arc::new(tickets), Arc::new(users))
            }
            None => (
                Arc::new(InMemoryTicketRepository::new()),
                Arc::new(InMemoryUserDirectory::new()),
            ),
        };

    let ticket_service = TicketService::new(tickets, users, Arc::new(SystemClock), config.sla);

    // Create App State
    let state = AppState {
        app_name: config.app.name.clone(),
        ticket_service: Arc::new(ticket_service),
    };

    // CORS
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(TENANT_HEADER)]);
    let cors = match &config.server.cors_origin {
        Some(origin) => cors.allow_origin(origin.parse::<HeaderValue>()?),
        None => cors.allow_origin(Any),
    };

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let app = build_router(state)
        .layer(cors)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid));

    // Bind address
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
