pub mod error;
pub mod route;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::Config;
use crate::server::route::server_router;
use crate::GatewayResult;

/// Sets up and starts the HTTP server with configured routes.
///
/// # Panics
/// * If the address cannot be bound
pub async fn setup_server(config: Arc<Config>) -> GatewayResult<SocketAddr> {
    let (api_server_url, listener) = get_server_url(config.clone()).await;

    let app = server_router(config).layer(CorsLayer::permissive());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Failed to start axum server");
    });

    info!("Server listening on http://{}", api_server_url);
    Ok(api_server_url)
}

async fn get_server_url(config: Arc<Config>) -> (SocketAddr, tokio::net::TcpListener) {
    let server_params = config.server_params();
    // Port 0 in tests lets the OS pick a free port.
    let address = format!("{}:{}", server_params.host, server_params.port);
    let listener = tokio::net::TcpListener::bind(address.clone()).await.expect("Failed to get listener");
    let api_server_url = listener.local_addr().expect("Unable to bind address to listener.");

    (api_server_url, listener)
}
