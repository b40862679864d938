use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;

use crate::config::Config;

pub(super) mod chain;
pub(super) mod deploy;
pub(super) mod public;
pub(super) mod store;

/// Fallback for routes that do not match anything.
pub async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "The requested resource was not found")
}

pub(crate) fn server_router(config: Arc<Config>) -> Router {
    Router::new()
        .merge(public::local_route())
        .merge(chain::chain_router(config.clone()))
        .merge(deploy::deploy_router(config.clone()))
        .merge(store::store_router(config))
        .fallback(handler_404)
}
