use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tracing::{error, info, instrument};

use super::super::error::RouteError;
use super::super::types::{ApiResponse, RouteResult};
use crate::config::Config;

pub(super) fn deploy_router(config: Arc<Config>) -> Router {
    Router::new().route("/deploy", post(relay_deploy)).with_state(config)
}

/// Relays a pre-signed deploy to the node. On success the whole entity
/// cache is flushed before responding, so no subsequent read can serve
/// state older than the write. A rejected deploy leaves the cache alone and
/// passes the node's reason through verbatim.
#[instrument(skip(config, deploy))]
async fn relay_deploy(State(config): State<Arc<Config>>, Json(deploy): Json<serde_json::Value>) -> RouteResult {
    match config.node().put_deploy(&deploy).await {
        Ok(deploy_hash) => {
            config.cache().flush_all().await;
            info!(%deploy_hash, "deploy relayed");
            Ok(Json(ApiResponse::success_with_data(json!({ "deploy_hash": deploy_hash }))).into_response())
        }
        Err(e) => {
            error!(error = %e, "deploy rejected by node");
            Err(RouteError::DeployRejected(e.to_string()))
        }
    }
}
