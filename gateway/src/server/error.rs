use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::types::ApiResponse;
use crate::client::database::DatabaseError;
use crate::client::node::NodeClientError;
use crate::entity::EntityError;

/// Errors surfaced by route handlers, each mapped to an HTTP status:
/// * `BadParam` - 400 Bad Request
/// * `NotFound` - 404 Not Found (an unconditional read found nothing)
/// * `Upstream` - 502 Bad Gateway (node transport/RPC/decode failure)
/// * `DeployRejected` - 400 Bad Request (the node's reason, verbatim)
/// * `Database` - 500 Internal Server Error
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("missing or invalid parameter: {0}")]
    BadParam(String),

    #[error("not found on-chain: {0}")]
    NotFound(String),

    #[error("chain read failed: {0}")]
    Upstream(String),

    #[error("deploy rejected: {0}")]
    DeployRejected(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<EntityError> for RouteError {
    fn from(error: EntityError) -> Self {
        match error {
            EntityError::MissingField(field) => RouteError::NotFound(field),
            other => RouteError::Upstream(other.to_string()),
        }
    }
}

impl From<NodeClientError> for RouteError {
    fn from(error: NodeClientError) -> Self {
        RouteError::Upstream(error.to_string())
    }
}

impl From<DatabaseError> for RouteError {
    fn from(error: DatabaseError) -> Self {
        RouteError::Database(error.to_string())
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = match &self {
            RouteError::BadParam(_) | RouteError::DeployRejected(_) => StatusCode::BAD_REQUEST,
            RouteError::NotFound(_) => StatusCode::NOT_FOUND,
            RouteError::Upstream(_) => StatusCode::BAD_GATEWAY,
            RouteError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ApiResponse::error(self.to_string()))).into_response()
    }
}
