use thiserror::Error;

use crate::client::database::DatabaseError;
use crate::client::node::NodeClientError;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Startup error tree: everything that can go wrong before the server is
/// serving. Per-request failures are handled by the route error type.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Node client error: {0}")]
    NodeClient(#[from] NodeClientError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
