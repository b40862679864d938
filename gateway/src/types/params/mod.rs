use std::time::Duration;

use url::Url;

use crate::cli::RunCmd;
use crate::error::GatewayError;

/// Parameters for the HTTP listener.
#[derive(Debug, Clone)]
pub struct ServerParams {
    pub host: String,
    pub port: u16,
}

/// Parameters for the Casper node RPC client.
#[derive(Debug, Clone)]
pub struct NodeParams {
    pub rpc_url: Url,
    pub request_timeout: Duration,
}

/// Validated MongoDB parameters.
#[derive(Debug, Clone)]
pub struct DatabaseArgs {
    pub connection_uri: String,
    pub database_name: String,
}

/// TTL classes for the entity cache.
#[derive(Debug, Clone)]
pub struct CacheParams {
    /// Rarely-changing descriptive data (tokens, collections, vesting contracts).
    pub ttl_long: Duration,
    /// Data that moves with on-chain activity (listings, raffles, balances).
    pub ttl_short: Duration,
}

impl From<&RunCmd> for ServerParams {
    fn from(run_cmd: &RunCmd) -> Self {
        Self { host: run_cmd.server_args.host.clone(), port: run_cmd.server_args.port }
    }
}

impl TryFrom<&RunCmd> for NodeParams {
    type Error = GatewayError;

    fn try_from(run_cmd: &RunCmd) -> Result<Self, Self::Error> {
        let rpc_url = Url::parse(&run_cmd.node_args.node_rpc_url)
            .map_err(|e| GatewayError::ConfigError(format!("invalid node RPC url: {e}")))?;
        Ok(Self { rpc_url, request_timeout: Duration::from_secs(run_cmd.node_args.request_timeout_secs) })
    }
}

impl From<&RunCmd> for DatabaseArgs {
    fn from(run_cmd: &RunCmd) -> Self {
        Self {
            connection_uri: run_cmd.database_args.mongodb_connection_url.clone(),
            database_name: run_cmd.database_args.mongodb_database_name.clone(),
        }
    }
}

impl From<&RunCmd> for CacheParams {
    fn from(run_cmd: &RunCmd) -> Self {
        Self {
            ttl_long: Duration::from_secs(run_cmd.cache_args.ttl_long_secs),
            ttl_short: Duration::from_secs(run_cmd.cache_args.ttl_short_secs),
        }
    }
}
