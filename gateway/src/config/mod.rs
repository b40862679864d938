use std::sync::Arc;

use crate::cache::EntityCache;
use crate::cli::RunCmd;
use crate::client::database::mongodb::MongoDbClient;
use crate::client::database::DatabaseClient;
use crate::client::node::NodeClient;
use crate::types::params::{CacheParams, DatabaseArgs, NodeParams, ServerParams};
use crate::GatewayResult;

/// The app config: every shared collaborator lives here and is injected via
/// axum state. Constructed once at startup; tests build isolated instances
/// with their own cache and mock collaborators.
pub struct Config {
    node: NodeClient,
    cache: EntityCache,
    database: Box<dyn DatabaseClient>,
    server_params: ServerParams,
}

impl Config {
    pub fn new(
        node: NodeClient,
        cache: EntityCache,
        database: Box<dyn DatabaseClient>,
        server_params: ServerParams,
    ) -> Self {
        Self { node, cache, database, server_params }
    }

    pub async fn from_run_cmd(run_cmd: &RunCmd) -> GatewayResult<Arc<Self>> {
        let node_params = NodeParams::try_from(run_cmd)?;
        let node = NodeClient::new(&node_params)?;

        let cache = EntityCache::new(&CacheParams::from(run_cmd));
        let database = MongoDbClient::new(&DatabaseArgs::from(run_cmd)).await?;

        Ok(Arc::new(Self::new(node, cache, Box::new(database), ServerParams::from(run_cmd))))
    }

    pub fn node(&self) -> &NodeClient {
        &self.node
    }

    pub fn cache(&self) -> &EntityCache {
        &self.cache
    }

    pub fn database(&self) -> &dyn DatabaseClient {
        self.database.as_ref()
    }

    pub fn server_params(&self) -> &ServerParams {
        &self.server_params
    }
}
