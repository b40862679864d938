use clap::Parser;

pub mod cache;
pub mod database;
pub mod node;
pub mod server;

/// Arguments to run the gateway service. Every flag can also be supplied
/// through its environment variable, typically via a `.env` file.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gateway",
    about = "Casper gateway - on-chain state aggregation and deploy relay",
    version
)]
pub struct RunCmd {
    #[command(flatten)]
    pub server_args: server::ServerCliArgs,

    #[command(flatten)]
    pub node_args: node::NodeCliArgs,

    #[command(flatten)]
    pub database_args: database::MongoDbCliArgs,

    #[command(flatten)]
    pub cache_args: cache::CacheCliArgs,
}
