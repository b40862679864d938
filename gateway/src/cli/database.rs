use clap::Args;

/// Parameters used to config MongoDB.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct MongoDbCliArgs {
    /// The connection string to MongoDB.
    #[arg(env = "GATEWAY_MONGODB_CONNECTION_URL", long, default_value = "mongodb://localhost:27017")]
    pub mongodb_connection_url: String,

    /// The name of the MongoDB database.
    #[arg(env = "GATEWAY_MONGODB_DATABASE_NAME", long, default_value = "gateway")]
    pub mongodb_database_name: String,
}
