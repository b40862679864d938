use clap::Args;

/// Parameters for the Casper node RPC endpoint.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct NodeCliArgs {
    /// JSON-RPC url of the Casper node.
    #[arg(env = "GATEWAY_NODE_RPC_URL", long, default_value = "https://rpc.testnet.casperlabs.io/rpc")]
    pub node_rpc_url: String,

    /// Per-request timeout, in seconds. Every remote call inherits it; the
    /// gateway never retries.
    #[arg(env = "GATEWAY_NODE_TIMEOUT_SECS", long, default_value = "20")]
    pub request_timeout_secs: u64,
}
