/// Off-chain document store client.
pub mod database;
/// Casper node JSON-RPC client.
pub mod node;
