/// Process-wide TTL cache over assembled entity records.
pub mod cache;
/// CLI arguments for the service.
pub mod cli;
/// Chain node and off-chain store clients.
pub mod client;
/// Config of the service, holding every shared collaborator.
pub mod config;
/// Pure byte-level decoding of raw storage values.
pub mod decode;
/// Entity assemblers and list fan-outs.
pub mod entity;
/// Top-level error tree.
pub mod error;
/// HTTP server, routes and response envelope.
pub mod server;
/// Validated params and store record shapes.
pub mod types;
/// Contains the utils.
pub mod utils;

#[cfg(test)]
pub mod tests;

// Re-export commonly used items
pub use error::{GatewayError, GatewayResult};
