/// Validated runtime parameters, built from CLI arguments.
pub mod params;
/// Record shapes persisted in the off-chain store.
pub mod store;
