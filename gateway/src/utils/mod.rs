/// Tracing subscriber setup.
pub mod logging;
