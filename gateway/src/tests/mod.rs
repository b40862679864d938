pub mod cache;
pub mod common;
pub mod decode;
pub mod server;
