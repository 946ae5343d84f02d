//! CLI command implementations.

mod serve;

pub use serve::run_server;
