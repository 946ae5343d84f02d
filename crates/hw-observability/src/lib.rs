//! # hw-observability
//!
//! Logging and metrics infrastructure for Hook Warden.
//!
//! Provides structured logging with the tracing ecosystem and delivery
//! metrics built on the metrics facade.

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, init_logging_with_config, LoggingConfig};
pub use metrics::register_metrics;
