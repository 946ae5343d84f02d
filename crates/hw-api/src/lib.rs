//! # hw-api
//!
//! HTTP API server for Hook Warden.
//!
//! This crate provides the webhook ingestion endpoint, health probes,
//! Prometheus metrics, and static file serving around the hw-core
//! verification pipeline.

pub mod dto;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{ApiServer, ApiServerConfig};
pub use state::{AppState, DeliveryLog, WebhookSecret};
