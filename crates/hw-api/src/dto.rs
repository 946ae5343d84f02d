//! Data Transfer Objects (DTOs) for API responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response body for webhook deliveries.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HookAcceptedResponse {
    /// Whether the delivery was accepted.
    pub accepted: bool,
    /// Human-readable status message.
    pub message: String,
    /// Delivery identifier from the `X-GitHub-Delivery` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<String>,
    /// Decoded event kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall status string.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
    /// Whether signature verification is enabled.
    pub verification_enabled: bool,
}
