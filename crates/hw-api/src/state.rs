//! Application state shared across handlers.

use std::fmt;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use zeroize::Zeroizing;

/// Shared secret used to verify webhook signatures.
///
/// Wraps the key bytes so the memory is cleared on drop and so that
/// `Debug`/`Display` output never contains the secret.
#[derive(Clone, Default)]
pub struct WebhookSecret(Zeroizing<Vec<u8>>);

impl WebhookSecret {
    /// Creates a secret from raw key bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Exposes the key bytes for MAC computation.
    ///
    /// Avoid copying the returned slice; copies will not be zeroized.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    /// Returns true if no key material is configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for WebhookSecret {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl From<&str> for WebhookSecret {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes().to_vec())
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret([REDACTED])")
    }
}

/// Per-delivery logging options.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeliveryLog {
    /// Log the decoded event body with each delivery.
    pub print_body: bool,
    /// Log the request headers with each delivery.
    pub print_headers: bool,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Shared secret for webhook signature verification.
    pub secret: Arc<WebhookSecret>,
    /// Whether deliveries are verified at all. When disabled the raw
    /// body is treated as the payload.
    pub verify: bool,
    /// Per-delivery logging options.
    pub delivery_log: DeliveryLog,
    /// Prometheus metrics handle for rendering metrics.
    pub prometheus_handle: Option<Arc<PrometheusHandle>>,
}

impl AppState {
    /// Creates a new application state with verification enabled.
    pub fn new(secret: WebhookSecret) -> Self {
        Self {
            secret: Arc::new(secret),
            verify: true,
            delivery_log: DeliveryLog::default(),
            prometheus_handle: None,
        }
    }

    /// Sets whether deliveries are verified.
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Sets the per-delivery logging options.
    pub fn with_delivery_log(mut self, delivery_log: DeliveryLog) -> Self {
        self.delivery_log = delivery_log;
        self
    }

    /// Sets the Prometheus handle.
    pub fn with_prometheus_handle(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus_handle = Some(Arc::new(handle));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = WebhookSecret::from("hunter2");
        assert_eq!(format!("{secret:?}"), "WebhookSecret([REDACTED])");
    }

    #[test]
    fn test_secret_exposes_bytes() {
        let secret = WebhookSecret::from("topsecret");
        assert_eq!(secret.expose(), b"topsecret");
        assert!(!secret.is_empty());
        assert!(WebhookSecret::default().is_empty());
    }

    #[test]
    fn test_state_builders() {
        let state = AppState::new(WebhookSecret::from("s"))
            .with_verification(false)
            .with_delivery_log(DeliveryLog {
                print_body: true,
                print_headers: false,
            });

        assert!(!state.verify);
        assert!(state.delivery_log.print_body);
        assert!(state.prometheus_handle.is_none());
    }
}
