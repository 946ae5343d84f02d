//! Delivery metrics for Hook Warden.
//!
//! Thin wrappers over the metrics facade; the Prometheus recorder is
//! installed by whatever assembles the server.

use metrics::{counter, describe_counter, describe_histogram, histogram};

/// Registers metric descriptions.
///
/// Call once during server initialization, before the first delivery.
pub fn register_metrics() {
    describe_counter!(
        "hw_deliveries_received_total",
        "Total number of webhook deliveries received"
    );
    describe_counter!(
        "hw_deliveries_accepted_total",
        "Total number of webhook deliveries that passed verification"
    );
    describe_counter!(
        "hw_verification_failures_total",
        "Total number of deliveries rejected during payload verification"
    );
    describe_counter!(
        "hw_event_decode_failures_total",
        "Total number of authenticated payloads that failed event decoding"
    );
    describe_histogram!(
        "hw_payload_bytes",
        "Size in bytes of received webhook payloads"
    );
}

/// Records receipt of a delivery, before any verification.
pub fn record_delivery_received(body_len: usize) {
    counter!("hw_deliveries_received_total").increment(1);
    histogram!("hw_payload_bytes").record(body_len as f64);
}

/// Records a delivery rejected during verification.
pub fn record_verification_failure(reason: &'static str) {
    counter!("hw_verification_failures_total", "reason" => reason).increment(1);
}

/// Records a verified delivery, labeled by decoded event kind.
pub fn record_delivery_accepted(event: &str) {
    counter!("hw_deliveries_accepted_total", "event" => event.to_string()).increment(1);
}

/// Records an authenticated payload that failed event decoding.
pub fn record_event_decode_failure() {
    counter!("hw_event_decode_failures_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_a_no_op() {
        // With no recorder installed the macros must not panic.
        register_metrics();
        record_delivery_received(128);
        record_verification_failure("signature_mismatch");
        record_delivery_accepted("push");
        record_event_decode_failure();
    }
}
