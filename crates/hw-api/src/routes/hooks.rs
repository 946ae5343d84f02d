//! Webhook ingestion endpoints.

use std::borrow::Cow;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use hw_core::{parse_event, validate_payload, VerifyError};
use hw_observability::delivery_span;
use tracing::{debug, info, warn};

use crate::dto::HookAcceptedResponse;
use crate::error::{ApiError, ErrorResponse};
use crate::state::AppState;

/// Header carrying the algorithm-prefixed, hex-encoded HMAC digest.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature";

/// Header naming the event kind of a delivery.
pub const EVENT_HEADER: &str = "X-GitHub-Event";

/// Header carrying the unique delivery identifier.
pub const DELIVERY_HEADER: &str = "X-GitHub-Delivery";

/// Creates webhook routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/github", post(receive_hook))
}

/// Receive a webhook delivery.
///
/// The body is read exactly once and verified against the configured
/// secret before any of it is parsed as an event.
#[utoipa::path(
    post,
    path = "/hooks/github",
    request_body(content = String, content_type = "application/json"),
    responses(
        (status = 202, description = "Delivery accepted", body = HookAcceptedResponse),
        (status = 400, description = "Malformed signature or payload", body = ErrorResponse),
        (status = 401, description = "Missing or invalid signature", body = ErrorResponse),
        (status = 415, description = "Unsupported content type", body = ErrorResponse)
    ),
    tag = "Hooks"
)]
pub async fn receive_hook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<HookAcceptedResponse>), ApiError> {
    let body = body.map_err(|e| VerifyError::BodyRead(e.to_string()))?;
    hw_observability::metrics::record_delivery_received(body.len());

    let delivery_id = header_str(&headers, DELIVERY_HEADER).unwrap_or("-");
    let event_kind = header_str(&headers, EVENT_HEADER).unwrap_or("");
    let span = delivery_span!(delivery_id, event = %event_kind);
    let _enter = span.enter();

    if state.delivery_log.print_headers {
        debug!(headers = ?headers, "delivery headers");
    }

    let content_type = header_str(&headers, header::CONTENT_TYPE.as_str()).unwrap_or("");
    let signature = header_str(&headers, SIGNATURE_HEADER);

    let payload: Cow<'_, [u8]> = if state.verify {
        match validate_payload(content_type, signature, &body, state.secret.expose()) {
            Ok(payload) => payload,
            Err(e) => {
                hw_observability::metrics::record_verification_failure(e.kind());
                warn!(reason = e.kind(), "delivery rejected");
                return Err(e.into());
            }
        }
    } else {
        Cow::Borrowed(body.as_ref())
    };

    let event = match parse_event(event_kind, &payload) {
        Ok(event) => event,
        Err(e) => {
            hw_observability::metrics::record_event_decode_failure();
            warn!(error = %e, "could not decode event");
            return Err(ApiError::BadRequest(e.to_string()));
        }
    };

    hw_observability::metrics::record_delivery_accepted(event.kind());

    if state.delivery_log.print_body {
        info!(event = event.kind(), body = ?event, "delivery decoded");
    } else {
        info!(event = event.kind(), "delivery decoded");
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(HookAcceptedResponse {
            accepted: true,
            message: "Accepted.".to_string(),
            delivery: header_str(&headers, DELIVERY_HEADER).map(String::from),
            event: Some(event.kind().to_string()),
        }),
    ))
}

/// Returns a header value as a string slice, if present and valid UTF-8.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_str() {
        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, "sha1=abcd".parse().unwrap());

        assert_eq!(header_str(&headers, SIGNATURE_HEADER), Some("sha1=abcd"));
        assert_eq!(header_str(&headers, EVENT_HEADER), None);
        // Header name lookup is case-insensitive.
        assert_eq!(header_str(&headers, "x-hub-signature"), Some("sha1=abcd"));
    }
}
