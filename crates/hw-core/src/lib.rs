//! # hw-core
//!
//! Webhook payload authentication core for Hook Warden.
//!
//! Verifies that an inbound request body originates from the holder of a
//! shared secret by checking the keyed MAC carried in the signature
//! header, then yields the canonical payload bytes for event decoding.
//! All operations are pure, synchronous, and free of shared state; the
//! secret is supplied by the caller on every verification.

pub mod error;
pub mod event;
mod mac;
mod payload;
mod signature;

pub use error::VerifyError;
pub use event::{parse_event, EventError, WebhookEvent};
pub use mac::{compute_mac, verify_mac};
pub use payload::{extract_payload, CONTENT_TYPE_FORM, CONTENT_TYPE_JSON};
pub use signature::{parse_signature, Algorithm, ParsedSignature};

use std::borrow::Cow;

/// A single inbound delivery awaiting verification.
///
/// Borrows the request data for the duration of one verification call;
/// nothing here outlives the request.
#[derive(Debug, Clone, Copy)]
pub struct SignedRequest<'a> {
    /// Declared content type of the body.
    pub content_type: &'a str,
    /// Value of the signature header, if present.
    pub signature: Option<&'a str>,
    /// Body bytes exactly as transmitted.
    pub body: &'a [u8],
}

impl<'a> SignedRequest<'a> {
    /// Verifies the delivery against `secret` and returns the payload.
    ///
    /// Runs payload extraction, signature parsing, and MAC verification
    /// in that order; the first failing stage's error is returned
    /// unchanged so callers can respond per failure kind.
    pub fn validate(&self, secret: &[u8]) -> Result<Cow<'a, [u8]>, VerifyError> {
        let (signed, payload) = payload::extract_payload(self.content_type, self.body)?;
        let sig = signature::parse_signature(self.signature.unwrap_or(""))?;
        if !mac::verify_mac(signed, &sig.digest, sig.algorithm, secret) {
            return Err(VerifyError::SignatureMismatch);
        }
        Ok(payload)
    }
}

/// Verifies a delivery and returns the authenticated payload bytes.
///
/// Convenience wrapper over [`SignedRequest::validate`] for callers that
/// have the pieces in hand rather than a request value.
pub fn validate_payload<'a>(
    content_type: &'a str,
    signature: Option<&'a str>,
    body: &'a [u8],
    secret: &[u8],
) -> Result<Cow<'a, [u8]>, VerifyError> {
    SignedRequest {
        content_type,
        signature,
        body,
    }
    .validate(secret)
}
