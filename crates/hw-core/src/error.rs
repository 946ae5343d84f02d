//! Verification error taxonomy.

use thiserror::Error;

/// A webhook delivery verification failure.
///
/// Every failure is terminal for the current request and is returned to
/// the caller with its kind intact. The core never logs and never retries;
/// translating a failure into an HTTP response (and deciding what is safe
/// to log) is the calling layer's job.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The body's declared encoding is not understood.
    #[error("unsupported content type {0:?}")]
    UnsupportedContentType(String),

    /// No signature header was present.
    #[error("missing signature header")]
    MissingSignature,

    /// The header did not split into `<algorithm>=<hex-digest>`, or the
    /// digest half is not valid hex.
    #[error("malformed signature header: {0}")]
    MalformedSignature(String),

    /// The header names a hash algorithm outside the supported set.
    #[error("unknown hash algorithm prefix {0:?}")]
    UnsupportedAlgorithm(String),

    /// The computed MAC does not equal the one the sender supplied.
    /// Neither digest appears in the message.
    #[error("payload signature check failed")]
    SignatureMismatch,

    /// The transport failed while reading the request body.
    #[error("failed to read request body: {0}")]
    BodyRead(String),
}

impl VerifyError {
    /// Stable snake_case label for this failure kind, suitable for
    /// metrics dimensions and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            VerifyError::UnsupportedContentType(_) => "unsupported_content_type",
            VerifyError::MissingSignature => "missing_signature",
            VerifyError::MalformedSignature(_) => "malformed_signature",
            VerifyError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            VerifyError::SignatureMismatch => "signature_mismatch",
            VerifyError::BodyRead(_) => "body_read",
        }
    }
}
