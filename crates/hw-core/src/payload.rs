//! Content-type-dependent payload extraction.

use std::borrow::Cow;

use crate::error::VerifyError;

/// Content type for direct JSON deliveries.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type for form-encoded deliveries.
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Form field carrying the JSON payload for form-encoded deliveries.
const PAYLOAD_FORM_FIELD: &str = "payload";

/// Splits a request body into the signed bytes and the payload.
///
/// The first element is always the body exactly as transmitted, because
/// that is what the sender computed the MAC over. For JSON deliveries the
/// payload is the body itself, byte for byte. For form-encoded deliveries
/// the payload is the query-decoded `payload` field; when the field is
/// absent the payload is empty, not an error, and callers must handle the
/// empty case downstream.
pub fn extract_payload<'a>(
    content_type: &str,
    body: &'a [u8],
) -> Result<(&'a [u8], Cow<'a, [u8]>), VerifyError> {
    match content_type {
        CONTENT_TYPE_JSON => Ok((body, Cow::Borrowed(body))),
        CONTENT_TYPE_FORM => {
            let payload = url::form_urlencoded::parse(body)
                .find(|(name, _)| name == PAYLOAD_FORM_FIELD)
                .map(|(_, value)| value.into_owned().into_bytes())
                .unwrap_or_default();
            Ok((body, Cow::Owned(payload)))
        }
        other => Err(VerifyError::UnsupportedContentType(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_passes_through_verbatim() {
        let body = br#"{"a":1}"#;
        let (signed, payload) = extract_payload(CONTENT_TYPE_JSON, body).unwrap();
        assert_eq!(signed, body);
        assert_eq!(payload.as_ref(), body);
    }

    #[test]
    fn test_json_whitespace_preserved() {
        // The MAC covers these exact bytes, so nothing may be normalized.
        let body = b"{ \"a\" : 1 }\n";
        let (signed, payload) = extract_payload(CONTENT_TYPE_JSON, body).unwrap();
        assert_eq!(signed, body);
        assert_eq!(payload.as_ref(), body.as_slice());
    }

    #[test]
    fn test_form_body_decodes_payload_field() {
        let body = b"payload=%7B%22a%22%3A1%7D";
        let (signed, payload) = extract_payload(CONTENT_TYPE_FORM, body).unwrap();
        assert_eq!(signed, body, "signed bytes stay undecoded");
        assert_eq!(payload.as_ref(), br#"{"a":1}"#);
    }

    #[test]
    fn test_form_body_with_other_fields() {
        let body = b"extra=1&payload=%7B%22zen%22%3A%22ok%22%7D&more=2";
        let (_, payload) = extract_payload(CONTENT_TYPE_FORM, body).unwrap();
        assert_eq!(payload.as_ref(), br#"{"zen":"ok"}"#);
    }

    #[test]
    fn test_form_body_missing_payload_field_is_empty() {
        let body = b"something=else";
        let (signed, payload) = extract_payload(CONTENT_TYPE_FORM, body).unwrap();
        assert_eq!(signed, body);
        assert!(payload.is_empty());
    }

    #[test]
    fn test_form_plus_decodes_to_space() {
        let body = b"payload=a+b";
        let (_, payload) = extract_payload(CONTENT_TYPE_FORM, body).unwrap();
        assert_eq!(payload.as_ref(), b"a b");
    }

    #[test]
    fn test_unknown_content_type_rejected() {
        match extract_payload("text/plain", b"{}") {
            Err(VerifyError::UnsupportedContentType(ct)) => assert_eq!(ct, "text/plain"),
            other => panic!("expected UnsupportedContentType, got {other:?}"),
        }
    }
}
