//! Webhook ingestion integration tests.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use hw_api::routes::create_router;
use hw_api::state::{AppState, WebhookSecret};
use hw_core::Algorithm;
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "topsecret";

fn test_router(state: AppState) -> Router {
    create_router(state)
}

fn verified_router() -> Router {
    test_router(AppState::new(WebhookSecret::from(SECRET)))
}

fn sign(alg: Algorithm, body: &[u8]) -> String {
    format!(
        "{alg}={}",
        hex::encode(hw_core::compute_mac(alg, SECRET.as_bytes(), body))
    )
}

fn push_body() -> Vec<u8> {
    serde_json::to_vec(&json!({
        "ref": "refs/heads/main",
        "commits": [],
        "repository": {"full_name": "octocat/hello-world"},
        "sender": {"login": "octocat"}
    }))
    .unwrap()
}

fn delivery_request(
    content_type: &str,
    signature: Option<&str>,
    event: &str,
    body: Vec<u8>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/hooks/github")
        .header("Content-Type", content_type)
        .header("X-GitHub-Event", event)
        .header("X-GitHub-Delivery", "72d3162e-cc78-11e3-81ab-4c9367dc0958");

    if let Some(sig) = signature {
        builder = builder.header("X-Hub-Signature", sig);
    }

    builder.body(Body::from(body)).unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_valid_signed_json_delivery_accepted() {
    let body = push_body();
    let signature = sign(Algorithm::Sha1, &body);

    let response = verified_router()
        .oneshot(delivery_request(
            "application/json",
            Some(&signature),
            "push",
            body,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = response_json(response).await;
    assert_eq!(json["accepted"], json!(true));
    assert_eq!(json["event"], json!("push"));
    assert_eq!(
        json["delivery"],
        json!("72d3162e-cc78-11e3-81ab-4c9367dc0958")
    );
}

#[tokio::test]
async fn test_all_algorithms_accepted() {
    for alg in [Algorithm::Sha1, Algorithm::Sha256, Algorithm::Sha512] {
        let body = push_body();
        let signature = sign(alg, &body);

        let response = verified_router()
            .oneshot(delivery_request(
                "application/json",
                Some(&signature),
                "push",
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED, "{alg}");
    }
}

#[tokio::test]
async fn test_tampered_body_rejected() {
    let signature = sign(Algorithm::Sha1, &push_body());
    let tampered = serde_json::to_vec(&json!({
        "ref": "refs/heads/evil",
        "commits": []
    }))
    .unwrap();

    let response = verified_router()
        .oneshot(delivery_request(
            "application/json",
            Some(&signature),
            "push",
            tampered,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = response_json(response).await;
    assert_eq!(json["code"], json!("INVALID_SIGNATURE"));
}

#[tokio::test]
async fn test_missing_signature_rejected() {
    let response = verified_router()
        .oneshot(delivery_request(
            "application/json",
            None,
            "push",
            push_body(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = response_json(response).await;
    assert_eq!(json["code"], json!("UNAUTHORIZED"));
}

#[tokio::test]
async fn test_malformed_signature_rejected() {
    let response = verified_router()
        .oneshot(delivery_request(
            "application/json",
            Some("sha1"),
            "push",
            push_body(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_algorithm_rejected() {
    let response = verified_router()
        .oneshot(delivery_request(
            "application/json",
            Some("md5=abcd"),
            "push",
            push_body(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsupported_content_type_rejected() {
    // A correct signature does not rescue an unsupported content type.
    let body = push_body();
    let signature = sign(Algorithm::Sha1, &body);

    let response = verified_router()
        .oneshot(delivery_request(
            "text/plain",
            Some(&signature),
            "push",
            body,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_form_encoded_delivery_accepted() {
    let inner = json!({"action": "started", "sender": {"login": "octocat"}});
    let body: Vec<u8> = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("payload", &inner.to_string())
        .finish()
        .into_bytes();
    // The sender signs the raw form body, not the decoded field.
    let signature = sign(Algorithm::Sha256, &body);

    let response = verified_router()
        .oneshot(delivery_request(
            "application/x-www-form-urlencoded",
            Some(&signature),
            "watch",
            body,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = response_json(response).await;
    assert_eq!(json["event"], json!("watch"));
}

#[tokio::test]
async fn test_form_without_payload_field_is_bad_request() {
    let body = b"something=else".to_vec();
    let signature = sign(Algorithm::Sha1, &body);

    let response = verified_router()
        .oneshot(delivery_request(
            "application/x-www-form-urlencoded",
            Some(&signature),
            "push",
            body,
        ))
        .await
        .unwrap();

    // Verification succeeds but there is no payload to decode.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wrong_secret_rejected() {
    let body = push_body();
    let signature = format!(
        "sha1={}",
        hex::encode(hw_core::compute_mac(
            Algorithm::Sha1,
            b"wrong-secret",
            &body
        ))
    );

    let response = verified_router()
        .oneshot(delivery_request(
            "application/json",
            Some(&signature),
            "push",
            body,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verification_disabled_accepts_unsigned_delivery() {
    let state = AppState::new(WebhookSecret::default()).with_verification(false);

    let response = test_router(state)
        .oneshot(delivery_request(
            "application/json",
            None,
            "push",
            push_body(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_unknown_event_kind_accepted() {
    let body = serde_json::to_vec(&json!({"state": "success"})).unwrap();
    let signature = sign(Algorithm::Sha1, &body);

    let response = verified_router()
        .oneshot(delivery_request(
            "application/json",
            Some(&signature),
            "deployment_status",
            body,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = response_json(response).await;
    assert_eq!(json["event"], json!("deployment_status"));
}
