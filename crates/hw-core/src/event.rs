//! Typed webhook event decoding.
//!
//! Decodes an authenticated payload into a typed event based on the
//! delivery's event-kind header. Only the fields the service reads are
//! modeled; unrecognized kinds keep their raw JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to decode an authenticated payload into an event.
#[derive(Error, Debug)]
pub enum EventError {
    /// The payload was empty. Form-encoded deliveries without a
    /// `payload` field verify successfully but carry nothing to decode.
    #[error("empty payload")]
    EmptyPayload,

    /// The payload was not valid JSON for the named event kind.
    #[error("invalid event payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A decoded webhook event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WebhookEvent {
    Ping(PingEvent),
    Push(PushEvent),
    PullRequest(PullRequestEvent),
    Watch(WatchEvent),
    /// Any event kind the service does not model.
    Unknown {
        kind: String,
        payload: serde_json::Value,
    },
}

impl WebhookEvent {
    /// The event kind as carried in the delivery header.
    pub fn kind(&self) -> &str {
        match self {
            WebhookEvent::Ping(_) => "ping",
            WebhookEvent::Push(_) => "push",
            WebhookEvent::PullRequest(_) => "pull_request",
            WebhookEvent::Watch(_) => "watch",
            WebhookEvent::Unknown { kind, .. } => kind,
        }
    }
}

/// Repository the event was delivered for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub full_name: String,
    #[serde(default)]
    pub private: bool,
}

/// Account that triggered the event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sender {
    pub login: String,
}

/// `ping` event sent when a hook is first configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingEvent {
    pub zen: Option<String>,
    pub hook_id: Option<u64>,
    pub repository: Option<Repository>,
}

/// `push` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushEvent {
    /// The full git ref that was pushed, e.g. `refs/heads/main`.
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub before: Option<String>,
    pub after: Option<String>,
    #[serde(default)]
    pub commits: Vec<Commit>,
    pub repository: Option<Repository>,
    pub sender: Option<Sender>,
}

/// A commit carried in a `push` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub message: String,
}

/// `pull_request` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub number: u64,
    pub pull_request: PullRequest,
    pub repository: Option<Repository>,
    pub sender: Option<Sender>,
}

/// The pull request a `pull_request` event refers to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub title: Option<String>,
    pub state: Option<String>,
}

/// `watch` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchEvent {
    pub action: String,
    pub repository: Option<Repository>,
    pub sender: Option<Sender>,
}

/// Decodes `payload` as the event named by `kind`.
pub fn parse_event(kind: &str, payload: &[u8]) -> Result<WebhookEvent, EventError> {
    if payload.is_empty() {
        return Err(EventError::EmptyPayload);
    }

    let event = match kind {
        "ping" => WebhookEvent::Ping(serde_json::from_slice(payload)?),
        "push" => WebhookEvent::Push(serde_json::from_slice(payload)?),
        "pull_request" => WebhookEvent::PullRequest(serde_json::from_slice(payload)?),
        "watch" => WebhookEvent::Watch(serde_json::from_slice(payload)?),
        other => WebhookEvent::Unknown {
            kind: other.to_string(),
            payload: serde_json::from_slice(payload)?,
        },
    };

    Ok(event)
}
