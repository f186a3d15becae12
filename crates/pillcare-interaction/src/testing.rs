//! Scripted transport for tests.
//!
//! Replies are queued per `(method, path)` and consumed in order. Every
//! request is recorded so tests can assert call counts and ordering.

use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

type Reply = std::result::Result<HttpResponse, TransportError>;

/// In-memory [`HttpTransport`] that replays queued replies.
///
/// A request with nothing queued gets a 404, the same thing an unknown
/// route returns on the real backend.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<(HttpMethod, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON reply.
    pub fn reply(&self, method: HttpMethod, path: &str, status: u16, body: serde_json::Value) {
        self.push(
            method,
            path,
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    /// Queues a reply with an empty body (e.g. 204 on delete).
    pub fn reply_empty(&self, method: HttpMethod, path: &str, status: u16) {
        self.push(
            method,
            path,
            Ok(HttpResponse {
                status,
                body: String::new(),
            }),
        );
    }

    /// Queues a network-level failure.
    pub fn fail_network(&self, method: HttpMethod, path: &str) {
        self.push(
            method,
            path,
            Err(TransportError::Network("connection refused".to_string())),
        );
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// `"METHOD /path"` for every request received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    fn push(&self, method: HttpMethod, path: &str, reply: Reply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies
                .entry((method, path.to_string()))
                .or_default()
                .push_back(reply);
        }
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Reply {
        let key = (request.method, request.path.clone());
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let queued = self
            .replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.get_mut(&key).and_then(VecDeque::pop_front));

        queued.unwrap_or_else(|| {
            Ok(HttpResponse {
                status: 404,
                body: serde_json::json!({
                    "detail": format!("no scripted reply for {} {}", key.0, key.1)
                })
                .to_string(),
            })
        })
    }
}
