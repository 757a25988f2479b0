//! In-process stand-in for the document store's HTTP API.
//!
//! Replies come from a queue filled by the test; an empty queue answers with
//! an empty query result. Every request is recorded for assertions.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::any;
use axum::Router;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{watch, Mutex};

/// What the store saw.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Decoded query-string parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

/// A queued reply.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    body: String,
}

impl MockResponse {
    /// Raw body with a 200 status.
    pub fn json(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    /// Query endpoint envelope: `{"result": value}`.
    pub fn result(value: Value) -> Self {
        Self::json(&json!({ "result": value }).to_string())
    }

    /// Mutation endpoint envelope with one result per returned document.
    pub fn documents(documents: &[Value]) -> Self {
        let results: Vec<Value> = documents
            .iter()
            .map(|d| json!({ "id": d["_id"], "operation": "update", "document": d }))
            .collect();
        Self::json(&json!({ "transactionId": "tx-1", "results": results }).to_string())
    }

    /// Error status with the store's `{"error": {"description": ...}}` body.
    pub fn error(status: u16, description: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("invalid status"),
            body: json!({ "error": { "description": description } }).to_string(),
        }
    }
}

#[derive(Clone, Default)]
struct Shared {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    replies: Arc<Mutex<VecDeque<MockResponse>>>,
}

pub struct MockStore {
    base_url: String,
    shared: Shared,
    _stop: watch::Sender<()>,
}

impl MockStore {
    pub async fn start() -> Self {
        let shared = Shared::default();
        let app = Router::new()
            .route("/{*path}", any(reply))
            .with_state(shared.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock store");
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let (stop, mut stopped) = watch::channel(());
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stopped.changed().await;
                })
                .await
                .ok();
        });

        Self {
            base_url,
            shared,
            _stop: stop,
        }
    }

    pub async fn enqueue_response(&self, response: MockResponse) {
        self.shared.replies.lock().await.push_back(response);
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.shared.requests.lock().await.clone()
    }

    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }
}

async fn reply(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let query: Vec<(String, String)> = raw_query
        .and_then(|q| reqwest::Url::parse(&format!("http://mock/?{q}")).ok())
        .map(|url| url.query_pairs().into_owned().collect())
        .unwrap_or_default();

    shared.requests.lock().await.push(CapturedRequest {
        method,
        path: uri.path().to_string(),
        query,
        headers,
        body,
    });

    let response = shared
        .replies
        .lock()
        .await
        .pop_front()
        .unwrap_or_else(|| MockResponse::result(json!([])));
    (
        response.status,
        [(header::CONTENT_TYPE, "application/json")],
        response.body,
    )
}
