//! Fake Graylog GELF HTTP input for integration tests.
//!
//! Spins up a minimal `axum` server on a random TCP port bound to 127.0.0.1
//! and serves `POST /gelf`. Every request is recorded before it is answered,
//! so attempts that time out on the client side still show up in
//! [`FakeGraylog::received`].
//!
//! Replies are scripted: queue them with [`FakeGraylog::reply`] and
//! [`FakeGraylog::reply_slowly`]. Once the queue is empty every request gets
//! `202 Accepted`, which is what a real GELF HTTP input answers.
//!
//! # Example
//!
//! ```rust,no_run
//! let graylog = FakeGraylog::start().await.unwrap();
//! graylog.reply(StatusCode::BAD_REQUEST).await;
//!
//! // Point the HTTP sender at graylog.url()
//! let received = graylog.received().await;
//! ```

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One request as seen by the fake input.
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub content_type: Option<String>,
    /// Parsed body; `Value::Null` if it was not JSON.
    pub body: serde_json::Value,
}

struct Reply {
    status: StatusCode,
    delay: Option<Duration>,
}

#[derive(Default)]
struct GraylogState {
    received: Vec<ReceivedRequest>,
    replies: VecDeque<Reply>,
}

/// Handle to the running fake input.
pub struct FakeGraylog {
    addr: SocketAddr,
    state: Arc<Mutex<GraylogState>>,
}

impl FakeGraylog {
    /// Start listening on a random port. Returns once the socket is bound.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(GraylogState::default()));

        let app = Router::new()
            .route("/gelf", post(ingest))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// GELF endpoint URL (e.g. `http://127.0.0.1:PORT/gelf`).
    pub fn url(&self) -> String {
        format!("http://{}/gelf", self.addr)
    }

    /// Answer the next unscripted request with `status`.
    pub async fn reply(&self, status: StatusCode) {
        self.state.lock().await.replies.push_back(Reply { status, delay: None });
    }

    /// Hold the next unscripted request for `delay`, then accept it.
    pub async fn reply_slowly(&self, delay: Duration) {
        self.state.lock().await.replies.push_back(Reply {
            status: StatusCode::ACCEPTED,
            delay: Some(delay),
        });
    }

    /// Everything received so far, in arrival order.
    pub async fn received(&self) -> Vec<ReceivedRequest> {
        self.state.lock().await.received.clone()
    }
}

async fn ingest(
    State(state): State<Arc<Mutex<GraylogState>>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let reply = {
        let mut state = state.lock().await;
        state.received.push(ReceivedRequest {
            content_type: headers
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
        });
        state.replies.pop_front()
    };

    match reply {
        Some(Reply { status, delay }) => {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            status
        }
        None => StatusCode::ACCEPTED,
    }
}
