//! HTTP delivery to a Graylog GELF HTTP input.
//!
//! One `POST` per message with `Content-Type: application/json`. The whole
//! exchange, including reading the response body, is bounded by the
//! configured timeout. Any 2xx status counts as delivered; everything else
//! (other statuses, connection errors, timeouts) is a per-message failure that
//! is logged and reported as `false`.

use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Method, Request, StatusCode, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use thiserror::Error;

use log2gelf_core::{GelfMessage, GelfSender};

#[derive(Debug, Error)]
pub enum SenderError {
    #[error("invalid GELF endpoint {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Why a single delivery failed.
#[derive(Debug, Error)]
enum DeliveryError {
    #[error("failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to build request: {0}")]
    Request(#[from] hyper::http::Error),
    #[error("transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),
    #[error("failed to read response: {0}")]
    Body(#[from] hyper::Error),
    #[error("no response within {0:?}")]
    Timeout(Duration),
}

/// Posts GELF messages to a fixed URL.
#[derive(Debug, Clone)]
pub struct HttpGelfSender {
    url: Uri,
    timeout: Duration,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HttpGelfSender {
    /// `url` must be an absolute `http://` URL.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, SenderError> {
        let invalid = |reason: &str| SenderError::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        };
        let uri: Uri = url.trim().parse().map_err(|e: hyper::http::uri::InvalidUri| invalid(&e.to_string()))?;
        match uri.scheme_str() {
            Some("http") => {}
            Some(_) => return Err(invalid("only plain http:// endpoints are supported")),
            None => return Err(invalid("missing scheme")),
        }
        if uri.host().is_none() {
            return Err(invalid("missing host"));
        }

        let client = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self {
            url: uri,
            timeout,
            client,
        })
    }

    pub fn url(&self) -> &Uri {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn post(&self, message: &GelfMessage) -> Result<StatusCode, DeliveryError> {
        let body = serde_json::to_vec(message)?;
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(Full::new(Bytes::from(body)))?;

        let exchange = async {
            let response = self.client.request(request).await?;
            let status = response.status();
            // Drain the body so the connection can be reused.
            response.into_body().collect().await?;
            Ok::<_, DeliveryError>(status)
        };

        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| DeliveryError::Timeout(self.timeout))?
    }
}

impl GelfSender for HttpGelfSender {
    async fn send_one(&self, message: &GelfMessage) -> bool {
        tracing::debug!(
            url = %self.url,
            timeout_secs = self.timeout.as_secs_f64(),
            short_message = %message.short_message,
            "sending GELF message"
        );
        match self.post(message).await {
            Ok(status) if status.is_success() => {
                tracing::debug!(url = %self.url, %status, "GELF message delivered");
                true
            }
            Ok(status) => {
                tracing::warn!(
                    url = %self.url,
                    %status,
                    short_message = %message.short_message,
                    "GELF endpoint rejected message"
                );
                false
            }
            Err(e) => {
                tracing::warn!(
                    url = %self.url,
                    error = %e,
                    short_message = %message.short_message,
                    "failed to send GELF message"
                );
                false
            }
        }
    }
}
