//! Single-shot HTTP transport used by the provider checkers.
//!
//! # Architecture
//!
//! - [`Transport`] - Async trait the checkers call; one request in, one response out
//! - [`HttpTransport`] - `reqwest`-backed implementation
//! - [`TransportRequest`] / [`TransportResponse`] - Exchange values
//! - [`ResponseHeaders`] - Case-insensitive, multi-valued header capture
//!
//! The transport never retries and never interprets response bodies.

mod client;
mod error;
mod headers;

pub use client::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, HttpTransport, TransportConfig,
};
pub use error::TransportError;
pub use headers::ResponseHeaders;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;

/// HTTP verbs accepted by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Returns the canonical upper-case verb.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = TransportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            "OPTIONS" => Ok(Self::Options),
            "HEAD" => Ok(Self::Head),
            _ => Err(TransportError::invalid_method(value.trim())),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Options => Self::OPTIONS,
            HttpMethod::Head => Self::HEAD,
        }
    }
}

/// A single outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub url: String,
    pub method: HttpMethod,
    /// JSON payload; only sent for non-GET methods and only when non-empty.
    pub payload: Option<Value>,
    /// Verify the TLS peer certificate and host name. Disabling is opt-in.
    pub verify_certificate: bool,
    /// Log the exchange at `info` level.
    pub verbose: bool,
}

impl TransportRequest {
    /// Creates a request with certificate verification on and no payload.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            payload: None,
            verify_certificate: true,
            verbose: false,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a POST request carrying a JSON payload.
    #[must_use]
    pub fn post_json(url: impl Into<String>, payload: Value) -> Self {
        Self::new(HttpMethod::Post, url).with_payload(payload)
    }

    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    #[must_use]
    pub fn verify_certificate(mut self, verify: bool) -> Self {
        self.verify_certificate = verify;
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns the serialized request body, if one should be sent.
    ///
    /// GET requests never carry a body. Empty payloads (`null`, `false`, `0`,
    /// empty string, empty array or object) are not sent either.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Serialize`] if the payload cannot be encoded.
    pub fn body(&self) -> Result<Option<String>, TransportError> {
        if self.method == HttpMethod::Get {
            return Ok(None);
        }
        match &self.payload {
            Some(payload) if !is_empty_payload(payload) => serde_json::to_string(payload)
                .map(Some)
                .map_err(|error| TransportError::Serialize {
                    reason: error.to_string(),
                }),
            _ => Ok(None),
        }
    }
}

fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty() || text == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Raw result of a transport request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as text. Empty when the server sent nothing.
    pub body: String,
    pub headers: ResponseHeaders,
}

impl TransportResponse {
    /// Returns true if the server sent no body at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Issues one HTTP request and returns the raw response.
///
/// This trait uses `async_trait` so checkers can hold an `Arc<dyn Transport>`
/// and tests can substitute canned responses.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` once.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the request cannot be built or no
    /// response is received. HTTP error statuses are not errors.
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
