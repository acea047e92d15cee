//! Test doubles shared by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::transport::{
    ResponseHeaders, Transport, TransportError, TransportRequest, TransportResponse,
};

/// Transport that records every request and answers with a canned result.
pub struct StubTransport {
    reply: Result<TransportResponse, TransportError>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl StubTransport {
    /// Answers every request with `status` and `body`.
    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            reply: Ok(TransportResponse {
                status,
                body: body.to_string(),
                headers: ResponseHeaders::new(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails every request with `error`.
    pub fn failing(error: TransportError) -> Self {
        Self {
            reply: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of the requests seen so far.
    #[allow(clippy::unwrap_used)]
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl Transport for StubTransport {
    #[allow(clippy::unwrap_used)]
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone()
    }
}
