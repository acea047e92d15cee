//! `reqwest`-backed transport.
//!
//! [`HttpTransport`] builds its clients once and reuses them for every
//! request. Two clients are kept: one that verifies TLS certificates and one
//! that does not, so the per-request `verify_certificate` flag does not force
//! a client rebuild.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::user_agent;

use super::{ResponseHeaders, Transport, TransportError, TransportRequest, TransportResponse};

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default whole-request timeout in seconds.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Timeouts applied to every request made by an [`HttpTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

/// HTTP transport backed by `reqwest`.
///
/// # Example
///
/// ```no_run
/// use linkprobe_core::transport::{HttpTransport, Transport, TransportRequest};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = HttpTransport::new()?;
/// let response = transport
///     .request(TransportRequest::get("https://example.com"))
///     .await?;
/// println!("HTTP {} ({} bytes)", response.status, response.body.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    verifying: Client,
    insecure: Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Creates a transport with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(TransportConfig::default())
    }

    /// Creates a transport with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] if the TLS backend cannot be initialized.
    pub fn with_config(config: TransportConfig) -> Result<Self, TransportError> {
        let verifying = base_builder(&config).build().map_err(client_build_error)?;
        let insecure = base_builder(&config)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(client_build_error)?;
        Ok(Self {
            verifying,
            insecure,
            config,
        })
    }

    /// Returns the timeouts this transport was built with.
    #[must_use]
    pub fn config(&self) -> TransportConfig {
        self.config
    }

    fn client_for(&self, verify_certificate: bool) -> &Client {
        if verify_certificate {
            &self.verifying
        } else {
            &self.insecure
        }
    }
}

fn base_builder(config: &TransportConfig) -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.read_timeout_secs))
        .user_agent(user_agent::default_transport_user_agent())
        .gzip(true)
}

fn client_build_error(error: reqwest::Error) -> TransportError {
    TransportError::ClientBuild {
        reason: error.to_string(),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = Url::parse(&request.url).map_err(|_| TransportError::InvalidUrl {
            url: request.url.clone(),
        })?;
        let body = request.body()?;

        if !request.verify_certificate {
            warn!(url = %request.url, "TLS certificate verification disabled for request");
        }

        let mut builder = self
            .client_for(request.verify_certificate)
            .request(request.method.into(), url)
            .header(ACCEPT, "*/*");

        let body_bytes = body.as_ref().map_or(0, String::len);
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .header(CONTENT_LENGTH, body.len())
                .body(body);
        }

        if request.verbose {
            info!(
                method = %request.method,
                url = %request.url,
                body_bytes,
                verify_certificate = request.verify_certificate,
                "Sending request"
            );
        }

        let response = builder
            .send()
            .await
            .map_err(|error| TransportError::from_reqwest(&request.url, &error))?;

        let status = response.status().as_u16();
        let headers = ResponseHeaders::from_header_map(response.headers());

        if request.verbose {
            info!(status, "Received response headers");
            for (name, values) in headers.iter() {
                for value in values {
                    info!(header = name, value = %value, "Response header");
                }
            }
        }

        let body = response
            .text()
            .await
            .map_err(|error| TransportError::from_reqwest(&request.url, &error))?;

        debug!(status, body_bytes = body.len(), "Transport request complete");

        Ok(TransportResponse {
            status,
            body,
            headers,
        })
    }
}
