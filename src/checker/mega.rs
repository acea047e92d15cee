//! MEGA checker for legacy (`#!`, `#F!`) and current (`/file/`, `/folder/`)
//! share links.
//!
//! Liveness is asked of the MEGA command API. A missing resource
//! is signalled by a bare non-positive integer body instead of a
//! JSON payload, so the body is sniffed as untyped text.

use std::fmt;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::transport::{Transport, TransportError, TransportRequest};

use super::utils::{compile_static_regex, numeric_body_value, request_nonce};
use super::{CheckError, LinkChecker, LinkFormat, ProbeOptions, ResourceKind, ResourceRef};

/// Default MEGA command API base URL.
pub const MEGA_API_URL: &str = "https://g.api.mega.co.nz";

const MEGA_LINK_BASE: &str = "https://mega.nz";

/// `https://mega.nz/#!<id>[!<key>]` (file) or `https://mega.nz/#F!<id>[!<key>]` (folder).
static LEGACY_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r"^https://mega\.nz/#(F?)!([a-zA-Z0-9]{8})(?:!([a-zA-Z0-9_-]*))?$")
});

/// `https://mega.nz/(file|folder)/<id>[#<key>]`.
static CURRENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r"^https://mega\.nz/(file|folder)/([a-zA-Z0-9]{8})(?:#([a-zA-Z0-9_-]*))?$")
});

/// Fields of a link matched by one of the grammars.
struct MegaLink<'a> {
    format: LinkFormat,
    kind: ResourceKind,
    id: &'a str,
    /// `None` when the key separator is absent; `Some("")` when present but empty.
    key: Option<&'a str>,
}

impl<'a> MegaLink<'a> {
    fn parse(link: &'a str) -> Option<Self> {
        if let Some(caps) = CURRENT_RE.captures(link) {
            let kind = if &caps[1] == "folder" {
                ResourceKind::Folder
            } else {
                ResourceKind::File
            };
            return Some(Self {
                format: LinkFormat::Current,
                kind,
                id: caps.get(2)?.as_str(),
                key: caps.get(3).map(|m| m.as_str()),
            });
        }

        let caps = LEGACY_RE.captures(link)?;
        let kind = if caps[1].is_empty() {
            ResourceKind::File
        } else {
            ResourceKind::Folder
        };
        Some(Self {
            format: LinkFormat::Legacy,
            kind,
            id: caps.get(2)?.as_str(),
            key: caps.get(3).map(|m| m.as_str()),
        })
    }

    fn non_empty_key(&self) -> Option<&'a str> {
        self.key.filter(|key| !key.is_empty())
    }
}

/// Checker for MEGA share links.
pub struct MegaChecker {
    transport: Arc<dyn Transport>,
    api_base: String,
}

impl MegaChecker {
    /// Creates a checker that talks to the public MEGA API.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_api_base(transport, MEGA_API_URL)
    }

    /// Creates a checker with a custom API base URL (for tests or proxies).
    #[must_use]
    pub fn with_api_base(transport: Arc<dyn Transport>, api_base: impl Into<String>) -> Self {
        Self {
            transport,
            api_base: api_base.into(),
        }
    }

    /// Returns the API base URL in use.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn parse<'a>(&self, link: &'a str) -> Result<MegaLink<'a>, CheckError> {
        MegaLink::parse(link).ok_or_else(|| CheckError::invalid_link(link))
    }

    /// Splits the last path segment of a current-format link on `#`.
    fn split_current(link: &str) -> Result<ResourceRef, CheckError> {
        let last = link
            .rsplit('/')
            .next()
            .ok_or_else(|| CheckError::invalid_link(link))?;
        let reference = match last.split_once('#') {
            Some((id, key)) => {
                ResourceRef::new(id, (!key.is_empty()).then(|| key.to_string()))
            }
            None => ResourceRef::new(last, None),
        };
        Ok(reference)
    }

    fn endpoint(&self, id: &str) -> Result<Url, TransportError> {
        let raw = format!("{}/cs", self.api_base.trim_end_matches('/'));
        let mut url = Url::parse(&raw).map_err(|_| TransportError::InvalidUrl { url: raw })?;
        url.query_pairs_mut()
            .append_pair("id", &request_nonce())
            .append_pair("n", id);
        Ok(url)
    }

    fn command(kind: ResourceKind, id: &str) -> Value {
        match kind {
            ResourceKind::Folder => json!({ "a": "f", "c": 1, "r": 1, "ca": 1 }),
            ResourceKind::File => json!({ "a": "g", "p": id }),
        }
    }
}

impl fmt::Debug for MegaChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MegaChecker")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LinkChecker for MegaChecker {
    fn name(&self) -> &'static str {
        "mega"
    }

    fn is_valid(&self, link: &str) -> bool {
        MegaLink::parse(link).is_some()
    }

    fn format(&self, link: &str) -> Result<LinkFormat, CheckError> {
        Ok(self.parse(link)?.format)
    }

    fn contains_key(&self, link: &str) -> Result<bool, CheckError> {
        Ok(self.parse(link)?.non_empty_key().is_some())
    }

    fn resource_kind(&self, link: &str) -> Result<ResourceKind, CheckError> {
        let current = self.to_current_format(link)?;
        Ok(self.parse(&current)?.kind)
    }

    fn resource_ref(&self, link: &str) -> Result<ResourceRef, CheckError> {
        let current = self.to_current_format(link)?;
        Self::split_current(&current)
    }

    fn to_current_format(&self, link: &str) -> Result<String, CheckError> {
        let parsed = self.parse(link)?;
        if parsed.format == LinkFormat::Current {
            return Ok(link.trim().to_string());
        }

        let mut converted = format!("{MEGA_LINK_BASE}/{}/{}", parsed.kind, parsed.id);
        if let Some(key) = parsed.non_empty_key() {
            converted.push('#');
            converted.push_str(key);
        }
        Ok(converted)
    }

    #[tracing::instrument(skip(self, options), fields(checker = "mega", link = %link))]
    async fn is_online(&self, link: &str, options: &ProbeOptions) -> Result<bool, CheckError> {
        let ResourceRef { id, .. } = self.resource_ref(link)?;
        let kind = self.resource_kind(link)?;

        let url = self.endpoint(&id)?;
        let request = TransportRequest::post_json(url.as_str(), json!([Self::command(kind, &id)]))
            .verify_certificate(options.verify_certificate)
            .verbose(options.verbose);

        debug!(id = %id, kind = %kind, "Probing MEGA API");
        let response = self
            .transport
            .request(request)
            .await
            .map_err(|error| CheckError::from_transport(link, error))?;

        if response.is_empty() {
            return Err(CheckError::connection_failed(
                link,
                "MEGA API returned an empty response",
            ));
        }

        if let Some(code) = numeric_body_value(&response.body)
            && code <= 0
        {
            debug!(code, "MEGA API reported resource unavailable");
            return Ok(false);
        }

        Ok(true)
    }
}
