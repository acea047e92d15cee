//! Google Drive checker for file and folder share links.
//!
//! Drive links carry no decryption key. Unlike MEGA, Drive answers a probe
//! for a missing resource with an HTTP 404, so liveness is read from the
//! status code.

use std::fmt;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use crate::transport::{Transport, TransportRequest};

use super::utils::compile_static_regex;
use super::{CheckError, LinkChecker, LinkFormat, ProbeOptions, ResourceKind, ResourceRef};

/// Default Google Drive base URL.
pub const GOOGLE_DRIVE_BASE_URL: &str = "https://drive.google.com";

static FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r"^https://drive\.google\.com/file/d/([a-zA-Z0-9_-]{33})(?:/(?:view|edit|preview))?(?:\?usp=sharing)?$",
    )
});

static FOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r"^https://drive\.google\.com/drive/folders/([a-zA-Z0-9_-]{33})(?:\?usp=sharing)?$",
    )
});

static LEGACY_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r"^https://drive\.google\.com/open\?id=([a-zA-Z0-9_-]{33})$")
});

static LEGACY_FOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r"^https://drive\.google\.com/folderview\?id=([a-zA-Z0-9_-]{33})$")
});

struct DriveLink<'a> {
    format: LinkFormat,
    kind: ResourceKind,
    id: &'a str,
}

impl<'a> DriveLink<'a> {
    fn parse(link: &'a str) -> Option<Self> {
        let grammars: [(&Regex, LinkFormat, ResourceKind); 4] = [
            (&*FILE_RE, LinkFormat::Current, ResourceKind::File),
            (&*FOLDER_RE, LinkFormat::Current, ResourceKind::Folder),
            (&*LEGACY_FILE_RE, LinkFormat::Legacy, ResourceKind::File),
            (&*LEGACY_FOLDER_RE, LinkFormat::Legacy, ResourceKind::Folder),
        ];
        grammars.into_iter().find_map(|(regex, format, kind)| {
            let id = regex.captures(link)?.get(1)?.as_str();
            Some(Self { format, kind, id })
        })
    }
}

/// Checker for Google Drive share links.
pub struct GoogleDriveChecker {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl GoogleDriveChecker {
    /// Creates a checker that probes the public Drive host.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_base_url(transport, GOOGLE_DRIVE_BASE_URL)
    }

    /// Creates a checker that probes a custom host (for tests).
    ///
    /// Only the probe target changes; link grammars always expect
    /// `drive.google.com`.
    #[must_use]
    pub fn with_base_url(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    fn parse<'a>(&self, link: &'a str) -> Result<DriveLink<'a>, CheckError> {
        DriveLink::parse(link).ok_or_else(|| CheckError::invalid_link(link))
    }

    fn canonical_path(kind: ResourceKind, id: &str) -> String {
        match kind {
            ResourceKind::File => format!("/file/d/{id}/view"),
            ResourceKind::Folder => format!("/drive/folders/{id}"),
        }
    }
}

impl fmt::Debug for GoogleDriveChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleDriveChecker")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LinkChecker for GoogleDriveChecker {
    fn name(&self) -> &'static str {
        "google-drive"
    }

    fn is_valid(&self, link: &str) -> bool {
        DriveLink::parse(link).is_some()
    }

    fn format(&self, link: &str) -> Result<LinkFormat, CheckError> {
        Ok(self.parse(link)?.format)
    }

    fn contains_key(&self, link: &str) -> Result<bool, CheckError> {
        self.parse(link)?;
        Ok(false)
    }

    fn resource_kind(&self, link: &str) -> Result<ResourceKind, CheckError> {
        Ok(self.parse(link)?.kind)
    }

    fn resource_ref(&self, link: &str) -> Result<ResourceRef, CheckError> {
        Ok(ResourceRef::new(self.parse(link)?.id, None))
    }

    fn to_current_format(&self, link: &str) -> Result<String, CheckError> {
        let parsed = self.parse(link)?;
        if parsed.format == LinkFormat::Current {
            return Ok(link.trim().to_string());
        }
        Ok(format!(
            "{GOOGLE_DRIVE_BASE_URL}{}",
            Self::canonical_path(parsed.kind, parsed.id)
        ))
    }

    #[tracing::instrument(skip(self, options), fields(checker = "google-drive", link = %link))]
    async fn is_online(&self, link: &str, options: &ProbeOptions) -> Result<bool, CheckError> {
        let parsed = self.parse(link)?;
        let url = format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            Self::canonical_path(parsed.kind, parsed.id)
        );
        let request = TransportRequest::get(url)
            .verify_certificate(options.verify_certificate)
            .verbose(options.verbose);

        debug!(id = parsed.id, kind = %parsed.kind, "Probing Google Drive");
        let response = self
            .transport
            .request(request)
            .await
            .map_err(|error| CheckError::from_transport(link, error))?;

        match response.status {
            404 | 410 => Ok(false),
            200..=399 if response.is_empty() => Err(CheckError::connection_failed(
                link,
                "Google Drive returned an empty response",
            )),
            200..=399 => Ok(true),
            status => Err(CheckError::UnexpectedStatus {
                link: link.to_string(),
                status,
            }),
        }
    }
}
