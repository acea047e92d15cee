//! Share-link validation and liveness probing.
//!
//! This module turns an arbitrary input string into a [`LinkStatus`]. Each
//! hosting provider is a [`LinkChecker`] that knows that provider's URL
//! grammars and how to ask its API whether a resource still exists.
//!
//! # Architecture
//!
//! - [`LinkChecker`] - Async trait that provider checkers implement
//! - [`CheckerRegistry`] - Ordered collection of checkers; picks the first
//!   checker whose grammar accepts a link and maps its probe to a status
//! - [`MegaChecker`] - MEGA file/folder links, legacy `#!`/`#F!` and current
//!   `/file/`/`/folder/` grammars
//! - [`GoogleDriveChecker`] - Google Drive file/folder links
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use linkprobe_core::checker::{ProbeOptions, build_default_checker_registry};
//! use linkprobe_core::transport::HttpTransport;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = build_default_checker_registry(Arc::new(HttpTransport::new()?));
//! let status = registry
//!     .classify("https://mega.nz/file/abcdefgh#key", &ProbeOptions::default())
//!     .await?;
//! println!("{status}");
//! # Ok(())
//! # }
//! ```

mod error;
mod google_drive;
mod mega;
mod registry;
mod utils;

pub use error::CheckError;
pub use google_drive::{GOOGLE_DRIVE_BASE_URL, GoogleDriveChecker};
pub use mega::{MEGA_API_URL, MegaChecker};
pub use registry::{
    CheckerEndpoints, CheckerRegistry, build_checker_registry, build_default_checker_registry,
};
pub use utils::{is_numeric_error_body, numeric_body_value};

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Terminal classification of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    /// The link matches no known provider grammar.
    Invalid,
    /// The link is well formed but the provider reports the resource gone.
    Offline,
    /// The resource exists.
    Online,
}

impl LinkStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Offline => "offline",
            Self::Online => "online",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of a provider's URL grammars a link uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkFormat {
    /// Historical grammar, still accepted by the provider.
    Legacy,
    /// Canonical grammar.
    Current,
}

/// What a link points at. Selects the liveness query to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    File,
    Folder,
}

impl ResourceKind {
    /// Path segment used by current-format links.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource identifier and optional decryption key extracted from a link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub id: String,
    /// Provider secret from the URL fragment, kept byte-for-byte.
    pub key: Option<String>,
}

impl ResourceRef {
    #[must_use]
    pub fn new(id: impl Into<String>, key: Option<String>) -> Self {
        Self { id: id.into(), key }
    }
}

/// Per-probe transport options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Verify TLS certificates. Disabling is opt-in.
    pub verify_certificate: bool,
    /// Log transport exchanges at `info` level.
    pub verbose: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            verify_certificate: true,
            verbose: false,
        }
    }
}

/// Capability set every provider checker implements.
///
/// Every operation other than [`is_valid`](Self::is_valid) re-checks validity
/// first and returns [`CheckError::InvalidLink`] for links outside the
/// provider's grammar.
///
/// # Object Safety
///
/// This trait uses `async_trait` so the registry can hold `Box<dyn LinkChecker>`.
#[async_trait]
pub trait LinkChecker: Send + Sync {
    /// Returns the checker's name (e.g. "mega", "google-drive").
    fn name(&self) -> &str;

    /// Returns true if the whole link matches one of the provider's grammars.
    fn is_valid(&self, link: &str) -> bool;

    /// Returns which grammar the link uses.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidLink`] if the link is not valid.
    fn format(&self, link: &str) -> Result<LinkFormat, CheckError>;

    /// Returns true if the link uses the current grammar.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidLink`] if the link is not valid.
    fn is_new_format(&self, link: &str) -> Result<bool, CheckError> {
        Ok(self.format(link)? == LinkFormat::Current)
    }

    /// Returns true if the link carries a non-empty decryption key.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidLink`] if the link is not valid.
    fn contains_key(&self, link: &str) -> Result<bool, CheckError>;

    /// Returns whether the link points at a file or a folder.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidLink`] if the link is not valid.
    fn resource_kind(&self, link: &str) -> Result<ResourceKind, CheckError>;

    /// Extracts the resource id and key. Identical for every encoding of the
    /// same resource.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidLink`] if the link is not valid.
    fn resource_ref(&self, link: &str) -> Result<ResourceRef, CheckError>;

    /// Rewrites a legacy link in the current grammar. Current links are
    /// returned trimmed and otherwise unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidLink`] if the link is not valid.
    fn to_current_format(&self, link: &str) -> Result<String, CheckError>;

    /// Asks the provider whether the linked resource exists.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidLink`] for invalid links and
    /// [`CheckError::ConnectionFailed`] when the provider cannot be reached or
    /// answers with an empty body.
    async fn is_online(&self, link: &str, options: &ProbeOptions) -> Result<bool, CheckError>;
}
