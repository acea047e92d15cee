//! Checker registry and link classification.
//!
//! The [`CheckerRegistry`] holds provider checkers in registration order and
//! turns a link into a [`LinkStatus`] by delegating to the first checker
//! whose grammar accepts it.

use std::sync::Arc;

use tracing::{debug, info};

use crate::transport::Transport;

use super::{
    CheckError, GoogleDriveChecker, LinkChecker, LinkStatus, MegaChecker, ProbeOptions,
};

use super::{GOOGLE_DRIVE_BASE_URL, MEGA_API_URL};

/// Probe targets for the built-in checkers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerEndpoints {
    pub mega_api_url: String,
    pub google_drive_url: String,
}

impl Default for CheckerEndpoints {
    fn default() -> Self {
        Self {
            mega_api_url: MEGA_API_URL.to_string(),
            google_drive_url: GOOGLE_DRIVE_BASE_URL.to_string(),
        }
    }
}

/// Builds the default registry: MEGA, then Google Drive.
#[must_use]
pub fn build_default_checker_registry(transport: Arc<dyn Transport>) -> CheckerRegistry {
    build_checker_registry(transport, &CheckerEndpoints::default())
}

/// Builds the default checker set probing the given endpoints.
#[must_use]
pub fn build_checker_registry(
    transport: Arc<dyn Transport>,
    endpoints: &CheckerEndpoints,
) -> CheckerRegistry {
    let mut registry = CheckerRegistry::new();
    registry.register(Box::new(MegaChecker::with_api_base(
        transport.clone(),
        endpoints.mega_api_url.clone(),
    )));
    registry.register(Box::new(GoogleDriveChecker::with_base_url(
        transport,
        endpoints.google_drive_url.clone(),
    )));
    registry
}

/// An ordered collection of provider checkers.
///
/// Grammars of different providers do not overlap, so order only matters for
/// custom checkers registered on top of the defaults.
pub struct CheckerRegistry {
    checkers: Vec<Box<dyn LinkChecker>>,
}

impl CheckerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            checkers: Vec::new(),
        }
    }

    /// Registers a checker after those already present.
    #[tracing::instrument(skip(self, checker), fields(checker_name))]
    pub fn register(&mut self, checker: Box<dyn LinkChecker>) {
        tracing::Span::current().record("checker_name", checker.name());
        debug!(name = checker.name(), "Registering checker");
        self.checkers.push(checker);
    }

    /// Returns the number of registered checkers.
    #[must_use]
    pub fn checker_count(&self) -> usize {
        self.checkers.len()
    }

    /// Returns true if no checkers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    /// Returns the first checker whose grammar accepts `link`.
    #[must_use]
    pub fn find_checker(&self, link: &str) -> Option<&dyn LinkChecker> {
        self.checkers
            .iter()
            .find(|checker| checker.is_valid(link))
            .map(AsRef::as_ref)
    }

    /// Classifies a link.
    ///
    /// - no checker accepts the link → [`LinkStatus::Invalid`]
    /// - the accepting checker's probe returns `false` → [`LinkStatus::Offline`]
    /// - the probe returns `true` → [`LinkStatus::Online`]
    ///
    /// # Errors
    ///
    /// Probe failures (for example [`CheckError::ConnectionFailed`]) are
    /// returned unchanged; they are never folded into a status.
    #[tracing::instrument(skip(self, options), fields(link = %link))]
    pub async fn classify(
        &self,
        link: &str,
        options: &ProbeOptions,
    ) -> Result<LinkStatus, CheckError> {
        let Some(checker) = self.find_checker(link) else {
            debug!("No checker accepts link");
            return Ok(LinkStatus::Invalid);
        };

        debug!(checker = checker.name(), "Probing link");
        let status = if checker.is_online(link, options).await? {
            LinkStatus::Online
        } else {
            LinkStatus::Offline
        };

        info!(checker = checker.name(), status = %status, "Link classified");
        Ok(status)
    }
}

impl std::fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.checkers.iter().map(|c| c.name()).collect();
        f.debug_struct("CheckerRegistry")
            .field("checker_count", &self.checkers.len())
            .field("checkers", &names)
            .finish()
    }
}

impl Default for CheckerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
