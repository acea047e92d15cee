//! Batch classification of many links.
//!
//! Links are classified one after another. Repeated links are probed once and
//! reported once, at the position they were first seen. A probe error is kept
//! as that link's outcome and never stops the batch.

use std::collections::HashSet;

use serde::{Serialize, Serializer};
use serde::ser::SerializeStruct;
use tracing::{debug, info, warn};

use crate::checker::{CheckError, CheckerRegistry, LinkStatus, ProbeOptions};

/// Result of classifying one link.
pub type LinkOutcome = Result<LinkStatus, CheckError>;

/// One input link and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReport {
    pub link: String,
    pub outcome: LinkOutcome,
}

impl LinkReport {
    /// Returns the status, or `None` when the probe failed.
    #[must_use]
    pub fn status(&self) -> Option<LinkStatus> {
        self.outcome.as_ref().ok().copied()
    }
}

impl Serialize for LinkReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LinkReport", 2)?;
        state.serialize_field("link", &self.link)?;
        match &self.outcome {
            Ok(status) => state.serialize_field("status", status)?,
            Err(error) => state.serialize_field("error", &error.to_string())?,
        }
        state.end()
    }
}

/// Per-status counts of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub online: usize,
    pub offline: usize,
    pub invalid: usize,
    pub errors: usize,
}

impl BatchSummary {
    /// Total number of distinct links.
    #[must_use]
    pub fn total(&self) -> usize {
        self.online + self.offline + self.invalid + self.errors
    }
}

/// Outcomes of a batch in first-seen input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    links: Vec<LinkReport>,
}

impl BatchReport {
    /// Returns the outcome for `link`, if it was part of the batch.
    #[must_use]
    pub fn get(&self, link: &str) -> Option<&LinkOutcome> {
        self.links
            .iter()
            .find(|report| report.link == link)
            .map(|report| &report.outcome)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkReport> {
        self.links.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Returns `(link, status)` pairs for links that were classified.
    /// Failed probes are skipped.
    #[must_use]
    pub fn statuses(&self) -> Vec<(&str, LinkStatus)> {
        self.links
            .iter()
            .filter_map(|report| Some((report.link.as_str(), report.status()?)))
            .collect()
    }

    #[must_use]
    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for report in &self.links {
            match report.outcome {
                Ok(LinkStatus::Online) => summary.online += 1,
                Ok(LinkStatus::Offline) => summary.offline += 1,
                Ok(LinkStatus::Invalid) => summary.invalid += 1,
                Err(_) => summary.errors += 1,
            }
        }
        summary
    }
}

impl<'a> IntoIterator for &'a BatchReport {
    type Item = &'a LinkReport;
    type IntoIter = std::slice::Iter<'a, LinkReport>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

/// Classifies every link with `registry`.
///
/// Links are compared verbatim for de-duplication.
#[tracing::instrument(skip_all, fields(input_count = links.len()))]
pub async fn check_all<S: AsRef<str>>(
    registry: &CheckerRegistry,
    links: &[S],
    options: &ProbeOptions,
) -> BatchReport {
    let mut seen = HashSet::new();
    let mut report = BatchReport::default();

    for link in links.iter().map(AsRef::as_ref) {
        if !seen.insert(link) {
            debug!(link, "Skipping duplicate link");
            continue;
        }

        let outcome = registry.classify(link, options).await;
        if let Err(error) = &outcome {
            warn!(link, error = %error, "Link probe failed");
        }
        report.links.push(LinkReport {
            link: link.to_string(),
            outcome,
        });
    }

    let summary = report.summary();
    info!(
        total = summary.total(),
        online = summary.online,
        offline = summary.offline,
        invalid = summary.invalid,
        errors = summary.errors,
        "Batch complete"
    );
    report
}
