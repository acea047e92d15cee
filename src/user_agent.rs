//! Shared User-Agent string for transport requests.

/// Browser User-Agent sent on every probe.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Default User-Agent for transport requests.
#[must_use]
pub(crate) fn default_transport_user_agent() -> &'static str {
    BROWSER_USER_AGENT
}
