//! Multi-valued, case-insensitive response header capture.

use std::collections::HashMap;

use reqwest::header::HeaderMap;
use serde::Serialize;

/// Response headers keyed by lower-cased name.
///
/// Repeated header names accumulate their values in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseHeaders {
    entries: HashMap<String, Vec<String>>,
}

impl ResponseHeaders {
    /// Creates an empty header set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one header value. The name is trimmed and lower-cased, the value trimmed.
    pub fn insert(&mut self, name: &str, value: &str) {
        self.entries
            .entry(name.trim().to_ascii_lowercase())
            .or_default()
            .push(value.trim().to_string());
    }

    /// Feeds one raw header line (`Name: value`).
    ///
    /// The line is split on the first colon only. Lines without a colon, such
    /// as the status line or the blank terminator, are ignored.
    pub fn push_line(&mut self, line: &str) {
        if let Some((name, value)) = line.split_once(':') {
            self.insert(name, value);
        }
    }

    /// Builds a header set from raw header lines.
    #[must_use]
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut headers = Self::new();
        for line in lines {
            headers.push_line(line);
        }
        headers
    }

    /// Builds a header set from a reqwest header map.
    ///
    /// Values that are not valid visible ASCII are decoded lossily.
    #[must_use]
    pub fn from_header_map(map: &HeaderMap) -> Self {
        let mut headers = Self::new();
        for (name, value) in map {
            let value = String::from_utf8_lossy(value.as_bytes());
            headers.insert(name.as_str(), &value);
        }
        headers
    }

    /// Returns every value recorded for `name`, in arrival order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries
            .get(&name.trim().to_ascii_lowercase())
            .map_or(&[], Vec::as_slice)
    }

    /// Returns the first value recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    /// Number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, values)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderValue, SET_COOKIE};

    use super::*;

    #[test]
    fn test_push_line_splits_on_first_colon_only() {
        let headers = ResponseHeaders::from_lines(["Location: https://mega.nz:443/file/abc"]);
        assert_eq!(headers.get("location"), Some("https://mega.nz:443/file/abc"));
    }

    #[test]
    fn test_lines_without_colon_are_ignored() {
        let headers = ResponseHeaders::from_lines(["HTTP/1.1 200 OK", "", "\r\n"]);
        assert!(headers.is_empty());
    }

    #[test]
    fn test_names_are_case_folded_and_values_trimmed() {
        let headers = ResponseHeaders::from_lines(["  Content-Type :  application/json \r\n"]);
        assert_eq!(headers.get("content-type"), Some("application/json"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));
    }

    #[test]
    fn test_repeated_names_accumulate_in_order() {
        let headers = ResponseHeaders::from_lines([
            "Set-Cookie: a=1",
            "X-Other: yes",
            "set-cookie: b=2",
        ]);
        assert_eq!(headers.get_all("set-cookie"), ["a=1", "b=2"]);
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_empty_value_is_kept() {
        let headers = ResponseHeaders::from_lines(["X-Empty:"]);
        assert_eq!(headers.get_all("x-empty"), [""]);
    }

    #[test]
    fn test_missing_header_returns_empty_slice() {
        let headers = ResponseHeaders::new();
        assert!(headers.get_all("location").is_empty());
        assert!(headers.get("location").is_none());
    }

    #[test]
    fn test_from_header_map_keeps_repeated_values() {
        let mut map = HeaderMap::new();
        map.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        map.append(SET_COOKIE, HeaderValue::from_static("b=2"));
        let headers = ResponseHeaders::from_header_map(&map);
        assert_eq!(headers.get_all("Set-Cookie"), ["a=1", "b=2"]);
    }
}
