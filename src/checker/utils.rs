//! Shared helpers for checker modules: static regex compilation, numeric body
//! sniffing and the request nonce.

use rand::Rng;
use regex::Regex;

/// Compiles a regex at static init; panics on invalid pattern.
pub fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// Returns the integer value of a purely numeric body, truncated toward zero.
///
/// Accepts surrounding whitespace, an optional sign, a decimal part and an
/// exponent (`-9`, ` 0 `, `-2.5`, `1e3`). Returns `None` for anything else,
/// including JSON arrays and objects such as `[-9]`.
#[must_use]
pub fn numeric_body_value(body: &str) -> Option<i64> {
    let trimmed = body.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(is_numeric_byte) {
        return None;
    }
    let value: f64 = trimmed.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(value.trunc() as i64)
}

fn is_numeric_byte(byte: u8) -> bool {
    byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'.' | b'e' | b'E')
}

/// Returns true if the body is a bare numeric error code (zero or negative).
#[must_use]
pub fn is_numeric_error_body(body: &str) -> bool {
    numeric_body_value(body).is_some_and(|code| code <= 0)
}

/// Random 10-digit request id for API calls.
#[must_use]
pub fn request_nonce() -> String {
    let value: u64 = rand::thread_rng().gen_range(1_000_000_000..10_000_000_000);
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_body_value_parses_integers() {
        assert_eq!(numeric_body_value("-9"), Some(-9));
        assert_eq!(numeric_body_value("0"), Some(0));
        assert_eq!(numeric_body_value(" 42\n"), Some(42));
        assert_eq!(numeric_body_value("+3"), Some(3));
    }

    #[test]
    fn test_numeric_body_value_truncates_decimals() {
        assert_eq!(numeric_body_value("-0.5"), Some(0));
        assert_eq!(numeric_body_value("1.9"), Some(1));
        assert_eq!(numeric_body_value("-2e1"), Some(-20));
    }

    #[test]
    fn test_numeric_body_value_rejects_structured_bodies() {
        assert_eq!(numeric_body_value("[-9]"), None);
        assert_eq!(numeric_body_value(r#"{"s":123}"#), None);
        assert_eq!(numeric_body_value(""), None);
        assert_eq!(numeric_body_value("   "), None);
        assert_eq!(numeric_body_value("-"), None);
        assert_eq!(numeric_body_value("e"), None);
        assert_eq!(numeric_body_value("12abc"), None);
    }

    #[test]
    fn test_is_numeric_error_body() {
        assert!(is_numeric_error_body("-9"));
        assert!(is_numeric_error_body("-2"));
        assert!(is_numeric_error_body("0"));
        assert!(!is_numeric_error_body("1"));
        assert!(!is_numeric_error_body(r#"[{"s":1024,"at":"xyz"}]"#));
    }

    #[test]
    fn test_request_nonce_is_ten_digits() {
        for _ in 0..32 {
            let nonce = request_nonce();
            assert_eq!(nonce.len(), 10, "nonce {nonce} must be 10 digits");
            assert!(nonce.bytes().all(|b| b.is_ascii_digit()));
        }
    }
}
