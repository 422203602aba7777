//! Field validators for request forms
//!
//! Predicates shared by the form types in `forms`.

use lazy_static::lazy_static;
use regex::Regex;

use super::uri::check_uri_reference;

lazy_static! {
    /// Slug pattern: lowercase alphanumerics, '-' and '_', at least 3 characters
    static ref SLUG_REGEX: Regex = Regex::new(r"^[-_0-9a-z]{3,}$").unwrap();
}

/// Check that a value is a slug. No trimming or case folding is applied.
pub fn is_slug(value: &str) -> bool {
    SLUG_REGEX.is_match(value)
}

/// Check that a value parses as a URI reference (absolute or relative).
///
/// This is a structural check only: plenty of accepted values, such as
/// `"prometheus"`, are relative references that are useless as addresses.
pub fn is_uri_reference(value: &str) -> bool {
    check_uri_reference(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_slug() {
        assert!(is_slug("abc"));
        assert!(is_slug("my-project_1"));
        assert!(is_slug("---"));
        assert!(is_slug("007"));

        // too short
        assert!(!is_slug(""));
        assert!(!is_slug("ab"));

        // outside the alphabet
        assert!(!is_slug("MyProject"));
        assert!(!is_slug("my project"));
        assert!(!is_slug("my.project"));
        assert!(!is_slug("проект"));
    }

    #[test]
    fn test_is_slug_does_not_normalize() {
        assert!(!is_slug(" abc"));
        assert!(!is_slug("abc\n"));
        assert!(!is_slug("ABC"));
    }

    #[test]
    fn test_is_uri_reference_accepts_absolute_and_relative() {
        assert!(is_uri_reference("http://prom:9090"));
        assert!(is_uri_reference("https://prometheus.example.com/api/v1"));
        assert!(is_uri_reference("http://127.0.0.1:9090/?q=%20up"));
        assert!(is_uri_reference("http://prom:99999"));
        assert!(is_uri_reference("http://prom:9090/?q=%zz"));
        assert!(is_uri_reference("prometheus"));
        assert!(is_uri_reference("/api/v1/query"));
        assert!(is_uri_reference(""));
    }

    #[test]
    fn test_is_uri_reference_rejects_malformed() {
        assert!(!is_uri_reference("http://[::1"));
        assert!(!is_uri_reference("http://pro m:9090"));
        assert!(!is_uri_reference("://prom:9090"));
        assert!(!is_uri_reference("127.0.0.1:9090"));
        assert!(!is_uri_reference("prom_1:9090"));
        assert!(!is_uri_reference("http://prom:9090 "));
        assert!(!is_uri_reference(" http://prom:9090"));
        assert!(!is_uri_reference("http://prom/%zz"));
        assert!(!is_uri_reference("http://prom/%4"));
        assert!(!is_uri_reference("http://prom\n:9090"));
    }
}
