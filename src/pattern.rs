//! Regular expression helpers for the string and numeric format checks.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::warn;

pub(crate) const EMAIL: &str = r"^([a-zA-Z0-9._%-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})$";
pub(crate) const ALPHA: &str = r"^[a-zA-Z]+$";
pub(crate) const ALPHA_NUMERIC: &str = r"^[a-zA-Z0-9]+$";

// Compiled patterns, shared by every validation call.
static REGEX_CACHE: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Test `text` against `pattern`.
///
/// Returns `None` if the pattern doesn't compile; callers treat that as a
/// failed check.
pub(crate) fn matches(pattern: &str, text: &str) -> Option<bool> {
    // A panic elsewhere can't leave the cache inconsistent, so ignore poison.
    let mut cache = match REGEX_CACHE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(re) = cache.get(pattern) {
        return Some(re.is_match(text));
    }
    match Regex::new(pattern) {
        Ok(re) => {
            let result = re.is_match(text);
            cache.insert(pattern.to_string(), re);
            Some(result)
        }
        Err(e) => {
            warn!(pattern, error = %e, "invalid regex");
            None
        }
    }
}

/// The URL pattern accepting the given schemes.
pub(crate) fn url(schemes: &[&str]) -> String {
    format!(
        r"^(({})://)[-a-zA-Z0-9@:%._\\+~#?&/=]{{2,256}}\.[a-z]{{2,6}}\b([-a-zA-Z0-9@:%._\\+~#?&/=]*)$",
        schemes.join("|")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats() {
        assert_eq!(matches(EMAIL, "tono@example.com"), Some(true));
        assert_eq!(matches(EMAIL, "tono@example"), Some(false));
        assert_eq!(matches(ALPHA, "abcXYZ"), Some(true));
        assert_eq!(matches(ALPHA, "abc1"), Some(false));
        assert_eq!(matches(ALPHA_NUMERIC, "abc1"), Some(true));
        assert_eq!(matches(ALPHA_NUMERIC, "abc-1"), Some(false));
    }

    #[test]
    fn urls() {
        let both = url(&["http", "https"]);
        assert_eq!(matches(&both, "http://www.ada.com"), Some(true));
        assert_eq!(matches(&both, "https://ada.com/path?q=1"), Some(true));
        assert_eq!(matches(&both, "ftp://ada.com"), Some(false));
        assert_eq!(matches(&both, "www.ada.com"), Some(false));

        let https = url(&["https"]);
        assert_eq!(matches(&https, "http://www.ada.com"), Some(false));
        assert_eq!(matches(&https, "https://www.ada.com"), Some(true));
    }

    #[test]
    fn bad_pattern() {
        assert_eq!(matches("p([a-z]+ch", "peach"), None);
        assert_eq!(matches("p([a-z]+)ch", "peach"), Some(true));
    }
}
