//! Attack-pattern screening.
//!
//! Inspects the decoded path and query string plus the `User-Agent` and
//! `Referer` headers for common injection payloads. Inputs are
//! percent-decoded up to twice so that `%253C` is seen as `<`.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::RegexSet;

use crate::request::RequestMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShieldSignal {
    SqlInjection,
    CrossSiteScripting,
    PathTraversal,
    CommandInjection,
}

impl ShieldSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShieldSignal::SqlInjection => "sql_injection",
            ShieldSignal::CrossSiteScripting => "xss",
            ShieldSignal::PathTraversal => "path_traversal",
            ShieldSignal::CommandInjection => "command_injection",
        }
    }
}

impl fmt::Display for ShieldSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Each pattern paired with the signal it raises. Checked in order; the
/// first match wins.
const RULES: &[(ShieldSignal, &str)] = &[
    (ShieldSignal::SqlInjection, r"(?i)\bunion\b[\s/*+]+(all[\s/*+]+)?select\b"),
    (ShieldSignal::SqlInjection, r"(?i)'\s*(or|and)\s+'?\w+'?\s*=\s*'?\w+"),
    (ShieldSignal::SqlInjection, r"(?i)'\s*;\s*(drop|delete|insert|update|truncate|alter)\s"),
    (ShieldSignal::SqlInjection, r"(?i)\b(sleep|benchmark|pg_sleep)\s*\(\s*\d"),
    (ShieldSignal::SqlInjection, r"(?i)'\s*--"),
    (ShieldSignal::SqlInjection, r"(?i)\binformation_schema\b"),
    (ShieldSignal::CrossSiteScripting, r"(?i)<\s*script\b"),
    (ShieldSignal::CrossSiteScripting, r"(?i)\bjavascript\s*:"),
    (ShieldSignal::CrossSiteScripting, r"(?i)\bon(error|load|click|mouseover|focus)\s*="),
    (ShieldSignal::CrossSiteScripting, r"(?i)<\s*(iframe|object|embed|svg)\b"),
    (ShieldSignal::PathTraversal, r"\.\.[/\\]"),
    (ShieldSignal::PathTraversal, r"(?i)/etc/(passwd|shadow|hosts)\b"),
    (ShieldSignal::PathTraversal, r"(?i)[a-z]:\\windows\\"),
    (ShieldSignal::CommandInjection, r"(?i)(;|\|\|?|&&|`)\s*(cat|ls|id|whoami|uname|wget|curl|nc|bash|sh)\b"),
    (ShieldSignal::CommandInjection, r"\$\([^)]*\)"),
];

static PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(RULES.iter().map(|(_, pattern)| *pattern))
        .unwrap_or_else(|err| panic!("invalid shield pattern: {err}"))
});

#[derive(Debug, Clone, Copy, Default)]
pub struct Shield;

impl Shield {
    pub fn new() -> Self {
        Self
    }

    pub fn inspect(&self, meta: &RequestMeta) -> Option<ShieldSignal> {
        let target = match &meta.query {
            Some(query) => Cow::Owned(format!("{}?{}", meta.path, query)),
            None => Cow::Borrowed(meta.path.as_str()),
        };

        [
            Some(target.as_ref()),
            meta.user_agent.as_deref(),
            meta.referer.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find_map(|raw| self.scan(raw))
    }

    /// Scans a single input.
    pub fn scan(&self, raw: &str) -> Option<ShieldSignal> {
        let once = decode(raw);
        let twice = decode(&once);
        let input = twice.replace('+', " ");

        PATTERNS
            .matches(&input)
            .iter()
            .next()
            .map(|index| RULES[index].0)
    }
}

fn decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(path: &str, query: Option<&str>) -> RequestMeta {
        let meta = RequestMeta::new("1.2.3.4", "GET", path).with_user_agent("Mozilla/5.0");
        match query {
            Some(q) => meta.with_query(q),
            None => meta,
        }
    }

    #[test]
    fn test_patterns_compile() {
        assert_eq!(PATTERNS.len(), RULES.len());
    }

    #[test]
    fn test_clean_requests_pass() {
        let shield = Shield::new();
        assert_eq!(shield.inspect(&meta("/api/users", None)), None);
        assert_eq!(shield.inspect(&meta("/api/users/12", Some("sort=name&page=2"))), None);
        assert_eq!(shield.inspect(&meta("/health", None)), None);
        assert_eq!(shield.inspect(&meta("/api/users", Some("page=2&id=5"))), None);
    }

    #[test]
    fn test_sql_injection() {
        let shield = Shield::new();
        assert_eq!(
            shield.inspect(&meta("/api/users", Some("id=1%20UNION%20SELECT%20password"))),
            Some(ShieldSignal::SqlInjection)
        );
        assert_eq!(
            shield.inspect(&meta("/api/users", Some("name=%27%20OR%20%271%27%3D%271"))),
            Some(ShieldSignal::SqlInjection)
        );
    }

    #[test]
    fn test_xss() {
        let shield = Shield::new();
        assert_eq!(
            shield.inspect(&meta("/api", Some("q=%3Cscript%3Ealert(1)%3C/script%3E"))),
            Some(ShieldSignal::CrossSiteScripting)
        );
    }

    #[test]
    fn test_double_encoded_payload() {
        let shield = Shield::new();
        assert_eq!(
            shield.inspect(&meta("/api", Some("q=%253Cscript%253E"))),
            Some(ShieldSignal::CrossSiteScripting)
        );
    }

    #[test]
    fn test_path_traversal() {
        let shield = Shield::new();
        assert_eq!(
            shield.inspect(&meta("/api/%2e%2e/%2e%2e/etc/passwd", None)),
            Some(ShieldSignal::PathTraversal)
        );
    }

    #[test]
    fn test_command_injection() {
        let shield = Shield::new();
        assert_eq!(
            shield.inspect(&meta("/api", Some("host=example.com%3Bwhoami"))),
            Some(ShieldSignal::CommandInjection)
        );
    }

    #[test]
    fn test_headers_are_inspected() {
        let shield = Shield::new();
        let request = RequestMeta::new("1.2.3.4", "GET", "/api")
            .with_user_agent("Mozilla/5.0")
            .with_referer("https://evil.example/?x=<script>");
        assert_eq!(
            shield.inspect(&request),
            Some(ShieldSignal::CrossSiteScripting)
        );
    }
}
