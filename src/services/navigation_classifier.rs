//! Address-bar text → navigation target.
//!
//! Purely local string heuristics: no DNS lookups, no reachability checks.
//! Rules are applied in a fixed order and the first match wins:
//!
//! 1. local addresses (`ip:port`, `localhost:port`, `host:port`, bare ip,
//!    bare `localhost`) get `http://` and are final;
//! 2. text with whitespace, or without any URL indicator, becomes a search;
//! 3. everything else gets `https://` unless it already carries a scheme.

use std::sync::LazyLock;

use regex::Regex;
use url::form_urlencoded;

use crate::types::navigation::{NavigationTarget, Resolution};
use crate::types::settings::DEFAULT_SEARCH_URL;

/// Local-address patterns, highest priority first.
static LOCAL_ADDRESS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^\d+\.\d+\.\d+\.\d+:\d+$",
        r"^localhost:\d+$",
        r"^[\w\-]+:\d+$",
        r"^\d+\.\d+\.\d+\.\d+$",
        r"^localhost$",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Substrings that make whitespace-free text count as a URL.
const URL_INDICATORS: &[&str] = &[
    ".com", ".org", ".net", ".br", ".io", ".gov", ".edu", "localhost", "http", "https", "www.",
    "ftp:",
];

/// Schemes that are kept as typed.
const KNOWN_SCHEMES: &[&str] = &["http://", "https://", "ftp://", "file://"];

/// Classifies address-bar text using a configurable search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationClassifier {
    search_url: String,
}

impl NavigationClassifier {
    /// `search_url` is the prefix the encoded query is appended to,
    /// e.g. `https://duckduckgo.com/?q=`.
    pub fn new(search_url: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
        }
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// Resolves trimmed, non-empty address-bar text to a target.
    ///
    /// Empty text means "go home" and must be handled by the caller.
    pub fn classify(&self, text: &str) -> NavigationTarget {
        debug_assert!(!text.trim().is_empty(), "empty input must go home instead");

        if is_local_address(text) {
            let url = if has_prefix_ignore_case(text, "http://")
                || has_prefix_ignore_case(text, "https://")
            {
                text.to_string()
            } else {
                format!("http://{}", text)
            };
            return NavigationTarget::new(url, Resolution::LocalAddress);
        }

        if text.chars().any(char::is_whitespace) || !looks_like_url(text) {
            return self.search(text);
        }

        if KNOWN_SCHEMES
            .iter()
            .any(|scheme| has_prefix_ignore_case(text, scheme))
        {
            NavigationTarget::new(text, Resolution::ExplicitUrl)
        } else {
            NavigationTarget::new(format!("https://{}", text), Resolution::ExplicitUrl)
        }
    }

    /// Builds a search-engine target for `query`; spaces become `+`.
    pub fn search(&self, query: &str) -> NavigationTarget {
        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        NavigationTarget::new(
            format!("{}{}", self.search_url, encoded),
            Resolution::SearchQuery,
        )
    }
}

impl Default for NavigationClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_URL)
    }
}

/// Classifies `text` with the default search engine.
pub fn classify(text: &str) -> NavigationTarget {
    NavigationClassifier::default().classify(text)
}

fn is_local_address(text: &str) -> bool {
    LOCAL_ADDRESS_PATTERNS.iter().any(|re| re.is_match(text))
}

fn looks_like_url(text: &str) -> bool {
    let lower = text.to_lowercase();
    URL_INDICATORS
        .iter()
        .any(|indicator| lower.contains(indicator))
}

fn has_prefix_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}
