use serde::{Deserialize, Serialize};

/// Why a piece of address-bar text resolved to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// The text looked like a URL and was used, scheme-completed if needed.
    ExplicitUrl,
    /// The text was a local address (IP, localhost, or `host:port`).
    LocalAddress,
    /// The text was turned into a search-engine query.
    SearchQuery,
}

/// A fully-qualified destination computed from address-bar text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTarget {
    pub url: String,
    pub resolution: Resolution,
}

impl NavigationTarget {
    pub fn new(url: impl Into<String>, resolution: Resolution) -> Self {
        Self {
            url: url.into(),
            resolution,
        }
    }

    /// Target for a URL the caller already knows is absolute.
    pub fn explicit(url: impl Into<String>) -> Self {
        Self::new(url, Resolution::ExplicitUrl)
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}
