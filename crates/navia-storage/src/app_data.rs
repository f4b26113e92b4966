//! Persisted browsing data

use serde::{Deserialize, Serialize};

/// Homepage used when nothing else is configured
pub const DEFAULT_HOMEPAGE: &str = "https://duckduckgo.com";

/// The browsing data document.
///
/// Every field is required on disk. A document missing any of them is
/// rejected as a whole and replaced by [`AppData::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppData {
    /// Visited URLs, most recent last
    pub history: Vec<String>,
    /// Bookmarked URLs in insertion order
    pub bookmarks: Vec<String>,
    /// Page loaded by new tabs and the home button
    pub homepage: String,
    /// Proxy URI for new tabs, empty when unset
    pub proxy: String,
}

impl AppData {
    /// Proxy string with surrounding whitespace removed, `None` when unset
    pub fn proxy(&self) -> Option<&str> {
        let proxy = self.proxy.trim();
        (!proxy.is_empty()).then_some(proxy)
    }
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            history: Vec::new(),
            bookmarks: Vec::new(),
            homepage: DEFAULT_HOMEPAGE.to_string(),
            proxy: String::new(),
        }
    }
}
