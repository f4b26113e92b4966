//! Input resolution for address bar

use url::Url;

use crate::error::NavigationError;
use crate::Result;

/// Search page queried for anything that is not an http(s) URL
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://duckduckgo.com/";

/// Result of resolving address bar input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResolution {
    /// Load the URL as typed
    Navigate(String),
    /// Load a search-engine results page
    Search(String),
}

impl InputResolution {
    pub fn url(&self) -> &str {
        match self {
            InputResolution::Navigate(url) | InputResolution::Search(url) => url,
        }
    }

    pub fn into_url(self) -> String {
        match self {
            InputResolution::Navigate(url) | InputResolution::Search(url) => url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputResolver {
    search_endpoint: String,
}

impl InputResolver {
    pub fn new() -> Self {
        Self {
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
        }
    }

    pub fn with_search_endpoint(endpoint: &str) -> Result<Self> {
        Url::parse(endpoint).map_err(|e| NavigationError::InvalidUrl(format!("{endpoint}: {e}")))?;
        Ok(Self {
            search_endpoint: endpoint.to_string(),
        })
    }

    pub fn search_endpoint(&self) -> &str {
        &self.search_endpoint
    }

    /// Resolve user input into the URL to load.
    ///
    /// Only `http://` and `https://` input is taken verbatim. Everything
    /// else becomes `<endpoint>?q=<input>` with spaces written as `+`.
    pub fn resolve(&self, input: &str) -> InputResolution {
        let input = input.trim();

        if input.starts_with("http://") || input.starts_with("https://") {
            return InputResolution::Navigate(input.to_string());
        }

        InputResolution::Search(self.search_url(input))
    }

    fn search_url(&self, query: &str) -> String {
        format!("{}?q={}", self.search_endpoint, query.replace(' ', "+"))
    }
}

impl Default for InputResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let resolver = InputResolver::new();

        assert_eq!(
            resolver.resolve("http://example.com"),
            InputResolution::Navigate("http://example.com".to_string())
        );
        assert_eq!(
            resolver.resolve("https://example.com/a b"),
            InputResolution::Navigate("https://example.com/a b".to_string())
        );
    }

    #[test]
    fn test_resolve_search() {
        let resolver = InputResolver::new();

        assert_eq!(
            resolver.resolve("cats"),
            InputResolution::Search("https://duckduckgo.com/?q=cats".to_string())
        );
        assert_eq!(
            resolver.resolve("  rust programming language "),
            InputResolution::Search("https://duckduckgo.com/?q=rust+programming+language".to_string())
        );
    }

    #[test]
    fn test_bare_domain_is_searched() {
        let resolver = InputResolver::new();

        match resolver.resolve("example.com") {
            InputResolution::Search(url) => assert_eq!(url, "https://duckduckgo.com/?q=example.com"),
            other => panic!("Expected Search, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_endpoint() {
        let resolver = InputResolver::with_search_endpoint("https://search.example/find").unwrap();
        assert_eq!(resolver.resolve("a b").url(), "https://search.example/find?q=a+b");

        assert!(InputResolver::with_search_endpoint("not a url").is_err());
    }
}
