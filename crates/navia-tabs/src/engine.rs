//! Contract with the embedded browser engine
//!
//! Views are cheap handles to an engine-owned page. Cloning a view clones
//! the handle, never the page.
//!
//! State queries (`uri`, `title`, `can_go_*`) answer from state the view
//! already holds and must not block: the registry may call them while
//! locked. Commands may block and are never issued under a registry lock.

use std::path::Path;
use url::Url;

use crate::error::TabError;
use crate::Result;

pub trait EngineView: Clone + Send + Sync + 'static {
    fn load(&self, url: &str);

    /// URI currently shown, if any
    fn uri(&self) -> Option<String>;

    /// Page title, if the page has reported one
    fn title(&self) -> Option<String>;

    fn can_go_back(&self) -> bool;

    fn go_back(&self);

    fn can_go_forward(&self) -> bool;

    fn go_forward(&self);

    fn reload(&self);

    fn print_to_pdf(&self, path: &Path) -> Result<()>;

    /// Release the page. Called once, when the owning tab closes.
    fn close(&self) {}
}

/// Creates fresh engine views for new tabs
pub trait ViewFactory: Send + Sync + 'static {
    type View: EngineView;

    fn create_view(&self, tab_id: &str, url: &str, options: &ViewOptions) -> Result<Self::View>;
}

/// Proxy applied to a single view at creation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    url: Url,
}

impl ProxyConfig {
    /// Parse a proxy URI such as `http://127.0.0.1:8080`.
    ///
    /// Blank input means "no proxy" and yields `Ok(None)`.
    pub fn parse(raw: &str) -> Result<Option<Self>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let url = Url::parse(raw).map_err(|e| TabError::InvalidProxy(format!("{raw}: {e}")))?;
        if url.host_str().is_none() {
            return Err(TabError::InvalidProxy(format!("{raw}: missing host")));
        }

        Ok(Some(Self { url }))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Per-view creation options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub proxy: Option<ProxyConfig>,
}

impl ViewOptions {
    pub fn with_proxy(proxy: Option<ProxyConfig>) -> Self {
        Self { proxy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_proxy() {
        assert_eq!(ProxyConfig::parse("").unwrap(), None);
        assert_eq!(ProxyConfig::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_valid_proxy() {
        let proxy = ProxyConfig::parse(" http://127.0.0.1:8080 ").unwrap().unwrap();
        assert_eq!(proxy.url().host_str(), Some("127.0.0.1"));
        assert_eq!(proxy.url().port(), Some(8080));
    }

    #[test]
    fn test_invalid_proxy() {
        assert!(ProxyConfig::parse("not a proxy").is_err());
        assert!(ProxyConfig::parse("socks5:").is_err());
    }
}
