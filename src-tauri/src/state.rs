//! Application state management
use navia_core::{
    Browser, Config, CoreError, ProxyConfig, Result, SuggestionFetcher, SuggestionSink,
};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::webview::TauriViewFactory;

pub type NaviaBrowser = Browser<TauriViewFactory>;

/// Thread-safe application state wrapper
///
/// The browser is taken out at shutdown, after which every command
/// answers `NotInitialized`.
pub struct AppState {
    browser: Arc<RwLock<Option<NaviaBrowser>>>,
    suggestions: SuggestionFetcher,
}

impl AppState {
    pub fn new(config: Config, factory: TauriViewFactory, sink: SuggestionSink) -> Result<Self> {
        let browser = Browser::new(config, factory)?;
        let proxy = browser.proxy();
        let suggestions = SuggestionFetcher::new(
            &browser.config().suggest_endpoint,
            proxy.as_ref().map(ProxyConfig::url),
            sink,
        )?;

        Ok(Self {
            browser: Arc::new(RwLock::new(Some(browser))),
            suggestions,
        })
    }

    pub fn initialize(&self) -> Result<()> {
        self.with_browser(|browser| browser.initialize().map(|_| ()))
    }

    pub fn with_browser<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&NaviaBrowser) -> Result<T>,
    {
        let guard = self.browser.read();
        match guard.as_ref() {
            Some(browser) => f(browser),
            None => Err(CoreError::NotInitialized),
        }
    }

    pub fn suggestions(&self) -> &SuggestionFetcher {
        &self.suggestions
    }

    /// Persist window geometry once; later calls do nothing
    pub fn shutdown(&self) {
        self.suggestions.cancel();
        if let Some(browser) = self.browser.write().take() {
            browser.shutdown();
        }
    }
}
