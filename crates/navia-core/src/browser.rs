//! Main browser state container
//!
//! `Browser` is the session controller. It owns the browsing data, the
//! open tabs and the address bar text, and keeps them consistent as user
//! actions and engine notifications arrive.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use url::Url;

use navia_navigation::{InputResolution, InputResolver};
use navia_storage::{AppData, Store, WindowGeometry};
use navia_tabs::{EngineView, ProxyConfig, Tab, TabId, TabRegistry, ViewFactory, ViewOptions};

use crate::bookmarks;
use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

/// User-editable settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub homepage: String,
    pub proxy: String,
}

/// Snapshot of one open tab, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSummary {
    pub id: TabId,
    pub label: String,
    pub uri: Option<String>,
    pub active: bool,
}

/// Main browser instance
///
/// Every mutation of the browsing data is persisted before the call
/// returns. Window geometry is only written by [`Browser::shutdown`].
pub struct Browser<F: ViewFactory> {
    config: Config,
    store: Store,
    factory: Arc<F>,
    input_resolver: InputResolver,
    data: Arc<RwLock<AppData>>,
    tabs: Arc<RwLock<TabRegistry<F::View>>>,
    address_bar: Arc<RwLock<String>>,
    window_size: Arc<RwLock<WindowGeometry>>,
}

impl<F: ViewFactory> Browser<F> {
    /// Load persisted state. No tab is open until [`Browser::initialize`].
    pub fn new(config: Config, factory: F) -> Result<Self> {
        let input_resolver = InputResolver::with_search_endpoint(&config.search_endpoint)?;
        let store = config.store();
        let data = store.load_app_data();
        let window_size = store.load_window_geometry();

        tracing::debug!(
            history = data.history.len(),
            bookmarks = data.bookmarks.len(),
            "Loaded browsing data"
        );

        Ok(Self {
            config,
            store,
            factory: Arc::new(factory),
            input_resolver,
            data: Arc::new(RwLock::new(data)),
            tabs: Arc::new(RwLock::new(TabRegistry::new())),
            address_bar: Arc::new(RwLock::new(String::new())),
            window_size: Arc::new(RwLock::new(window_size)),
        })
    }

    /// Enforce the configured homepage and open the first tab on it
    pub fn initialize(&self) -> Result<TabId> {
        {
            let mut data = self.data.write();
            if data.homepage != self.config.homepage {
                tracing::info!(
                    stored = %data.homepage,
                    homepage = %self.config.homepage,
                    "Resetting homepage"
                );
                data.homepage = self.config.homepage.clone();
                self.store.save_app_data(&data);
            }
        }

        let tab_id = self.open_tab(None)?;

        tracing::info!("Browser initialized");

        Ok(tab_id)
    }

    // === Tab operations ===

    /// Open a tab on `url`, or on the homepage, and make it active
    pub fn open_tab(&self, url: Option<&str>) -> Result<TabId> {
        let url = match url {
            Some(url) => url.to_string(),
            None => self.home_url(),
        };

        let id = TabId::new();
        let view = self
            .factory
            .create_view(id.as_str(), &url, &self.view_options())?;
        self.tabs.write().open_tab(Tab::new(id.clone(), view));

        *self.address_bar.write() = url;

        Ok(id)
    }

    /// Close a tab and release its view. Returns the tab active afterwards.
    pub fn close_tab(&self, tab_id: &TabId) -> Result<Option<TabId>> {
        let (closed, active) = {
            let mut tabs = self.tabs.write();
            let closed = tabs.close_tab(tab_id)?;
            (closed, tabs.active_id().cloned())
        };
        closed.view.close();

        match &active {
            Some(_) => self.mirror_active_uri(),
            None => self.address_bar.write().clear(),
        }

        Ok(active)
    }

    pub fn activate_tab(&self, tab_id: &TabId) -> Result<()> {
        self.tabs.write().set_active(tab_id)?;
        self.mirror_active_uri();

        tracing::debug!(tab_id = %tab_id, "Activated tab");

        Ok(())
    }

    pub fn active_tab_id(&self) -> Option<TabId> {
        self.tabs.read().active_id().cloned()
    }

    pub fn tabs(&self) -> Vec<TabSummary> {
        let snapshot: Vec<_> = {
            let tabs = self.tabs.read();
            tabs.iter()
                .map(|tab| {
                    let active = tabs.is_active(&tab.id);
                    (tab.id.clone(), tab.label.clone(), tab.view.clone(), active)
                })
                .collect()
        };

        snapshot
            .into_iter()
            .map(|(id, label, view, active)| TabSummary {
                id,
                label,
                uri: view.uri(),
                active,
            })
            .collect()
    }

    // === Navigation operations ===

    /// Resolve address bar input and load it in the active tab.
    /// Returns the URL that was loaded.
    pub fn navigate(&self, input: &str) -> Result<String> {
        let url = self.input_resolver.resolve(input).into_url();
        let view = self.active_view()?;

        tracing::info!(url = %url, "Navigating");

        view.load(&url);
        *self.address_bar.write() = url.clone();
        self.record_history(&url);

        Ok(url)
    }

    /// Load a history or bookmark entry in the active tab
    pub fn open_entry(&self, url: &str) -> Result<String> {
        *self.address_bar.write() = url.to_string();
        self.navigate(url)
    }

    pub fn go_back(&self) -> Result<()> {
        let view = self.active_view()?;
        if view.can_go_back() {
            view.go_back();
        }
        Ok(())
    }

    pub fn go_forward(&self) -> Result<()> {
        let view = self.active_view()?;
        if view.can_go_forward() {
            view.go_forward();
        }
        Ok(())
    }

    pub fn reload(&self) -> Result<()> {
        self.active_view()?.reload();
        Ok(())
    }

    /// Load the homepage in the active tab. History is recorded when the
    /// engine reports the new URI.
    pub fn go_home(&self) -> Result<()> {
        let view = self.active_view()?;
        let homepage = self.home_url();
        view.load(&homepage);
        *self.address_bar.write() = homepage;
        Ok(())
    }

    /// The homepage as a loadable URL. Settings store the text as entered,
    /// so anything that is not an absolute URL goes through the resolver.
    fn home_url(&self) -> String {
        let homepage = self.data.read().homepage.clone();
        if Url::parse(&homepage).is_ok() {
            return homepage;
        }

        let url = self.input_resolver.resolve(&homepage).into_url();
        tracing::debug!(homepage = %homepage, url = %url, "Resolved homepage");
        url
    }

    /// Export the active page as PDF
    pub fn save_pdf(&self, path: &Path) -> Result<()> {
        let view = self.active_view()?;
        view.print_to_pdf(path)?;

        tracing::info!(path = %path.display(), "Saved page as PDF");

        Ok(())
    }

    pub fn resolve_input(&self, input: &str) -> InputResolution {
        self.input_resolver.resolve(input)
    }

    pub fn address_bar(&self) -> String {
        self.address_bar.read().clone()
    }

    // === Engine notifications ===

    /// The engine reports a new URI for `tab_id`.
    ///
    /// Only the active tab drives the address bar and history.
    pub fn on_uri_changed(&self, tab_id: &TabId, uri: &str) -> Result<()> {
        let is_active = {
            let mut tabs = self.tabs.write();
            tabs.refresh_label(tab_id)?;
            tabs.is_active(tab_id)
        };

        if is_active {
            *self.address_bar.write() = uri.to_string();
            self.record_history(uri);
        } else {
            tracing::trace!(tab_id = %tab_id, uri = %uri, "Background tab changed URI");
        }

        Ok(())
    }

    pub fn on_title_changed(&self, tab_id: &TabId) -> Result<()> {
        self.tabs.write().refresh_label(tab_id)?;
        Ok(())
    }

    // === History operations ===

    pub fn history(&self) -> Vec<String> {
        self.data.read().history.clone()
    }

    pub fn recent_history(&self, limit: usize) -> Vec<String> {
        navia_navigation::recent(&self.data.read().history, limit)
    }

    pub fn search_history(&self, query: &str, limit: usize) -> Vec<String> {
        navia_navigation::search(&self.data.read().history, query, limit)
    }

    pub fn clear_history(&self) {
        let mut data = self.data.write();
        data.history.clear();
        self.store.save_app_data(&data);

        tracing::info!("History cleared");
    }

    // === Bookmark operations ===

    pub fn bookmarks(&self) -> Vec<String> {
        self.data.read().bookmarks.clone()
    }

    /// Bookmark the active page. Returns `false` when there is nothing to
    /// add: no URI yet, or already bookmarked.
    pub fn bookmark_current(&self) -> Result<bool> {
        let Some(uri) = self.active_view()?.uri() else {
            return Ok(false);
        };

        let mut data = self.data.write();
        if !bookmarks::add_bookmark(&mut data.bookmarks, &uri) {
            return Ok(false);
        }
        self.store.save_app_data(&data);

        tracing::info!(url = %uri, "Bookmarked");

        Ok(true)
    }

    pub fn remove_bookmark(&self, url: &str) -> bool {
        let mut data = self.data.write();
        let removed = bookmarks::remove_bookmark(&mut data.bookmarks, url);
        if removed {
            self.store.save_app_data(&data);
        }
        removed
    }

    pub fn clear_bookmarks(&self) {
        let mut data = self.data.write();
        data.bookmarks.clear();
        self.store.save_app_data(&data);

        tracing::info!("Bookmarks cleared");
    }

    // === Settings ===

    pub fn settings(&self) -> Settings {
        let data = self.data.read();
        Settings {
            homepage: data.homepage.clone(),
            proxy: data.proxy.clone(),
        }
    }

    /// Replace homepage and proxy. The proxy applies to tabs opened later.
    pub fn update_settings(&self, homepage: &str, proxy: &str) {
        let mut data = self.data.write();
        data.homepage = homepage.to_string();
        data.proxy = proxy.to_string();
        self.store.save_app_data(&data);

        tracing::info!(homepage = %homepage, proxy = %proxy, "Settings updated");
    }

    /// Proxy for new views. An unusable proxy is logged and ignored.
    pub fn proxy(&self) -> Option<ProxyConfig> {
        let raw = self.data.read().proxy.clone();
        match ProxyConfig::parse(&raw) {
            Ok(proxy) => proxy,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring proxy setting");
                None
            }
        }
    }

    // === Window lifecycle ===

    /// Size to open the window with, as loaded at startup or last recorded
    pub fn window_geometry(&self) -> WindowGeometry {
        *self.window_size.read()
    }

    pub fn record_window_size(&self, width: i32, height: i32) {
        *self.window_size.write() = WindowGeometry::new(width, height);
    }

    /// Persist the window size. Failures are logged, never raised.
    pub fn shutdown(&self) {
        let geometry = self.window_geometry();
        self.store.save_window_geometry(geometry);

        tracing::info!(
            width = geometry.width,
            height = geometry.height,
            "Browser shut down"
        );
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // === Internals ===

    fn view_options(&self) -> ViewOptions {
        ViewOptions::with_proxy(self.proxy())
    }

    fn active_view(&self) -> Result<F::View> {
        self.tabs
            .read()
            .active_view()
            .ok_or(CoreError::NoActiveTab)
    }

    fn mirror_active_uri(&self) {
        let view = self.tabs.read().active_view();
        if let Some(uri) = view.and_then(|v| v.uri()) {
            *self.address_bar.write() = uri;
        }
    }

    fn record_history(&self, url: &str) {
        let mut data = self.data.write();
        if navia_navigation::record_visit(&mut data.history, url) {
            self.store.save_app_data(&data);
        }
    }
}

impl<F: ViewFactory> Clone for Browser<F> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            store: self.store.clone(),
            factory: Arc::clone(&self.factory),
            input_resolver: self.input_resolver.clone(),
            data: Arc::clone(&self.data),
            tabs: Arc::clone(&self.tabs),
            address_bar: Arc::clone(&self.address_bar),
            window_size: Arc::clone(&self.window_size),
        }
    }
}
