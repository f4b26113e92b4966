//! Engine views over Tauri child webviews
//!
//! Each tab's page is a child webview of the main window, stacked under
//! the browser chrome. Page state that the engine only reports through
//! events (URI, title, session history) is cached on the view so the
//! controller can query it without a round trip.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tauri::webview::{PageLoadEvent, WebviewBuilder};
use tauri::{AppHandle, LogicalPosition, LogicalSize, Manager, Webview, WebviewUrl};
use url::Url;

use navia_core::{EngineView, TabError, TabId, ViewFactory, ViewOptions};

use crate::commands;
use crate::state::AppState;

pub const MAIN_WINDOW: &str = "main";

/// Height of the tab strip plus toolbar drawn by the chrome webview
pub const TOOLBAR_HEIGHT: f64 = 78.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hop {
    Back,
    Forward,
}

/// Session history of one webview, rebuilt from page-load events.
///
/// Approximate: same-document navigations never reach us.
#[derive(Debug, Default)]
struct NavigationTrail {
    entries: Vec<String>,
    index: usize,
    pending: Option<Hop>,
}

impl NavigationTrail {
    fn visit(&mut self, url: &str) {
        match self.pending.take() {
            Some(Hop::Back) if self.index > 0 => self.index -= 1,
            Some(Hop::Forward) if self.index + 1 < self.entries.len() => self.index += 1,
            _ => {
                if self.entries.get(self.index).map(String::as_str) == Some(url) {
                    return;
                }
                if !self.entries.is_empty() {
                    self.entries.truncate(self.index + 1);
                }
                self.entries.push(url.to_string());
                self.index = self.entries.len() - 1;
                return;
            }
        }

        // A hop can land somewhere else after a redirect
        if let Some(entry) = self.entries.get_mut(self.index) {
            if entry != url {
                *entry = url.to_string();
            }
        }
    }

    fn can_go_back(&self) -> bool {
        self.index > 0
    }

    fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }
}

#[derive(Debug, Default)]
struct PageState {
    uri: Option<String>,
    title: Option<String>,
    trail: NavigationTrail,
}

/// Handle to one tab's child webview
#[derive(Clone)]
pub struct TauriView {
    webview: Webview,
    page: Arc<Mutex<PageState>>,
}

impl TauriView {
    pub fn set_visible(&self, visible: bool) {
        let result = if visible {
            self.webview.show()
        } else {
            self.webview.hide()
        };
        if let Err(e) = result {
            tracing::warn!(
                label = %self.webview.label(),
                error = %e,
                "Failed to change webview visibility"
            );
        }
    }

    pub fn set_bounds(&self, bounds: ContentBounds) {
        let _ = self
            .webview
            .set_position(LogicalPosition::new(bounds.x, bounds.y));
        let _ = self
            .webview
            .set_size(LogicalSize::new(bounds.width, bounds.height));
    }

    fn eval(&self, script: &str) {
        if let Err(e) = self.webview.eval(script) {
            tracing::warn!(
                label = %self.webview.label(),
                error = %e,
                "Script evaluation failed"
            );
        }
    }
}

impl EngineView for TauriView {
    fn load(&self, url: &str) {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Refusing to load invalid URL");
                return;
            }
        };

        {
            let mut page = self.page.lock();
            page.uri = Some(url.to_string());
            page.title = None;
            page.trail.pending = None;
        }

        if let Err(e) = self.webview.navigate(parsed) {
            tracing::warn!(url = %url, error = %e, "Navigation failed");
        }
    }

    fn uri(&self) -> Option<String> {
        self.page.lock().uri.clone()
    }

    fn title(&self) -> Option<String> {
        self.page.lock().title.clone()
    }

    fn can_go_back(&self) -> bool {
        self.page.lock().trail.can_go_back()
    }

    fn go_back(&self) {
        self.page.lock().trail.pending = Some(Hop::Back);
        self.eval("history.back()");
    }

    fn can_go_forward(&self) -> bool {
        self.page.lock().trail.can_go_forward()
    }

    fn go_forward(&self) {
        self.page.lock().trail.pending = Some(Hop::Forward);
        self.eval("history.forward()");
    }

    fn reload(&self) {
        if let Err(e) = self.webview.reload() {
            tracing::warn!(label = %self.webview.label(), error = %e, "Reload failed");
        }
    }

    /// Opens the platform print dialog, where the page can be saved as PDF.
    /// The dialog picks the destination, `path` is only logged.
    fn print_to_pdf(&self, path: &Path) -> Result<(), TabError> {
        tracing::debug!(path = %path.display(), "Opening print dialog");
        self.webview
            .print()
            .map_err(|e| TabError::Engine(e.to_string()))
    }

    fn close(&self) {
        if let Err(e) = self.webview.close() {
            tracing::warn!(
                label = %self.webview.label(),
                error = %e,
                "Failed to close webview"
            );
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ContentBounds {
    /// Area below the chrome for a window of the given logical size
    pub fn for_window(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: TOOLBAR_HEIGHT,
            width: width.max(0.0),
            height: (height - TOOLBAR_HEIGHT).max(0.0),
        }
    }
}

/// Tracks the content webviews of the main window
#[derive(Clone)]
pub struct WebviewManager {
    views: Arc<RwLock<HashMap<String, TauriView>>>,
    bounds: Arc<RwLock<ContentBounds>>,
    /// Content is hidden while a chrome panel overlaps it
    overlay_open: Arc<RwLock<bool>>,
}

impl WebviewManager {
    pub fn new() -> Self {
        Self {
            views: Arc::new(RwLock::new(HashMap::new())),
            bounds: Arc::new(RwLock::new(ContentBounds::for_window(0.0, 0.0))),
            overlay_open: Arc::new(RwLock::new(false)),
        }
    }

    pub fn register(&self, tab_id: &str, view: TauriView) {
        self.views.write().insert(tab_id.to_string(), view);
    }

    pub fn unregister(&self, tab_id: &str) -> Option<TauriView> {
        self.views.write().remove(tab_id)
    }

    pub fn bounds(&self) -> ContentBounds {
        *self.bounds.read()
    }

    /// Resize every content view to the new window size
    pub fn layout(&self, width: f64, height: f64) {
        let bounds = ContentBounds::for_window(width, height);
        *self.bounds.write() = bounds;
        for view in self.snapshot() {
            view.set_bounds(bounds);
        }
    }

    /// Show the active tab's view and hide the rest
    pub fn show_only(&self, active: Option<&TabId>) {
        let overlay_open = *self.overlay_open.read();
        let views: Vec<(String, TauriView)> = self
            .views
            .read()
            .iter()
            .map(|(id, view)| (id.clone(), view.clone()))
            .collect();

        for (id, view) in views {
            let is_active = active.map(TabId::as_str) == Some(id.as_str());
            view.set_visible(is_active && !overlay_open);
        }
    }

    pub fn set_overlay_open(&self, open: bool, active: Option<&TabId>) {
        *self.overlay_open.write() = open;
        self.show_only(active);
    }

    fn snapshot(&self) -> Vec<TauriView> {
        self.views.read().values().cloned().collect()
    }
}

impl Default for WebviewManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a child webview of the main window per tab
pub struct TauriViewFactory {
    app: AppHandle,
    manager: WebviewManager,
}

impl TauriViewFactory {
    pub fn new(app: AppHandle, manager: WebviewManager) -> Self {
        Self { app, manager }
    }
}

impl ViewFactory for TauriViewFactory {
    type View = TauriView;

    fn create_view(
        &self,
        tab_id: &str,
        url: &str,
        options: &ViewOptions,
    ) -> Result<TauriView, TabError> {
        let window = self
            .app
            .get_window(MAIN_WINDOW)
            .ok_or_else(|| TabError::Engine("main window is not open".to_string()))?;
        let parsed = Url::parse(url).map_err(|e| TabError::Engine(format!("{url}: {e}")))?;

        let page = Arc::new(Mutex::new(PageState {
            uri: Some(url.to_string()),
            ..PageState::default()
        }));

        let app_for_load = self.app.clone();
        let page_for_load = Arc::clone(&page);
        let tab_for_load = TabId::from(tab_id);
        let app_for_title = self.app.clone();
        let page_for_title = Arc::clone(&page);
        let tab_for_title = TabId::from(tab_id);

        let label = format!("content-{tab_id}");
        let mut builder = WebviewBuilder::new(label, WebviewUrl::External(parsed))
            .on_page_load(move |_webview, payload| {
                if !matches!(payload.event(), PageLoadEvent::Started) {
                    return;
                }
                let uri = payload.url().to_string();
                {
                    let mut page = page_for_load.lock();
                    page.trail.visit(&uri);
                    page.uri = Some(uri.clone());
                }

                if let Some(state) = app_for_load.try_state::<AppState>() {
                    let applied =
                        state.with_browser(|browser| browser.on_uri_changed(&tab_for_load, &uri));
                    if let Err(e) = applied {
                        tracing::debug!(tab_id = %tab_for_load, error = %e, "URI change not applied");
                    }
                }
                commands::emit_browser_state(&app_for_load);
            })
            .on_document_title_changed(move |_webview, title| {
                page_for_title.lock().title = Some(title);

                if let Some(state) = app_for_title.try_state::<AppState>() {
                    let applied =
                        state.with_browser(|browser| browser.on_title_changed(&tab_for_title));
                    if let Err(e) = applied {
                        tracing::debug!(tab_id = %tab_for_title, error = %e, "Title change not applied");
                    }
                }
                commands::emit_browser_state(&app_for_title);
            });

        if let Some(proxy) = &options.proxy {
            builder = builder.proxy_url(proxy.url().clone());
        }

        let bounds = self.manager.bounds();
        let webview = window
            .add_child(
                builder,
                LogicalPosition::new(bounds.x, bounds.y),
                LogicalSize::new(bounds.width, bounds.height),
            )
            .map_err(|e| TabError::Engine(format!("failed to create webview: {e}")))?;

        let view = TauriView { webview, page };
        self.manager.register(tab_id, view.clone());

        tracing::info!(
            tab_id = %tab_id,
            url = %url,
            proxied = options.proxy.is_some(),
            "Created child webview"
        );

        Ok(view)
    }
}
