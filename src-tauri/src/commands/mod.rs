//! Tauri IPC Commands
//!
//! These commands bridge the browser chrome to the session controller.
//! After anything that changes tabs or the address bar, the chrome gets a
//! fresh `browser-state` event.

pub mod navigation;
pub mod settings;
pub mod tabs;
pub mod window;

use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager};

use navia_core::{TabId, TabSummary};

use crate::state::AppState;
use crate::webview::WebviewManager;

pub const BROWSER_STATE_EVENT: &str = "browser-state";
pub const SUGGESTIONS_EVENT: &str = "suggestions";

pub fn ui_webview_label(window_label: &str) -> String {
    format!("ui-{window_label}")
}

#[derive(Debug, Clone, Serialize)]
pub struct BrowserSnapshot {
    pub tabs: Vec<TabSummary>,
    pub active_tab: Option<TabId>,
    pub address_bar: String,
}

/// Push the current tabs and address bar to the chrome
pub fn emit_browser_state(app: &AppHandle) {
    let Some(state) = app.try_state::<AppState>() else {
        return;
    };
    let Ok(snapshot) = state.with_browser(|browser| {
        Ok(BrowserSnapshot {
            tabs: browser.tabs(),
            active_tab: browser.active_tab_id(),
            address_bar: browser.address_bar(),
        })
    }) else {
        return;
    };

    let ui_label = ui_webview_label(crate::webview::MAIN_WINDOW);
    if let Err(e) = app.emit_to(ui_label.as_str(), BROWSER_STATE_EVENT, snapshot) {
        tracing::warn!(error = %e, "Failed to emit browser state");
    }
}

/// Show only the active tab's webview, then refresh the chrome
pub fn sync_views(app: &AppHandle) {
    if let (Some(state), Some(manager)) = (
        app.try_state::<AppState>(),
        app.try_state::<WebviewManager>(),
    ) {
        if let Ok(active) = state.with_browser(|browser| Ok(browser.active_tab_id())) {
            manager.show_only(active.as_ref());
        }
    }
    emit_browser_state(app);
}
