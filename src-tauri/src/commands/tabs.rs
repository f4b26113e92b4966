//! Tab management commands
use serde::Serialize;
use tauri::{AppHandle, Manager, State};

use navia_core::{TabId, TabSummary};

use super::sync_views;
use crate::state::AppState;
use crate::webview::WebviewManager;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T> From<navia_core::Result<T>> for CommandResult<T> {
    fn from(result: navia_core::Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Open a tab on `url`, or on the homepage when omitted
#[tauri::command]
pub fn open_tab(
    app: AppHandle,
    state: State<AppState>,
    url: Option<String>,
) -> CommandResult<TabId> {
    let result = state.with_browser(|browser| browser.open_tab(url.as_deref()));
    if result.is_ok() {
        sync_views(&app);
    }
    result.into()
}

#[tauri::command]
pub fn close_tab(
    app: AppHandle,
    state: State<AppState>,
    tab_id: String,
) -> CommandResult<Option<TabId>> {
    let tab_id = TabId::from(tab_id);
    let result = state.with_browser(|browser| browser.close_tab(&tab_id));

    if result.is_ok() {
        if let Some(manager) = app.try_state::<WebviewManager>() {
            manager.unregister(tab_id.as_str());
        }
        sync_views(&app);
    }
    result.into()
}

#[tauri::command]
pub fn activate_tab(app: AppHandle, state: State<AppState>, tab_id: String) -> CommandResult<()> {
    let tab_id = TabId::from(tab_id);
    let result = state.with_browser(|browser| browser.activate_tab(&tab_id));
    if result.is_ok() {
        sync_views(&app);
    }
    result.into()
}

#[tauri::command]
pub fn get_tabs(state: State<AppState>) -> CommandResult<Vec<TabSummary>> {
    state.with_browser(|browser| Ok(browser.tabs())).into()
}
