//! Settings, history and bookmark commands

use tauri::State;

use navia_core::{ProxyConfig, Settings};

use super::tabs::CommandResult;
use crate::state::AppState;

/// Entries shown in the history menu
const HISTORY_MENU_LIMIT: usize = 50;

#[tauri::command]
pub fn get_settings(state: State<AppState>) -> CommandResult<Settings> {
    state.with_browser(|browser| Ok(browser.settings())).into()
}

/// Save homepage and proxy. The proxy applies to tabs opened afterwards
/// and to suggestion requests.
#[tauri::command]
pub fn update_settings(
    state: State<AppState>,
    homepage: String,
    proxy: String,
) -> CommandResult<Settings> {
    let result = state.with_browser(|browser| {
        browser.update_settings(homepage.trim(), proxy.trim());
        Ok((browser.settings(), browser.proxy()))
    });

    match result {
        Ok((settings, proxy)) => {
            if let Err(e) = state
                .suggestions()
                .set_proxy(proxy.as_ref().map(ProxyConfig::url))
            {
                tracing::warn!(error = %e, "Suggestions keep their previous proxy");
            }
            CommandResult::ok(settings)
        }
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Most recent history first
#[tauri::command]
pub fn get_history(state: State<AppState>, limit: Option<usize>) -> CommandResult<Vec<String>> {
    let limit = limit.unwrap_or(HISTORY_MENU_LIMIT);
    state
        .with_browser(|browser| Ok(browser.recent_history(limit)))
        .into()
}

#[tauri::command]
pub fn search_history(state: State<AppState>, query: String) -> CommandResult<Vec<String>> {
    state
        .with_browser(|browser| Ok(browser.search_history(&query, HISTORY_MENU_LIMIT)))
        .into()
}

#[tauri::command]
pub fn clear_history(state: State<AppState>) -> CommandResult<()> {
    state
        .with_browser(|browser| {
            browser.clear_history();
            Ok(())
        })
        .into()
}

#[tauri::command]
pub fn get_bookmarks(state: State<AppState>) -> CommandResult<Vec<String>> {
    state.with_browser(|browser| Ok(browser.bookmarks())).into()
}

/// Bookmark the active page; `false` when there was nothing new to add
#[tauri::command]
pub fn bookmark_current(state: State<AppState>) -> CommandResult<bool> {
    state.with_browser(|browser| browser.bookmark_current()).into()
}

#[tauri::command]
pub fn remove_bookmark(state: State<AppState>, url: String) -> CommandResult<bool> {
    state
        .with_browser(|browser| Ok(browser.remove_bookmark(&url)))
        .into()
}

#[tauri::command]
pub fn clear_bookmarks(state: State<AppState>) -> CommandResult<()> {
    state
        .with_browser(|browser| {
            browser.clear_bookmarks();
            Ok(())
        })
        .into()
}
