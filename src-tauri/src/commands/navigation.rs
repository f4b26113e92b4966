//! Navigation and address bar commands

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tauri::{AppHandle, Manager, State};

use super::tabs::CommandResult;
use super::{emit_browser_state, sync_views};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum InputResolutionResult {
    Navigate(String),
    Search(String),
}

impl From<navia_core::InputResolution> for InputResolutionResult {
    fn from(resolution: navia_core::InputResolution) -> Self {
        match resolution {
            navia_core::InputResolution::Navigate(url) => InputResolutionResult::Navigate(url),
            navia_core::InputResolution::Search(url) => InputResolutionResult::Search(url),
        }
    }
}

#[tauri::command]
pub fn resolve_input(
    state: State<AppState>,
    input: String,
) -> CommandResult<InputResolutionResult> {
    state
        .with_browser(|browser| Ok(InputResolutionResult::from(browser.resolve_input(&input))))
        .into()
}

/// Load address bar input in the active tab, returning the URL loaded
#[tauri::command]
pub fn navigate(app: AppHandle, state: State<AppState>, input: String) -> CommandResult<String> {
    state.suggestions().cancel();
    let result = state.with_browser(|browser| browser.navigate(&input));
    emit_browser_state(&app);
    result.into()
}

/// Load a history or bookmark entry
#[tauri::command]
pub fn open_entry(app: AppHandle, state: State<AppState>, url: String) -> CommandResult<String> {
    let result = state.with_browser(|browser| browser.open_entry(&url));
    emit_browser_state(&app);
    result.into()
}

#[tauri::command]
pub fn go_back(state: State<AppState>) -> CommandResult<()> {
    state.with_browser(|browser| browser.go_back()).into()
}

#[tauri::command]
pub fn go_forward(state: State<AppState>) -> CommandResult<()> {
    state.with_browser(|browser| browser.go_forward()).into()
}

#[tauri::command]
pub fn reload(state: State<AppState>) -> CommandResult<()> {
    state.with_browser(|browser| browser.reload()).into()
}

#[tauri::command]
pub fn go_home(app: AppHandle, state: State<AppState>) -> CommandResult<()> {
    let result = state.with_browser(|browser| browser.go_home());
    sync_views(&app);
    result.into()
}

#[tauri::command]
pub fn get_address_bar(state: State<AppState>) -> CommandResult<String> {
    state.with_browser(|browser| Ok(browser.address_bar())).into()
}

/// Address bar text changed. Results arrive as `suggestions` events.
///
/// Async so the request runs on the Tauri async runtime.
#[tauri::command]
pub async fn update_suggestions(app: AppHandle, text: String) -> CommandResult<()> {
    match app.try_state::<AppState>() {
        Some(state) => {
            state.suggestions().update(&text);
            CommandResult::ok(())
        }
        None => CommandResult::err("Browser not initialized".to_string()),
    }
}

/// Address bar lost focus or a suggestion was picked
#[tauri::command]
pub fn cancel_suggestions(state: State<AppState>) -> CommandResult<()> {
    state.suggestions().cancel();
    CommandResult::ok(())
}

#[tauri::command]
pub fn save_pdf(state: State<AppState>, path: String) -> CommandResult<()> {
    let path = PathBuf::from(path);
    state.with_browser(|browser| browser.save_pdf(&path)).into()
}
