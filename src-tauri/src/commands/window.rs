//! Window chrome commands

use tauri::{AppHandle, Manager, State};

use super::tabs::CommandResult;
use crate::state::AppState;
use crate::webview::WebviewManager;

/// Hide page content while a chrome panel (menu, suggestions) covers it
#[tauri::command]
pub fn set_overlay_open(app: AppHandle, state: State<AppState>, open: bool) -> CommandResult<()> {
    let Some(manager) = app.try_state::<WebviewManager>() else {
        return CommandResult::err("WebviewManager not found".to_string());
    };

    match state.with_browser(|browser| Ok(browser.active_tab_id())) {
        Ok(active) => {
            manager.set_overlay_open(open, active.as_ref());
            CommandResult::ok(())
        }
        Err(e) => CommandResult::err(e.to_string()),
    }
}
