//! Navia Browser - Tauri Application
//!
//! One window: the chrome (tab strip, toolbar, menus) is a local webview
//! across the top, and every tab is a child webview below it.

mod commands;
mod state;
mod webview;

use std::sync::Arc;

use navia_core::{Config, SuggestionOutcome, SuggestionSink, MIN_HEIGHT, MIN_WIDTH};
use state::AppState;
use tauri::webview::WebviewBuilder;
use tauri::window::WindowBuilder;
use tauri::{
    AppHandle, Emitter, LogicalPosition, LogicalSize, Manager, WebviewUrl, Window, WindowEvent,
};
use webview::{TauriViewFactory, WebviewManager, MAIN_WINDOW};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging
    navia_core::init_logging();

    tauri::Builder::default()
        .setup(|app| {
            let handle = app.handle().clone();
            let config = Config::default();
            tracing::info!(data_path = %config.data_path.display(), "Loading browser state");

            let manager = WebviewManager::new();
            let factory = TauriViewFactory::new(handle.clone(), manager.clone());
            let state = AppState::new(config, factory, suggestion_sink(handle.clone()))?;

            let geometry = state.with_browser(|browser| Ok(browser.window_geometry().clamped()))?;
            let (width, height) = (f64::from(geometry.width), f64::from(geometry.height));
            manager.layout(width, height);

            let window = WindowBuilder::new(app, MAIN_WINDOW)
                .title("Navia Browser")
                .inner_size(width, height)
                .min_inner_size(f64::from(MIN_WIDTH), f64::from(MIN_HEIGHT))
                .center()
                .build()?;

            let ui_webview = WebviewBuilder::new(
                commands::ui_webview_label(MAIN_WINDOW),
                WebviewUrl::App("index.html".into()),
            )
            .auto_resize();

            let ui_webview = window.add_child(
                ui_webview,
                LogicalPosition::new(0.0, 0.0),
                LogicalSize::new(width, height),
            )?;
            let _ = ui_webview.show();

            // Store state in Tauri before the first page load reports back
            app.manage(manager);
            app.manage(state);

            let events_window = window.clone();
            window.on_window_event(move |event| {
                handle_window_event(&handle, &events_window, event);
            });

            app.state::<AppState>().initialize()?;
            commands::sync_views(app.handle());

            tracing::info!("Navia Browser started");

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Tab commands
            commands::tabs::open_tab,
            commands::tabs::close_tab,
            commands::tabs::activate_tab,
            commands::tabs::get_tabs,
            // Navigation commands
            commands::navigation::resolve_input,
            commands::navigation::navigate,
            commands::navigation::open_entry,
            commands::navigation::go_back,
            commands::navigation::go_forward,
            commands::navigation::reload,
            commands::navigation::go_home,
            commands::navigation::get_address_bar,
            commands::navigation::update_suggestions,
            commands::navigation::cancel_suggestions,
            commands::navigation::save_pdf,
            // Settings, history and bookmarks
            commands::settings::get_settings,
            commands::settings::update_settings,
            commands::settings::get_history,
            commands::settings::search_history,
            commands::settings::clear_history,
            commands::settings::get_bookmarks,
            commands::settings::bookmark_current,
            commands::settings::remove_bookmark,
            commands::settings::clear_bookmarks,
            // Window commands
            commands::window::set_overlay_open,
        ])
        .run(tauri::generate_context!())
        .expect("error while running Navia browser");
}

/// Forward suggestion outcomes to the chrome. `null` hides the list.
fn suggestion_sink(app: AppHandle) -> SuggestionSink {
    let ui_label = commands::ui_webview_label(MAIN_WINDOW);
    Arc::new(move |outcome| {
        let payload = match outcome {
            SuggestionOutcome::Ready(phrases) => Some(phrases),
            SuggestionOutcome::Hidden => None,
        };
        if let Err(e) = app.emit_to(ui_label.as_str(), commands::SUGGESTIONS_EVENT, payload) {
            tracing::warn!(error = %e, "Failed to deliver suggestions");
        }
    })
}

fn handle_window_event(app: &AppHandle, window: &Window, event: &WindowEvent) {
    match event {
        WindowEvent::Resized(size) => {
            // Minimized windows report zero
            if size.width == 0 || size.height == 0 {
                return;
            }
            let scale = window.scale_factor().unwrap_or(1.0);
            let logical = size.to_logical::<f64>(scale);

            if let Some(manager) = app.try_state::<WebviewManager>() {
                manager.layout(logical.width, logical.height);
            }
            if let Some(state) = app.try_state::<AppState>() {
                let _ = state.with_browser(|browser| {
                    browser.record_window_size(
                        logical.width.round() as i32,
                        logical.height.round() as i32,
                    );
                    Ok(())
                });
            }
        }
        WindowEvent::CloseRequested { .. } | WindowEvent::Destroyed => {
            if let Some(state) = app.try_state::<AppState>() {
                state.shutdown();
            }
        }
        _ => {}
    }
}
