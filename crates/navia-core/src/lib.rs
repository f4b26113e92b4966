//! Navia Core
//!
//! Session controller for the Navia browser. [`Browser`] owns the browsing
//! data and the open tabs; the desktop host only forwards user input and
//! engine events into it.

mod bookmarks;
mod browser;
mod config;
mod error;

pub use browser::{Browser, Settings, TabSummary};
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use navia_navigation::{
    parse_suggestions, InputResolution, InputResolver, NavigationError, SuggestionFetcher,
    SuggestionOutcome, SuggestionSink, DEFAULT_SEARCH_ENDPOINT, DEFAULT_SUGGEST_ENDPOINT,
    HISTORY_LIMIT,
};
pub use navia_storage::{
    AppData, StorageError, Store, WindowGeometry, DEFAULT_HOMEPAGE, MIN_HEIGHT, MIN_WIDTH,
};
pub use navia_tabs::{
    EngineView, ProxyConfig, Tab, TabError, TabId, ViewFactory, ViewOptions, NEW_TAB_LABEL,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
