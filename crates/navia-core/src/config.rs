//! Browser configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use navia_navigation::{DEFAULT_SEARCH_ENDPOINT, DEFAULT_SUGGEST_ENDPOINT};
use navia_storage::{Store, DEFAULT_HOMEPAGE};

const DATA_FILE: &str = "navia_data.json";
const GEOMETRY_FILE: &str = "navia_window.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Browsing data document (history, bookmarks, settings)
    pub data_path: PathBuf,
    /// Window size document
    pub geometry_path: PathBuf,
    /// Search page for non-URL input, queried as `<endpoint>?q=...`
    pub search_endpoint: String,
    /// Autocomplete endpoint for address bar suggestions
    pub suggest_endpoint: String,
    /// Homepage enforced at startup
    pub homepage: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_path: data_dir.join(DATA_FILE),
            geometry_path: data_dir.join(GEOMETRY_FILE),
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            suggest_endpoint: DEFAULT_SUGGEST_ENDPOINT.to_string(),
            homepage: DEFAULT_HOMEPAGE.to_string(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Navia"))
            .unwrap_or_else(|| PathBuf::from(".navia"))
    }

    pub fn store(&self) -> Store {
        Store::new(&self.data_path, &self.geometry_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Per-platform local data directory
mod dirs {
    use std::env;
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            env::var_os("LOCALAPPDATA").map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            home().map(|h| h.join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            env::var_os("XDG_DATA_HOME")
                .map(PathBuf::from)
                .filter(|p| p.is_absolute())
                .or_else(|| home().map(|h| h.join(".local/share")))
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }

    #[cfg(any(target_os = "macos", target_os = "linux"))]
    fn home() -> Option<PathBuf> {
        env::var_os("HOME").map(PathBuf::from)
    }
}
