//! File-backed store for the two JSON documents

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_data::AppData;
use crate::error::StorageError;
use crate::geometry::WindowGeometry;
use crate::Result;

/// Single-writer store. Concurrent edits from other processes are not guarded.
#[derive(Debug, Clone)]
pub struct Store {
    data_path: PathBuf,
    geometry_path: PathBuf,
}

impl Store {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(data_path: P, geometry_path: Q) -> Self {
        Self {
            data_path: data_path.into(),
            geometry_path: geometry_path.into(),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn geometry_path(&self) -> &Path {
        &self.geometry_path
    }

    /// Load browsing data, falling back to the default document on any failure
    pub fn load_app_data(&self) -> AppData {
        match read_json(&self.data_path) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(
                    path = %self.data_path.display(),
                    error = %e,
                    "Could not load browsing data, using defaults"
                );
                AppData::default()
            }
        }
    }

    pub fn try_save_app_data(&self, data: &AppData) -> Result<()> {
        write_json_atomic(&self.data_path, data)
    }

    /// Persist browsing data. Failures are logged and dropped.
    pub fn save_app_data(&self, data: &AppData) {
        if let Err(e) = self.try_save_app_data(data) {
            tracing::error!(
                path = %self.data_path.display(),
                error = %e,
                "Failed to save browsing data"
            );
        }
    }

    /// Load the last window size, falling back to 1024x720 on any failure
    pub fn load_window_geometry(&self) -> WindowGeometry {
        match read_json(&self.geometry_path) {
            Ok(geometry) => geometry,
            Err(e) => {
                tracing::debug!(
                    path = %self.geometry_path.display(),
                    error = %e,
                    "No usable window geometry, using defaults"
                );
                WindowGeometry::default()
            }
        }
    }

    pub fn try_save_window_geometry(&self, geometry: WindowGeometry) -> Result<()> {
        write_json_atomic(&self.geometry_path, &geometry)
    }

    /// Persist the window size. Failures are logged and dropped.
    pub fn save_window_geometry(&self, geometry: WindowGeometry) {
        if let Err(e) = self.try_save_window_geometry(geometry) {
            tracing::error!(
                path = %self.geometry_path.display(),
                error = %e,
                "Failed to save window geometry"
            );
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|e| StorageError::io(path, e))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Write to a sibling temp file, then rename it over the target.
///
/// The target is never removed first: a failed save leaves the previous
/// document in place and no temp file behind.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }

    let bytes = serde_json::to_vec(value)?;
    let tmp_path = temp_path_for(path);

    let result = fs::write(&tmp_path, bytes)
        .map_err(|e| StorageError::io(&tmp_path, e))
        .and_then(|()| fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e)));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store(dir: &TempDir) -> Store {
        Store::new(
            dir.path().join("navia_data.json"),
            dir.path().join("navia_window.json"),
        )
    }

    #[test]
    fn test_missing_files_load_defaults() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        assert_eq!(store.load_app_data(), AppData::default());
        assert_eq!(store.load_window_geometry(), WindowGeometry::default());
    }

    #[test]
    fn test_corrupt_data_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        fs::write(store.data_path(), b"{\"history\": [\"https://exa").unwrap();
        assert_eq!(store.load_app_data(), AppData::default());

        fs::write(store.data_path(), b"[1, 2, 3]").unwrap();
        assert_eq!(store.load_app_data(), AppData::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let data = AppData {
            history: vec!["https://example.com".to_string()],
            bookmarks: vec!["https://rust-lang.org".to_string()],
            homepage: "https://duckduckgo.com".to_string(),
            proxy: "http://127.0.0.1:8080".to_string(),
        };
        store.try_save_app_data(&data).unwrap();
        assert_eq!(store.load_app_data(), data);

        store.save_window_geometry(WindowGeometry::new(1300, 900));
        assert_eq!(store.load_window_geometry(), WindowGeometry::new(1300, 900));
    }

    #[test]
    fn test_save_replaces_whole_file_and_leaves_no_temp() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let mut data = AppData::default();
        data.history = (0..50).map(|i| format!("https://site{i}.example")).collect();
        store.try_save_app_data(&data).unwrap();

        data.history.truncate(1);
        store.try_save_app_data(&data).unwrap();

        assert_eq!(store.load_app_data().history.len(), 1);
        assert!(!temp_path_for(store.data_path()).exists());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(
            dir.path().join("profile/nested/data.json"),
            dir.path().join("profile/nested/window.json"),
        );

        store.try_save_app_data(&AppData::default()).unwrap();
        assert!(store.data_path().exists());
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes every write fail
        let blocked = dir.path().join("blocked");
        fs::create_dir_all(blocked.join("navia_data.json")).unwrap();
        let store = Store::new(blocked.join("navia_data.json"), blocked.join("window.json"));

        assert!(store.try_save_app_data(&AppData::default()).is_err());
        store.save_app_data(&AppData::default());
        assert_eq!(store.load_app_data(), AppData::default());
    }

    #[test]
    fn test_failed_rename_cleans_up_and_keeps_target() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        fs::create_dir(store.data_path()).unwrap();
        fs::write(store.data_path().join("keep"), b"x").unwrap();

        assert!(store.try_save_app_data(&AppData::default()).is_err());

        assert!(!temp_path_for(store.data_path()).exists());
        assert!(store.data_path().join("keep").exists());
    }
}
