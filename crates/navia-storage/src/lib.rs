//! Navia Storage Layer
//!
//! Two small JSON documents hold everything that outlives a run:
//! browsing data (history, bookmarks, homepage, proxy) and the last
//! window size. Loads never fail; saves replace the file atomically.

mod app_data;
mod error;
mod geometry;
mod store;

pub use app_data::{AppData, DEFAULT_HOMEPAGE};
pub use error::StorageError;
pub use geometry::{WindowGeometry, MIN_HEIGHT, MIN_WIDTH};
pub use store::Store;

pub type Result<T> = std::result::Result<T, StorageError>;
