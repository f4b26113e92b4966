//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] navia_storage::StorageError),

    #[error("Tab error: {0}")]
    Tab(#[from] navia_tabs::TabError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] navia_navigation::NavigationError),

    #[error("No active tab")]
    NoActiveTab,

    #[error("Browser not initialized")]
    NotInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_errors_convert() {
        let err: CoreError = navia_tabs::TabError::NotFound("tab-1".to_string()).into();
        assert!(matches!(err, CoreError::Tab(_)));
        assert_eq!(err.to_string(), "Tab error: Tab not found: tab-1");
        assert_eq!(CoreError::NoActiveTab.to_string(), "No active tab");
    }
}
