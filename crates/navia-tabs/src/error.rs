//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(String),

    #[error("Invalid proxy URL: {0}")]
    InvalidProxy(String),

    #[error("Engine error: {0}")]
    Engine(String),
}
