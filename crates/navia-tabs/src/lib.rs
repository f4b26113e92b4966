//! Navia Tab Management
//!
//! An ordered set of tabs, each owning one engine view, with exactly one
//! active tab whenever any tab is open. The engine itself stays behind the
//! [`EngineView`] and [`ViewFactory`] traits.

mod engine;
mod error;
mod label;
mod registry;
mod tab;

pub use engine::{EngineView, ProxyConfig, ViewFactory, ViewOptions};
pub use error::TabError;
pub use label::{tab_label, truncate_label, MAX_LABEL_CHARS, NEW_TAB_LABEL};
pub use registry::TabRegistry;
pub use tab::{Tab, TabId};

pub type Result<T> = std::result::Result<T, TabError>;
