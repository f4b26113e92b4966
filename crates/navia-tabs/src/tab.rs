//! Tab data structure

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::engine::EngineView;
use crate::label::{tab_label, NEW_TAB_LABEL};

/// Stable identifier of an open tab
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TabId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TabId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One open tab: an engine view plus the label shown for it
#[derive(Debug, Clone)]
pub struct Tab<V> {
    pub id: TabId,
    pub view: V,
    /// Short label, see [`crate::tab_label`]
    pub label: String,
}

impl<V: EngineView> Tab<V> {
    pub fn new(id: TabId, view: V) -> Self {
        Self {
            id,
            view,
            label: NEW_TAB_LABEL.to_string(),
        }
    }

    /// Re-derive the label from the view's title and URI.
    ///
    /// Keeps the current label when the view has reported neither.
    pub fn refresh_label(&mut self) -> &str {
        let title = self.view.title();
        let uri = self.view.uri();
        if let Some(label) = tab_label(title.as_deref(), uri.as_deref()) {
            if label != self.label {
                tracing::debug!(tab_id = %self.id, label = %label, "Tab label changed");
                self.label = label;
            }
        }
        &self.label
    }
}
