//! Tab Registry
//!
//! Ordered tabs plus the active pointer. The registry only bookkeeps:
//! views are created by the caller so that no engine work happens while
//! the registry is borrowed.

use crate::engine::EngineView;
use crate::error::TabError;
use crate::tab::{Tab, TabId};
use crate::Result;

#[derive(Debug)]
pub struct TabRegistry<V> {
    tabs: Vec<Tab<V>>,
    active: Option<TabId>,
}

impl<V: EngineView> TabRegistry<V> {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
        }
    }

    /// Append a tab and make it active
    pub fn open_tab(&mut self, tab: Tab<V>) -> TabId {
        let id = tab.id.clone();
        self.tabs.push(tab);
        self.active = Some(id.clone());

        tracing::info!(tab_id = %id, tab_count = self.tabs.len(), "Opened tab");

        id
    }

    /// Remove a tab and hand it back to the caller.
    ///
    /// Closing the active tab promotes its right-hand neighbour, or the
    /// left-hand one when it was last. Closing the only tab leaves the
    /// registry empty with no active tab.
    pub fn close_tab(&mut self, id: &TabId) -> Result<Tab<V>> {
        let index = self
            .position(id)
            .ok_or_else(|| TabError::NotFound(id.to_string()))?;
        let tab = self.tabs.remove(index);

        if self.active.as_ref() == Some(id) {
            let next = self
                .tabs
                .get(index)
                .or_else(|| index.checked_sub(1).and_then(|i| self.tabs.get(i)))
                .map(|t| t.id.clone());
            self.active = next;
        }

        tracing::info!(
            tab_id = %id,
            active = ?self.active.as_ref().map(TabId::as_str),
            tab_count = self.tabs.len(),
            "Closed tab"
        );

        Ok(tab)
    }

    pub fn set_active(&mut self, id: &TabId) -> Result<()> {
        if self.position(id).is_none() {
            return Err(TabError::NotFound(id.to_string()));
        }
        self.active = Some(id.clone());
        Ok(())
    }

    pub fn active_id(&self) -> Option<&TabId> {
        self.active.as_ref()
    }

    pub fn active_tab(&self) -> Option<&Tab<V>> {
        self.active.as_ref().and_then(|id| self.get(id))
    }

    /// Handle to the active tab's view
    pub fn active_view(&self) -> Option<V> {
        self.active_tab().map(|tab| tab.view.clone())
    }

    pub fn is_active(&self, id: &TabId) -> bool {
        self.active.as_ref() == Some(id)
    }

    pub fn get(&self, id: &TabId) -> Option<&Tab<V>> {
        self.tabs.iter().find(|t| &t.id == id)
    }

    pub fn get_mut(&mut self, id: &TabId) -> Option<&mut Tab<V>> {
        self.tabs.iter_mut().find(|t| &t.id == id)
    }

    pub fn view(&self, id: &TabId) -> Result<V> {
        self.get(id)
            .map(|tab| tab.view.clone())
            .ok_or_else(|| TabError::NotFound(id.to_string()))
    }

    /// Re-derive a tab's label from its view, returning the new label
    pub fn refresh_label(&mut self, id: &TabId) -> Result<String> {
        let tab = self
            .get_mut(id)
            .ok_or_else(|| TabError::NotFound(id.to_string()))?;
        Ok(tab.refresh_label().to_string())
    }

    pub fn position(&self, id: &TabId) -> Option<usize> {
        self.tabs.iter().position(|t| &t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab<V>> {
        self.tabs.iter()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

impl<V: EngineView> Default for TabRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct StubView {
        page: Arc<Mutex<(Option<String>, Option<String>)>>,
    }

    impl StubView {
        fn showing(uri: &str, title: Option<&str>) -> Self {
            let view = Self::default();
            *view.page.lock().unwrap() = (Some(uri.to_string()), title.map(str::to_string));
            view
        }
    }

    impl EngineView for StubView {
        fn load(&self, url: &str) {
            *self.page.lock().unwrap() = (Some(url.to_string()), None);
        }
        fn uri(&self) -> Option<String> {
            self.page.lock().unwrap().0.clone()
        }
        fn title(&self) -> Option<String> {
            self.page.lock().unwrap().1.clone()
        }
        fn can_go_back(&self) -> bool {
            false
        }
        fn go_back(&self) {}
        fn can_go_forward(&self) -> bool {
            false
        }
        fn go_forward(&self) {}
        fn reload(&self) {}
        fn print_to_pdf(&self, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    fn open(registry: &mut TabRegistry<StubView>) -> TabId {
        registry.open_tab(Tab::new(TabId::new(), StubView::default()))
    }

    #[test]
    fn test_open_makes_active() {
        let mut registry = TabRegistry::new();
        assert!(registry.active_tab().is_none());

        let first = open(&mut registry);
        assert!(registry.is_active(&first));

        let second = open(&mut registry);
        assert!(registry.is_active(&second));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.position(&second), Some(1));
    }

    #[test]
    fn test_close_active_promotes_right_neighbour() {
        let mut registry = TabRegistry::new();
        let a = open(&mut registry);
        let b = open(&mut registry);
        let c = open(&mut registry);

        registry.set_active(&b).unwrap();
        registry.close_tab(&b).unwrap();
        assert_eq!(registry.active_id(), Some(&c));

        registry.close_tab(&c).unwrap();
        assert_eq!(registry.active_id(), Some(&a));
    }

    #[test]
    fn test_close_inactive_keeps_active() {
        let mut registry = TabRegistry::new();
        let a = open(&mut registry);
        let b = open(&mut registry);

        registry.close_tab(&a).unwrap();
        assert_eq!(registry.active_id(), Some(&b));
    }

    #[test]
    fn test_close_last_tab_empties_registry() {
        let mut registry = TabRegistry::new();
        let a = open(&mut registry);

        let closed = registry.close_tab(&a).unwrap();
        assert_eq!(closed.id, a);
        assert!(registry.is_empty());
        assert!(registry.active_id().is_none());
        assert!(registry.active_view().is_none());
    }

    #[test]
    fn test_unknown_tab() {
        let mut registry: TabRegistry<StubView> = TabRegistry::new();
        let missing = TabId::from("missing");

        assert!(matches!(registry.close_tab(&missing), Err(TabError::NotFound(_))));
        assert!(matches!(registry.set_active(&missing), Err(TabError::NotFound(_))));
        assert!(registry.view(&missing).is_err());
    }

    #[test]
    fn test_refresh_label() {
        let mut registry = TabRegistry::new();
        let id = registry.open_tab(Tab::new(TabId::new(), StubView::default()));
        assert_eq!(registry.refresh_label(&id).unwrap(), "New Tab");

        let view = registry.view(&id).unwrap();
        view.load("https://docs.rs/tokio/latest/tokio/");
        assert_eq!(registry.refresh_label(&id).unwrap(), "docs.rs");

        let id = registry.open_tab(Tab::new(
            TabId::new(),
            StubView::showing("https://example.com", Some("Example Domain Home Page")),
        ));
        assert_eq!(registry.refresh_label(&id).unwrap(), "Example Domain ...");
    }
}
