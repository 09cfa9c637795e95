//! Registry of live components, keyed by identifier
//!
//! Templates see every registered component as a global variable named after
//! its identifier, so `{{ banner }}` renders the component registered as
//! `banner`. A registry is owned by the caller and should live for a single
//! request; reuse across requests needs a [`Registry::clear`] in between.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::component::Component;

#[derive(Debug, Default)]
pub struct Registry {
    components: HashMap<String, Arc<dyn Component>>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component under its identifier and return a shared handle
    ///
    /// An existing entry with the same identifier is replaced.
    pub fn register<T: Component + 'static>(&mut self, component: T) -> Arc<T> {
        let component = Arc::new(component);
        self.register_shared(component.clone());
        component
    }

    /// Register an already shared component
    pub fn register_shared(&mut self, component: Arc<dyn Component>) {
        let id = component.id().to_string();
        if let Some(previous) = self.components.get(&id) {
            warn!(
                id = %id,
                previous = previous.kind(),
                kind = component.kind(),
                "component id already registered, overwriting"
            );
        } else {
            debug!(id = %id, kind = component.kind(), "registered component");
        }
        self.components.insert(id, component);
    }

    /// All registered components
    pub fn get(&self) -> &HashMap<String, Arc<dyn Component>> {
        &self.components
    }

    /// Look up a single component by identifier
    pub fn lookup(&self, id: &str) -> Option<&Arc<dyn Component>> {
        self.components.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    /// Identifiers of all registered components, in no particular order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Remove every component
    pub fn clear(&mut self) {
        debug!(count = self.components.len(), "clearing registry");
        self.components.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentBase, GenericComponent};

    fn component(kind: &str, id: &str) -> GenericComponent {
        GenericComponent::new(kind, ComponentBase::new(id).unwrap())
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = Registry::new();
        let button = registry.register(component("Button", "submit-btn"));

        assert_eq!(button.id(), "submit-btn");
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("submit-btn"));
        assert_eq!(registry.lookup("submit-btn").unwrap().kind(), "Button");
    }

    #[test]
    fn test_last_write_wins() {
        let mut registry = Registry::new();
        registry.register(component("Button", "dup"));
        registry.register(component("Link", "dup"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("dup").unwrap().kind(), "Link");
    }

    #[test]
    fn test_clear_empties_registry() {
        let mut registry = Registry::new();
        registry.register(component("Button", "a"));
        registry.register(component("Button", "b"));
        assert_eq!(registry.len(), 2);

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.get().is_empty());
    }

    #[test]
    fn test_register_shared() {
        let mut registry = Registry::new();
        let shared: Arc<dyn Component> = Arc::new(component("Button", "shared"));
        registry.register_shared(shared.clone());
        assert!(Arc::ptr_eq(registry.lookup("shared").unwrap(), &shared));
    }

    #[test]
    fn test_ids() {
        let mut registry = Registry::new();
        registry.register(component("Button", "a"));
        registry.register(component("Button", "b"));
        let mut ids: Vec<&str> = registry.ids().collect();
        ids.sort();
        assert_eq!(ids, ["a", "b"]);
    }
}
