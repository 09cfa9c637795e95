//! Data-driven components described entirely in TOML

use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::Value;
use serde::{Deserialize, Serialize};

use super::{Component, ComponentBase, Nested};
use crate::registry::Registry;

/// A component whose kind and attributes come from data instead of a type
///
/// ```toml
/// kind = "Card"
/// id = "welcome"
/// title = "Hello"
///
/// [children.action]
/// kind = "Button"
/// id = "ok"
/// text = "OK"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericComponent {
    kind: String,
    #[serde(flatten)]
    base: ComponentBase,
    #[serde(default)]
    children: BTreeMap<String, ChildSlot>,
    #[serde(flatten)]
    attrs: BTreeMap<String, toml::Value>,
}

/// One nested component or an ordered list of them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChildSlot {
    One(Box<GenericComponent>),
    Many(Vec<GenericComponent>),
}

impl GenericComponent {
    pub fn new(kind: impl Into<String>, base: ComponentBase) -> Self {
        Self {
            kind: kind.into(),
            base,
            children: BTreeMap::new(),
            attrs: BTreeMap::new(),
        }
    }

    /// Set a plain attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set a field holding one nested component
    pub fn with_child(mut self, field: impl Into<String>, child: GenericComponent) -> Self {
        self.children
            .insert(field.into(), ChildSlot::One(Box::new(child)));
        self
    }

    /// Set a field holding a list of nested components
    pub fn with_children(mut self, field: impl Into<String>, children: Vec<GenericComponent>) -> Self {
        self.children.insert(field.into(), ChildSlot::Many(children));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&toml::Value> {
        self.attrs.get(name)
    }

    pub fn children(&self) -> &BTreeMap<String, ChildSlot> {
        &self.children
    }

    /// Register every nested component, then this one
    ///
    /// Children are registered as copies, so later changes to the returned
    /// handle's tree are not seen through the children's own entries.
    pub fn register_all(self, registry: &mut Registry) -> Arc<GenericComponent> {
        fn register_children(component: &GenericComponent, registry: &mut Registry) {
            for slot in component.children.values() {
                match slot {
                    ChildSlot::One(child) => {
                        register_children(child, registry);
                        registry.register(GenericComponent::clone(child));
                    }
                    ChildSlot::Many(children) => {
                        for child in children {
                            register_children(child, registry);
                            registry.register(child.clone());
                        }
                    }
                }
            }
        }

        register_children(&self, registry);
        registry.register(self)
    }
}

impl Component for GenericComponent {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn fields(&self) -> Value {
        let mut fields: BTreeMap<&str, Value> = self
            .attrs
            .iter()
            .map(|(name, value)| (name.as_str(), Value::from_serialize(value)))
            .collect();
        fields.insert("kind", Value::from(self.kind.as_str()));
        fields.insert("id", Value::from(self.base.id()));
        fields.insert("js", Value::from_serialize(self.base.js()));
        fields.insert("html", Value::from_serialize(self.base.html()));
        Value::from_serialize(&fields)
    }

    fn nested(&self) -> Vec<Nested<'_>> {
        self.children
            .iter()
            .map(|(field, slot)| match slot {
                ChildSlot::One(child) => Nested::one(field, child.as_ref()),
                ChildSlot::Many(children) => Nested::many(field, children),
            })
            .collect()
    }
}
