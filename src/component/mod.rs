//! Component model
//!
//! A component is a typed record bound to a template. Building one is a pure
//! operation; it only becomes visible to templates by name once it is added
//! to a [`Registry`](crate::Registry).
//!
//! # Example
//!
//! ```rust
//! use jinx::{Component, ComponentBase};
//! use minijinja::Value;
//! use serde::Serialize;
//!
//! #[derive(Debug, Serialize)]
//! struct Button {
//!     #[serde(flatten)]
//!     base: ComponentBase,
//!     text: String,
//! }
//!
//! impl Component for Button {
//!     fn kind(&self) -> &str {
//!         "Button"
//!     }
//!
//!     fn base(&self) -> &ComponentBase {
//!         &self.base
//!     }
//!
//!     fn fields(&self) -> Value {
//!         Value::from_serialize(self)
//!     }
//! }
//!
//! let button = Button {
//!     base: ComponentBase::new("submit-btn").unwrap(),
//!     text: "Click Me".into(),
//! };
//! assert_eq!(button.id(), "submit-btn");
//! ```

mod base;
mod generic;

pub use base::ComponentBase;
pub use generic::{ChildSlot, GenericComponent};

use std::fmt;
use std::sync::Arc;

use minijinja::Value;
use serde::de::DeserializeOwned;

use crate::error::ValidationError;

/// A UI component that can be rendered through its template
pub trait Component: fmt::Debug + Send + Sync {
    /// Kind name used to look up the template, usually the type name
    fn kind(&self) -> &str;

    /// Shared identifier, script and fragment fields
    fn base(&self) -> &ComponentBase;

    /// All declared fields as a template value; must be a map
    fn fields(&self) -> Value;

    /// Fields holding nested components, rendered before this component
    fn nested(&self) -> Vec<Nested<'_>> {
        Vec::new()
    }

    fn id(&self) -> &str {
        self.base().id()
    }
}

impl<T: Component + ?Sized> Component for Arc<T> {
    fn kind(&self) -> &str {
        (**self).kind()
    }

    fn base(&self) -> &ComponentBase {
        (**self).base()
    }

    fn fields(&self) -> Value {
        (**self).fields()
    }

    fn nested(&self) -> Vec<Nested<'_>> {
        (**self).nested()
    }
}

/// A field whose value is one or more components
///
/// The renderer replaces the field's context entry with the rendered markup,
/// keeping the shape: a single string, a list of strings, or a map of
/// strings.
#[derive(Debug)]
pub enum Nested<'a> {
    One {
        field: &'a str,
        component: &'a dyn Component,
    },
    Many {
        field: &'a str,
        components: Vec<&'a dyn Component>,
    },
    Keyed {
        field: &'a str,
        components: Vec<(&'a str, &'a dyn Component)>,
    },
}

impl<'a> Nested<'a> {
    pub fn one(field: &'a str, component: &'a dyn Component) -> Self {
        Nested::One { field, component }
    }

    pub fn many<C, I>(field: &'a str, items: I) -> Self
    where
        C: Component + 'a,
        I: IntoIterator<Item = &'a C>,
    {
        Nested::Many {
            field,
            components: items
                .into_iter()
                .map(|c| c as &'a dyn Component)
                .collect(),
        }
    }

    pub fn keyed<C, I>(field: &'a str, entries: I) -> Self
    where
        C: Component + 'a,
        I: IntoIterator<Item = (&'a String, &'a C)>,
    {
        Nested::Keyed {
            field,
            components: entries
                .into_iter()
                .map(|(key, c)| (key.as_str(), c as &'a dyn Component))
                .collect(),
        }
    }

    /// Name of the field holding the components
    pub fn field(&self) -> &'a str {
        match self {
            Nested::One { field, .. } | Nested::Many { field, .. } | Nested::Keyed { field, .. } => {
                *field
            }
        }
    }
}

/// Build a component from TOML data, validating every declared field
///
/// A top-level `id` that is absent or an empty string is reported as
/// [`ValidationError::MissingId`]; every other mismatch is
/// [`ValidationError::Data`].
pub fn from_toml<T: DeserializeOwned>(source: &str) -> Result<T, ValidationError> {
    let table: toml::Table = source.parse()?;
    match table.get("id") {
        None => return Err(ValidationError::MissingId),
        Some(toml::Value::String(id)) if id.is_empty() => return Err(ValidationError::MissingId),
        Some(_) => {}
    }
    Ok(toml::Value::Table(table).try_into()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Badge {
        #[serde(flatten)]
        base: ComponentBase,
        label: String,
        count: u32,
    }

    impl Component for Badge {
        fn kind(&self) -> &str {
            "Badge"
        }

        fn base(&self) -> &ComponentBase {
            &self.base
        }

        fn fields(&self) -> Value {
            Value::from_serialize(self)
        }
    }

    #[test]
    fn test_from_toml_valid() {
        let badge: Badge = from_toml(
            r#"
            id = "inbox"
            label = "Inbox"
            count = 3
        "#,
        )
        .expect("Should build");
        assert_eq!(badge.id(), "inbox");
        assert_eq!(badge.count, 3);
    }

    #[test]
    fn test_from_toml_missing_field() {
        let result = from_toml::<Badge>(r#"id = "inbox""#);
        let err = result.unwrap_err();
        assert!(matches!(err, ValidationError::Data(_)));
        assert!(err.to_string().contains("label"));
    }

    #[test]
    fn test_from_toml_mistyped_field() {
        let result = from_toml::<Badge>(
            r#"
            id = "inbox"
            label = "Inbox"
            count = "three"
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_from_toml_missing_id() {
        let err = from_toml::<Badge>(
            r#"
            label = "Inbox"
            count = 1
        "#,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::MissingId));
        assert!(err.is_missing_id());
    }

    #[test]
    fn test_from_toml_empty_id() {
        let err = from_toml::<Badge>(
            r#"
            id = ""
            label = "Inbox"
            count = 1
        "#,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::MissingId));
    }

    #[test]
    fn test_from_toml_integer_id() {
        let badge: Badge = from_toml(
            r#"
            id = 7
            label = "Inbox"
            count = 1
        "#,
        )
        .expect("Should build");
        assert_eq!(badge.id(), "7");
    }

    #[test]
    fn test_from_toml_other_errors_are_not_missing_id() {
        let err = from_toml::<Badge>(r#"id = "inbox""#).unwrap_err();
        assert!(!err.is_missing_id());
    }

    #[test]
    fn test_fields_include_base() {
        let badge = Badge {
            base: ComponentBase::new("inbox").unwrap(),
            label: "Inbox".into(),
            count: 3,
        };
        let fields = badge.fields();
        assert_eq!(fields.get_attr("id").unwrap().as_str(), Some("inbox"));
        assert_eq!(fields.get_attr("label").unwrap().as_str(), Some("Inbox"));
        assert_eq!(fields.get_attr("html").unwrap().len(), Some(0));
    }

    #[test]
    fn test_shared_component_delegates() {
        let badge = Arc::new(Badge {
            base: ComponentBase::new("inbox").unwrap(),
            label: "Inbox".into(),
            count: 0,
        });
        let shared: &dyn Component = &badge;
        assert_eq!(shared.kind(), "Badge");
        assert_eq!(shared.id(), "inbox");
    }

    #[test]
    fn test_nested_field_names() {
        let items = vec![
            Badge {
                base: ComponentBase::new("a").unwrap(),
                label: "A".into(),
                count: 1,
            },
            Badge {
                base: ComponentBase::new("b").unwrap(),
                label: "B".into(),
                count: 2,
            },
        ];
        let nested = Nested::many("items", &items);
        assert_eq!(nested.field(), "items");
        match nested {
            Nested::Many { components, .. } => {
                let ids: Vec<&str> = components.iter().map(|c| c.id()).collect();
                assert_eq!(ids, ["a", "b"]);
            }
            other => panic!("unexpected slot: {:?}", other),
        }
    }
}
