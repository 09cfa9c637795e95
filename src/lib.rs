//! Jinx - typed server-rendered UI components over minijinja templates
//!
//! Components are plain Rust values bound to template files by kind. The
//! [`Engine`] renders a component into markup, rendering nested components
//! first and inlining an optional sibling script. A caller-owned
//! [`Registry`] makes components available to every template by identifier.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use jinx::{from_toml, Engine, GenericComponent, Registry};
//!
//! let engine = Engine::load(Path::new("jinx.toml")).unwrap();
//!
//! let mut registry = Registry::new();
//! let button: GenericComponent = from_toml(r#"
//!     kind = "Button"
//!     id = "submit-btn"
//!     text = "Click Me"
//! "#).unwrap();
//! let button = registry.register(button);
//!
//! let html = engine.render(&registry, &button).unwrap();
//! assert!(html.contains("Click Me"));
//! ```

pub mod component;
pub mod error;
pub mod registry;
pub mod renderer;
pub mod template;

pub use component::{from_toml, ChildSlot, Component, ComponentBase, GenericComponent, Nested};
pub use error::ValidationError;
pub use registry::Registry;
pub use renderer::{Engine, EngineConfig, Script, ScriptPlacement};
pub use template::{Manifest, ManifestError, TemplateEntry, TemplateError, TemplateResolver};

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while rendering a component
#[derive(Debug, Error)]
pub enum RenderError {
    /// The component's template could not be resolved
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Error raised by the template engine
    #[error("template engine error: {0}")]
    Engine(#[from] minijinja::Error),

    /// Error reading a script file
    #[error("error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// `Component::fields` did not produce a map
    #[error("fields of component {id} must be a map")]
    InvalidFields { id: String },

    /// A component ended up inside its own render
    #[error("circular component reference detected: {chain}")]
    Cycle { chain: String },
}
