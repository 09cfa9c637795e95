//! Renderer for turning components into markup
//!
//! The [`Engine`] resolves a component's template, renders nested
//! components first, exposes registry entries as globals rendered on lookup,
//! inlines the component's script and renders the result.

pub mod config;
mod engine;
pub mod script;

pub use config::{EngineConfig, ScriptPlacement};
pub use engine::{Engine, INLINE_SCRIPT_KEY};
pub use script::{find_script, Script};
