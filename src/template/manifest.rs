//! Manifest files describing the kind-to-template table
//!
//! ```toml
//! template_root = "templates"
//!
//! [engine]
//! script_placement = "append"
//!
//! [components]
//! Button = "ui"                 # ui/button.html by convention
//!
//! [templates]
//! Card = "cards/card.html"      # explicit path
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::resolver::{TemplateError, TemplateResolver};
use crate::renderer::EngineConfig;

/// Errors that can occur when loading a manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse manifest TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Directory templates are loaded from
    #[serde(default = "default_root")]
    pub template_root: PathBuf,
    #[serde(default)]
    pub engine: EngineConfig,
    /// Kind -> directory, resolved by naming convention
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    /// Kind -> explicit template path
    #[serde(default)]
    pub templates: BTreeMap<String, String>,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

impl Manifest {
    /// Load a manifest from a TOML file
    ///
    /// A relative `template_root` is taken relative to the manifest's
    /// directory.
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        let mut manifest = Self::from_str(&content)?;
        if manifest.template_root.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            manifest.template_root = base.join(&manifest.template_root);
        }
        Ok(manifest)
    }

    /// Load a manifest from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// Build the resolver described by this manifest and validate it
    pub fn resolver(&self) -> Result<TemplateResolver, TemplateError> {
        let mut resolver = TemplateResolver::new(&self.template_root);
        for (kind, dir) in &self.components {
            resolver.register_convention(kind, dir)?;
        }
        for (kind, path) in &self.templates {
            resolver.register_path(kind, path)?;
        }
        resolver.validate()?;
        Ok(resolver)
    }
}
