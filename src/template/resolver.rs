//! Template resolution - maps component kinds to template files

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors that can occur while resolving templates
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template registered for this component kind
    #[error("no template registered for component kind {kind}")]
    UnknownKind { kind: String },

    /// Template file missing on disk
    #[error("template for {kind} not found: {path}")]
    NotFound { kind: String, path: PathBuf },

    /// Kind registered twice
    #[error("duplicate template registration for component kind {kind}")]
    Duplicate { kind: String },
}

/// A resolved template location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    kind: String,
    /// Template name relative to the root, `/`-separated
    name: String,
    path: PathBuf,
}

impl TemplateEntry {
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Name of the template as the template loader knows it
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path of the template file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the template and its sibling files
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// File name of the template without its extension
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }
}

/// Kind-to-template table, built once at startup
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    root: PathBuf,
    entries: HashMap<String, TemplateEntry>,
}

impl TemplateResolver {
    /// Create an empty resolver for templates under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: HashMap::new(),
        }
    }

    /// Register a kind whose template follows the naming convention
    ///
    /// `IconButton` registered with `ui` resolves to `ui/icon_button.html`.
    pub fn register_convention(&mut self, kind: &str, dir: &str) -> Result<(), TemplateError> {
        self.register_path(kind, &convention_path(kind, dir))
    }

    /// Register a kind with an explicit template path relative to the root
    pub fn register_path(&mut self, kind: &str, path: &str) -> Result<(), TemplateError> {
        if self.entries.contains_key(kind) {
            return Err(TemplateError::Duplicate {
                kind: kind.to_string(),
            });
        }

        let name = normalize_name(path);
        let entry = TemplateEntry {
            kind: kind.to_string(),
            path: self.root.join(&name),
            name,
        };
        debug!(kind, template = %entry.name, "registered template");
        self.entries.insert(kind.to_string(), entry);
        Ok(())
    }

    /// Builder form of [`register_convention`](Self::register_convention)
    pub fn with_convention(mut self, kind: &str, dir: &str) -> Result<Self, TemplateError> {
        self.register_convention(kind, dir)?;
        Ok(self)
    }

    /// Builder form of [`register_path`](Self::register_path)
    pub fn with_path(mut self, kind: &str, path: &str) -> Result<Self, TemplateError> {
        self.register_path(kind, path)?;
        Ok(self)
    }

    /// Check that every registered template exists
    ///
    /// Kinds are checked in sorted order so the reported error is stable.
    pub fn validate(&self) -> Result<(), TemplateError> {
        let mut kinds: Vec<&String> = self.entries.keys().collect();
        kinds.sort();
        for kind in kinds {
            check_exists(&self.entries[kind])?;
        }
        Ok(())
    }

    /// Resolve the template for a component kind
    pub fn resolve(&self, kind: &str) -> Result<&TemplateEntry, TemplateError> {
        let entry = self
            .entries
            .get(kind)
            .ok_or_else(|| TemplateError::UnknownKind {
                kind: kind.to_string(),
            })?;
        check_exists(entry)?;
        Ok(entry)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    /// Get all registered kinds
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn check_exists(entry: &TemplateEntry) -> Result<(), TemplateError> {
    if entry.path.is_file() {
        Ok(())
    } else {
        Err(TemplateError::NotFound {
            kind: entry.kind.clone(),
            path: entry.path.clone(),
        })
    }
}

/// Convert a kind name to its template file stem
///
/// An underscore goes before every ASCII uppercase letter except a leading
/// one, then the whole name is lowercased.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Template path for a kind declared in `dir`, relative to the template root
pub fn convention_path(kind: &str, dir: &str) -> String {
    let dir = normalize_name(dir);
    let file = format!("{}.html", snake_case(kind));
    if dir.is_empty() || dir == "." {
        file
    } else {
        format!("{}/{}", dir, file)
    }
}

fn normalize_name(path: &str) -> String {
    path.replace('\\', "/")
        .trim_start_matches("./")
        .trim_end_matches('/')
        .to_string()
}
