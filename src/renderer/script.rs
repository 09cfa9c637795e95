//! Script lookup for components
//!
//! A component gets at most one inlined script. An explicit `js` override
//! wins; otherwise a `.js` file next to the template with the same stem is
//! used, falling back to the hyphenated stem (`icon_button.html` ->
//! `icon-button.js`).

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::component::Component;
use crate::template::TemplateEntry;
use crate::RenderError;

/// A script file found for a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub path: PathBuf,
    pub contents: String,
}

impl Script {
    /// The script wrapped in a `<script>` element
    pub fn to_tag(&self) -> String {
        format!("<script>{}</script>", self.contents)
    }
}

/// Candidate script paths, in lookup order
pub fn script_candidates(component: &dyn Component, entry: &TemplateEntry) -> Vec<PathBuf> {
    let dir = entry.dir();
    if let Some(js) = component.base().js() {
        return vec![dir.join(js.replace('_', "-"))];
    }

    let stem = entry.stem();
    let mut candidates = vec![dir.join(format!("{}.js", stem))];
    let hyphenated = stem.replace('_', "-");
    if hyphenated != stem {
        candidates.push(dir.join(format!("{}.js", hyphenated)));
    }
    candidates
}

/// Find and read the script for a component, if there is one
pub fn find_script(
    component: &dyn Component,
    entry: &TemplateEntry,
) -> Result<Option<Script>, RenderError> {
    for path in script_candidates(component, entry) {
        if !path.is_file() {
            trace!(path = %path.display(), "no script");
            continue;
        }
        let contents = std::fs::read_to_string(&path).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(id = component.id(), path = %path.display(), "inlining script");
        return Ok(Some(Script { path, contents }));
    }
    Ok(None)
}
