//! Fields shared by every component

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier, script override and extra fragments of a component
///
/// Embed it with `#[serde(flatten)]` so the fields sit next to the
/// component's own attributes, both in data files and in the template
/// context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentBase {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    #[serde(default)]
    js: Option<String>,
    #[serde(default)]
    html: Vec<String>,
}

impl ComponentBase {
    /// Create base fields with the given identifier
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::MissingId);
        }
        Ok(Self {
            id,
            js: None,
            html: Vec::new(),
        })
    }

    /// Name a script file to inline instead of the one found by convention
    pub fn with_js(mut self, file: impl Into<String>) -> Self {
        self.js = Some(file.into());
        self
    }

    /// Add an extra template fragment, rendered with the component's context
    pub fn with_html(mut self, fragment: impl Into<String>) -> Self {
        self.html.push(fragment.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn js(&self) -> Option<&str> {
        self.js.as_deref()
    }

    pub fn html(&self) -> &[String] {
        &self.html
    }
}

/// Identifiers may be written as strings or integers in data files
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(n) => n.to_string(),
    };
    if id.is_empty() {
        return Err(de::Error::custom("id is required"));
    }
    Ok(id)
}
