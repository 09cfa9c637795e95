//! Configuration for component rendering

use serde::Deserialize;

/// Where an inlined script ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptPlacement {
    /// Append `<script>...</script>` after the rendered template
    #[default]
    Append,
    /// Only expose the script as `inline_script` in the template context
    ContextOnly,
}

/// Configuration options for the render engine
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// HTML-escape values in `.html` templates
    pub auto_escape: bool,

    /// How found scripts are inlined
    pub script_placement: ScriptPlacement,

    /// Keep the final newline of template files in the output
    pub keep_trailing_newline: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_escape: false,
            script_placement: ScriptPlacement::Append,
            keep_trailing_newline: false,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether values are HTML-escaped
    pub fn with_auto_escape(mut self, auto_escape: bool) -> Self {
        self.auto_escape = auto_escape;
        self
    }

    /// Set how scripts are inlined
    pub fn with_script_placement(mut self, placement: ScriptPlacement) -> Self {
        self.script_placement = placement;
        self
    }

    /// Set whether template files keep their final newline
    pub fn with_keep_trailing_newline(mut self, keep: bool) -> Self {
        self.keep_trailing_newline = keep;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(!config.auto_escape);
        assert_eq!(config.script_placement, ScriptPlacement::Append);
        assert!(!config.keep_trailing_newline);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::new()
            .with_auto_escape(true)
            .with_script_placement(ScriptPlacement::ContextOnly)
            .with_keep_trailing_newline(true);

        assert!(config.auto_escape);
        assert_eq!(config.script_placement, ScriptPlacement::ContextOnly);
        assert!(config.keep_trailing_newline);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: EngineConfig =
            toml::from_str(r#"script_placement = "context_only""#).expect("Should parse");
        assert_eq!(config.script_placement, ScriptPlacement::ContextOnly);
        assert!(!config.auto_escape);
    }
}
