/// User-facing settings for generated code.
///
/// Settings are layered, later sources overriding earlier ones:
///
///   1. Built-in defaults (`private` property, `public` constructor, tab
///      indentation).
///   2. The user config file, `<config dir>/phpctor/config.toml`.
///   3. The workspace file, `.phpctor.toml` at the workspace root.
///   4. The `phpConstructor` section of the client's LSP settings
///      (`initializationOptions`, then `workspace/didChangeConfiguration`).
///
/// ```toml
/// visibility = "protected"
/// constructor_visibility = "public"
/// indent = "    "
/// ```
use std::path::{Path, PathBuf};

use etcetera::BaseStrategy;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::Visibility;

/// Name of the workspace-level config file.
pub const WORKSPACE_CONFIG_FILE: &str = ".phpctor.toml";

/// Section of the LSP settings object holding our keys.
pub const SETTINGS_SECTION: &str = "phpConstructor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InserterConfig {
    /// Modifier for the generated property declaration.
    pub visibility: Visibility,
    /// Modifier for a generated constructor.
    pub constructor_visibility: Visibility,
    /// One level of indentation.
    pub indent: String,
}

impl Default for InserterConfig {
    fn default() -> Self {
        Self {
            visibility: Visibility::Private,
            constructor_visibility: Visibility::Public,
            indent: "\t".to_string(),
        }
    }
}

/// One layer of settings.  Absent keys leave the value below untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    pub visibility: Option<Visibility>,
    #[serde(alias = "constructorVisibility")]
    pub constructor_visibility: Option<Visibility>,
    pub indent: Option<String>,
}

impl InserterConfig {
    /// Defaults overlaid with the user and workspace config files.
    pub fn load(workspace_root: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = user_config_path() {
            config.merge_file(&path)?;
        }
        if let Some(root) = workspace_root {
            config.merge_file(&root.join(WORKSPACE_CONFIG_FILE))?;
        }

        Ok(config)
    }

    /// Overlay a TOML file.  A missing file is not an error.
    pub fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        self.merge_toml(&content)
            .map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(())
    }

    /// Overlay settings written as TOML.
    pub fn merge_toml(&mut self, content: &str) -> Result<(), toml::de::Error> {
        let layer: PartialConfig = toml::from_str(content)?;
        self.merge(layer);
        Ok(())
    }

    /// Overlay the `phpConstructor` section of an LSP settings object.
    ///
    /// Accepts either the whole settings object or the section itself.
    /// Values that do not deserialize are skipped with a warning so one bad
    /// key does not discard the rest.
    pub fn apply_settings(&mut self, settings: &serde_json::Value) {
        let section = settings.get(SETTINGS_SECTION).unwrap_or(settings);
        let Some(map) = section.as_object() else {
            return;
        };

        let mut layer = PartialConfig::default();
        for (key, value) in map {
            match key.as_str() {
                "visibility" => layer.visibility = parse_setting(key, value),
                "constructor_visibility" | "constructorVisibility" => {
                    layer.constructor_visibility = parse_setting(key, value)
                }
                "indent" => layer.indent = parse_setting(key, value),
                _ => {}
            }
        }
        self.merge(layer);
    }

    fn merge(&mut self, layer: PartialConfig) {
        if let Some(visibility) = layer.visibility {
            self.visibility = visibility;
        }
        if let Some(visibility) = layer.constructor_visibility {
            self.constructor_visibility = visibility;
        }
        if let Some(indent) = layer.indent
            && !indent.is_empty()
        {
            self.indent = indent;
        }
    }
}

fn parse_setting<T: serde::de::DeserializeOwned>(key: &str, value: &serde_json::Value) -> Option<T> {
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(key, %value, error = %e, "ignoring invalid setting");
            None
        }
    }
}

/// `<config dir>/phpctor/config.toml`, when a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    let strategy = etcetera::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("phpctor").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn defaults() {
        let config = InserterConfig::default();
        assert_eq!(config.visibility, Visibility::Private);
        assert_eq!(config.constructor_visibility, Visibility::Public);
        assert_eq!(config.indent, "\t");
    }

    #[test]
    fn workspace_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join(WORKSPACE_CONFIG_FILE);
        fs::write(&path, "visibility = \"protected\"\nindent = \"    \"\n")
            .expect("failed to write config");

        let mut config = InserterConfig::default();
        config.merge_file(&path).unwrap();
        assert_eq!(config.visibility, Visibility::Protected);
        assert_eq!(config.constructor_visibility, Visibility::Public);
        assert_eq!(config.indent, "    ");
    }

    #[test]
    fn missing_file_is_ignored() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut config = InserterConfig::default();
        config.merge_file(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, InserterConfig::default());
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join(WORKSPACE_CONFIG_FILE);
        fs::write(&path, "visibility = \"friendly\"\n").expect("failed to write config");

        let err = InserterConfig::default().merge_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn lsp_settings_section() {
        let mut config = InserterConfig::default();
        config.apply_settings(&json!({
            "phpConstructor": {
                "visibility": "public",
                "constructorVisibility": "protected"
            }
        }));
        assert_eq!(config.visibility, Visibility::Public);
        assert_eq!(config.constructor_visibility, Visibility::Protected);
    }

    #[test]
    fn lsp_settings_without_section_wrapper() {
        let mut config = InserterConfig::default();
        config.apply_settings(&json!({ "constructor_visibility": "private" }));
        assert_eq!(config.constructor_visibility, Visibility::Private);
    }

    #[test]
    fn bad_setting_keeps_the_rest() {
        let mut config = InserterConfig::default();
        config.apply_settings(&json!({
            "phpConstructor": { "visibility": "friendly", "indent": "  " }
        }));
        assert_eq!(config.visibility, Visibility::Private);
        assert_eq!(config.indent, "  ");
    }

    #[test]
    fn empty_indent_is_ignored() {
        let mut config = InserterConfig::default();
        config.apply_settings(&json!({ "indent": "" }));
        assert_eq!(config.indent, "\t");
    }
}
