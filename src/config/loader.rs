// Configuration file loading

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::{DialogConfig, ResponsePoolKind};
use crate::feedback::OptionSet;

/// Partial dialog configuration as written in a widget config file. A file
/// names a preset and overrides individual fields on top of it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DialogOverrides {
    /// Preset name the overrides apply to; defaults stay in effect otherwise
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(rename = "feedbackTextMaxLen", alias = "feedback_text_max_len", default)]
    pub feedback_text_max_len: Option<usize>,
    #[serde(
        rename = "showSuggestionsOnMessageIndex",
        alias = "show_suggestions_on_message_index",
        default
    )]
    pub show_suggestions_on_message_index: Option<usize>,
    #[serde(rename = "feedbackEnabled", alias = "feedback_enabled", default)]
    pub feedback_enabled: Option<bool>,
    #[serde(rename = "optionSet", alias = "option_set", default)]
    pub option_set: Option<OptionSet>,
    #[serde(rename = "responseDelayMs", alias = "response_delay_ms", default)]
    pub response_delay_ms: Option<u64>,
    #[serde(rename = "requireAuth", alias = "require_auth", default)]
    pub require_auth: Option<bool>,
    #[serde(rename = "singleFeedbackFlow", alias = "single_feedback_flow", default)]
    pub single_feedback_flow: Option<bool>,
    #[serde(rename = "councilRouting", alias = "council_routing", default)]
    pub council_routing: Option<bool>,
    #[serde(rename = "proposalKeywords", alias = "proposal_keywords", default)]
    pub proposal_keywords: Option<bool>,
    #[serde(rename = "responsePool", alias = "response_pool", default)]
    pub response_pool: Option<ResponsePoolKind>,
    #[serde(rename = "seedMessages", alias = "seed_messages", default)]
    pub seed_messages: Option<Vec<String>>,
    #[serde(rename = "initialSuggestions", alias = "initial_suggestions", default)]
    pub initial_suggestions: Option<Vec<String>>,
}

impl DialogOverrides {
    /// Apply set fields over the base config.
    pub fn apply(self, base: &mut DialogConfig) {
        if let Some(v) = self.feedback_text_max_len {
            base.feedback_text_max_len = v;
        }
        if let Some(v) = self.show_suggestions_on_message_index {
            base.show_suggestions_on_message_index = Some(v);
        }
        if let Some(v) = self.feedback_enabled {
            base.feedback_enabled = v;
        }
        if let Some(v) = self.option_set {
            base.option_set = v;
        }
        if let Some(v) = self.response_delay_ms {
            base.response_delay_ms = v;
        }
        if let Some(v) = self.require_auth {
            base.require_auth = v;
        }
        if let Some(v) = self.single_feedback_flow {
            base.single_feedback_flow = v;
        }
        if let Some(v) = self.council_routing {
            base.council_routing = v;
        }
        if let Some(v) = self.proposal_keywords {
            base.proposal_keywords = v;
        }
        if let Some(v) = self.response_pool {
            base.response_pool = v;
        }
        if let Some(v) = self.seed_messages {
            base.seed_messages = v;
        }
        if let Some(v) = self.initial_suggestions {
            base.initial_suggestions = v;
        }
    }
}

/// Config loader
pub struct ConfigLoader {
    /// Widget config path
    path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { path: None }
    }

    /// Point the loader at a widget directory holding `arto.toml`.
    pub fn with_widget_path(mut self, path: &Path) -> Self {
        self.path = Some(path.join("arto.toml"));
        self
    }

    /// Load the dialog config: the file's named preset (or built-in
    /// defaults) with the file's overrides applied. A missing file yields
    /// the plain default config.
    pub fn load(&self) -> Result<DialogConfig> {
        let Some(ref path) = self.path else {
            return Ok(DialogConfig::default());
        };
        if !path.exists() {
            return Ok(DialogConfig::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

        let overrides: DialogOverrides = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;

        let mut config = match overrides.variant.as_deref() {
            Some(name) => DialogConfig::preset(name)
                .ok_or_else(|| anyhow!("Unknown dialog variant '{}'", name))?,
            None => DialogConfig::default(),
        };
        overrides.apply(&mut config);

        Self::validate_config(&config)?;

        log::info!("Loaded dialog config from: {}", path.display());
        Ok(config)
    }

    /// Validate config values
    fn validate_config(config: &DialogConfig) -> Result<()> {
        if config.feedback_text_max_len == 0 {
            return Err(anyhow!("feedback_text_max_len must be greater than 0"));
        }

        if config.response_delay_ms == 0 {
            return Err(anyhow!("response_delay_ms must be greater than 0"));
        }

        if let Some(index) = config.show_suggestions_on_message_index {
            if index >= config.seed_messages.len() {
                return Err(anyhow!(
                    "show_suggestions_on_message_index {} is outside the {} seed messages",
                    index,
                    config.seed_messages.len()
                ));
            }
        }

        Ok(())
    }

    pub fn config_exists(&self) -> bool {
        self.path.as_ref().map(|p| p.exists()).unwrap_or(false)
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Save a config to the widget path.
    pub fn save(&self, config: &DialogConfig) -> Result<()> {
        let Some(ref path) = self.path else {
            return Err(anyhow!("No config path available"));
        };

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    anyhow!(
                        "Failed to create config directory '{}': {}",
                        parent.display(),
                        e
                    )
                })?;
            }
        }

        Self::validate_config(config)?;

        let contents = toml::to_string_pretty(config)
            .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;

        fs::write(path, contents)
            .map_err(|e| anyhow!("Failed to write config file '{}': {}", path.display(), e))?;

        log::info!("Saved config to: {}", path.display());
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = create_test_dir();
        let loader = ConfigLoader::new().with_widget_path(temp_dir.path());

        let config = loader.load().unwrap();
        assert_eq!(config.feedback_text_max_len, 180);
        assert!(!loader.config_exists());
    }

    #[test]
    fn test_loads_preset_with_overrides() {
        let temp_dir = create_test_dir();

        let config_content = r#"
variant = "council"
response_delay_ms = 500
feedback_enabled = false
"#;
        fs::write(temp_dir.path().join("arto.toml"), config_content).unwrap();

        let loader = ConfigLoader::new().with_widget_path(temp_dir.path());
        let config = loader.load().unwrap();

        // Preset values survive where not overridden
        assert!(config.council_routing);
        assert_eq!(config.initial_suggestions.len(), 3);
        // Overrides win
        assert_eq!(config.response_delay_ms, 500);
        assert!(!config.feedback_enabled);
    }

    #[test]
    fn test_unknown_variant_is_an_error() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("arto.toml"), "variant = \"bogus\"").unwrap();

        let loader = ConfigLoader::new().with_widget_path(temp_dir.path());
        assert!(loader.load().is_err());
    }

    #[test]
    fn test_validates_bounds() {
        let temp_dir = create_test_dir();
        fs::write(
            temp_dir.path().join("arto.toml"),
            "feedback_text_max_len = 0",
        )
        .unwrap();

        let loader = ConfigLoader::new().with_widget_path(temp_dir.path());
        assert!(loader.load().is_err());

        fs::write(temp_dir.path().join("arto.toml"), "response_delay_ms = 0").unwrap();
        assert!(loader.load().is_err());
    }

    #[test]
    fn test_validates_suggestion_index_in_range() {
        let temp_dir = create_test_dir();
        let config_content = r#"
seed_messages = ["hi"]
show_suggestions_on_message_index = 3
"#;
        fs::write(temp_dir.path().join("arto.toml"), config_content).unwrap();

        let loader = ConfigLoader::new().with_widget_path(temp_dir.path());
        assert!(loader.load().is_err());
    }

    #[test]
    fn test_save_round_trip() {
        let temp_dir = create_test_dir();
        let loader = ConfigLoader::new().with_widget_path(temp_dir.path());

        loader.save(&DialogConfig::capture_v2()).unwrap();
        assert!(loader.config_exists());

        let loaded = loader.load().unwrap();
        assert_eq!(loaded.feedback_text_max_len, 600);
        assert_eq!(loaded.response_delay_ms, 1500);
    }
}
