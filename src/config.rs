use crate::models::ExtensionSetting;
use crate::{CompanionError, Result};
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the per-workspace configuration file.
pub const CONFIG_FILE: &str = "cssmod.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub companion: CompanionSettings,
    pub logging: LoggingConfig,
}

/// Settings read by the commands on every invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionSettings {
    /// Style extension for new modules; `auto` uses the detected default
    pub file_extension: ExtensionSetting,
    /// Identifier bound by the generated import line
    pub import_name: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for CompanionSettings {
    fn default() -> Self {
        Self {
            file_extension: ExtensionSetting::Auto,
            import_name: "styles".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(), // pretty, json, compact
        }
    }
}

impl Config {
    /// Load configuration for a workspace, with precedence:
    /// 1. cssmod.toml in `dir` (if exists)
    /// 2. Environment variables (CSSMOD_COMPANION__IMPORT_NAME, ...)
    /// 3. Direct environment variables (CSSMOD_FILE_EXTENSION, CSSMOD_IMPORT_NAME)
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        let config_file = dir.join(CONFIG_FILE);
        if config_file.exists() {
            builder = builder.add_source(File::from(config_file));
        }

        builder = builder.add_source(
            Environment::with_prefix("CSSMOD")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build()?;

        let mut result = match config.clone().try_deserialize::<Config>() {
            Ok(loaded) => loaded,
            Err(_) => {
                // Keep whichever sections are well-formed
                let mut partial = Config::default();
                if let Ok(companion) = config.get::<CompanionSettings>("companion") {
                    partial.companion = companion;
                }
                if let Ok(logging) = config.get::<LoggingConfig>("logging") {
                    partial.logging = logging;
                }
                partial
            }
        };

        result.merge_env_vars();
        result.validate()?;

        Ok(result)
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, file_extension: Option<&str>, import_name: Option<&str>) -> Self {
        if let Some(ext) = file_extension {
            self.companion.file_extension = ExtensionSetting::parse_lenient(ext);
        }
        if let Some(name) = import_name {
            self.companion.import_name = name.to_string();
        }
        self
    }

    fn merge_env_vars(&mut self) {
        if let Ok(ext) = std::env::var("CSSMOD_FILE_EXTENSION") {
            self.companion.file_extension = ExtensionSetting::parse_lenient(&ext);
        }
        if let Ok(name) = std::env::var("CSSMOD_IMPORT_NAME") {
            self.companion.import_name = name;
        }
    }

    /// Reject settings the commands cannot use. Call again after
    /// [`Config::with_overrides`].
    pub fn validate(&self) -> Result<()> {
        let name = self.companion.import_name.trim();
        if name.is_empty() {
            return Err(CompanionError::Configuration(
                "import_name cannot be empty".to_string(),
            ));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(CompanionError::Configuration(format!(
                "import_name '{}' is not an identifier",
                name
            )));
        }
        Ok(())
    }
}
