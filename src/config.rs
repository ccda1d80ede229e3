use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

/// Texts and limits used by the menu controller when rendering a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSettings {
    #[serde(default = "default_invalid_selection_notice")]
    pub invalid_selection_notice: String,
    #[serde(default = "default_refresh_hint")]
    pub refresh_hint: String,
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Attempts handed to the numeric prompt for each menu selection.
    /// Zero would never read input, so it is rejected when parsed.
    #[serde(default = "default_selection_attempts")]
    pub selection_attempts: NonZeroU32,
}

fn default_invalid_selection_notice() -> String {
    "*******Please enter a valid number*******".to_string()
}

fn default_refresh_hint() -> String {
    "Hit enter to clear the screen and refresh the menu".to_string()
}

fn default_separator() -> String {
    "--------------------------------".to_string()
}

fn default_selection_attempts() -> NonZeroU32 {
    NonZeroU32::MIN
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            invalid_selection_notice: default_invalid_selection_notice(),
            refresh_hint: default_refresh_hint(),
            separator: default_separator(),
            selection_attempts: default_selection_attempts(),
        }
    }
}

/// Application configuration read from `config.toml`.
///
/// `values` is a free-form string table that menu items can read at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuSettings,
    #[serde(default)]
    pub values: HashMap<String, String>,
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("console-menu")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".console-menu")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file {:?} doesn't exist, using defaults", config_path);
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", path);

        let config_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config = Self::from_toml_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        debug!("Loaded config with {} values", config.values.len());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config TOML")
    }

    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.menu, MenuSettings::default());
        assert_eq!(config.menu.selection_attempts.get(), 1);
        assert!(config.values.is_empty());
    }

    #[test]
    fn test_partial_menu_section_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [menu]
            refresh_hint = "Press enter to redraw"

            [values]
            TestMessage = "Hi from the config file"
            "#,
        )
        .unwrap();

        assert_eq!(config.menu.refresh_hint, "Press enter to redraw");
        assert_eq!(config.menu.separator, "--------------------------------");
        assert_eq!(config.get_value("TestMessage"), Some("Hi from the config file"));
        assert_eq!(config.get_value("Missing"), None);
    }

    #[test]
    fn test_selection_attempts_must_be_positive() {
        let config = Config::from_toml_str("[menu]\nselection_attempts = 3").unwrap();
        assert_eq!(config.menu.selection_attempts.get(), 3);

        assert!(Config::from_toml_str("[menu]\nselection_attempts = 0").is_err());
        assert!(Config::from_toml_str("[menu]\nselection_attempts = -1").is_err());
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(Config::from_toml_str("[menu\nrefresh_hint = 1").is_err());
    }
}
