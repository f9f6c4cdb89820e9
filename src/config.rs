//! Persistent application configuration model and loading.

use std::path::{Path, PathBuf};

use log::warn;

/// Root configuration read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Config {
    #[serde(default)]
    /// Gesture-to-action bindings.
    pub gestures: GestureConfig,
}

/// Gesture-to-action bindings resolved once per view activation.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct GestureConfig {
    /// Action name bound to an upward swipe over the cover view.
    #[serde(default = "default_swipe_action")]
    pub swipe_up_action: String,
    /// Action name bound to a downward swipe over the cover view.
    #[serde(default = "default_swipe_action")]
    pub swipe_down_action: String,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_up_action: default_swipe_action(),
            swipe_down_action: default_swipe_action(),
        }
    }
}

fn default_swipe_action() -> String {
    "nothing".to_string()
}

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("playdeck")
        .join("config.toml")
}

/// Loads configuration from `path`, falling back to defaults when the
/// file is missing or malformed.
pub fn load_config_file(path: &Path) -> Config {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!(
                "Failed to read config {}: {}. Using defaults.",
                path.display(),
                err
            );
            return Config::default();
        }
    };

    match toml::from_str::<Config>(&content) {
        Ok(config) => config,
        Err(err) => {
            warn!(
                "Failed to parse config {}: {}. Using defaults.",
                path.display(),
                err
            );
            Config::default()
        }
    }
}
