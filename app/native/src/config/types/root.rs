//! Root configuration structure and loading.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{AnimationsConfig, AssetsConfig, GestureConfig, IdleConfig, WidgetConfig};
use crate::modules::session::EffectKind;

/// Root configuration structure for Jester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct JesterConfig {
    /// JSON schema reference, ignored at runtime.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Surface sizes and pointer timing.
    pub widget: WidgetConfig,

    /// Press counting on the ball.
    pub gestures: GestureConfig,

    /// Idle bounce.
    pub idle: IdleConfig,

    /// Animation program pacing.
    pub animations: AnimationsConfig,

    /// Global keyboard shortcuts.
    ///
    /// The key is the shortcut string (e.g., "CommandOrControl+Alt+1").
    /// The value is the effect to start.
    pub keybindings: HashMap<String, EffectKind>,

    /// Joke book and image library location.
    pub assets: AssetsConfig,
}

impl Default for JesterConfig {
    fn default() -> Self {
        Self {
            schema: None,
            widget: WidgetConfig::default(),
            gestures: GestureConfig::default(),
            idle: IdleConfig::default(),
            animations: AnimationsConfig::default(),
            keybindings: default_keybindings(),
            assets: AssetsConfig::default(),
        }
    }
}

fn default_keybindings() -> HashMap<String, EffectKind> {
    HashMap::from([
        ("CommandOrControl+Alt+1".to_string(), EffectKind::Shotgun),
        ("CommandOrControl+Alt+2".to_string(), EffectKind::Ultimate),
    ])
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "No configuration file found. Expected at ~/.config/jester/config.jsonc, \
         the platform config directory, or ~/.jester.jsonc"
    )]
    NotFound,

    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Dotfile names in the home directory.
const HOME_CONFIG_FILE_NAMES: &[&str] = &[".jester.jsonc", ".jester.json"];

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/jester/config.jsonc` or `config.json`, when set
/// 2. `~/.config/jester/config.jsonc` or `config.json`
/// 3. the platform config directory (`dirs::config_dir`)
/// 4. `~/.jester.jsonc` or `~/.jester.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        push_config_dir(&mut paths, &PathBuf::from(xdg_config).join("jester"));
    }

    if let Some(home) = dirs::home_dir() {
        push_config_dir(&mut paths, &home.join(".config").join("jester"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_config_dir(&mut paths, &config_dir.join("jester"));
    }

    if let Some(home) = dirs::home_dir() {
        for filename in HOME_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Adds the config file names under `dir`, skipping duplicates (XDG may be `~/.config`).
fn push_config_dir(paths: &mut Vec<PathBuf>, dir: &Path) {
    for filename in CONFIG_FILE_NAMES {
        let path = dir.join(filename);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of the expected locations.
/// Returns `ConfigError::Io` if a configuration file exists but could not be read.
/// Returns `ConfigError::Parse` if the configuration file contains invalid JSON.
pub fn load_config() -> Result<(JesterConfig, PathBuf), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    Err(ConfigError::NotFound)
}

/// Loads the configuration from an explicit path.
///
/// Comments (`//` and `/* */`) are stripped before parsing.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist, and the I/O or
/// parse error otherwise.
pub fn load_config_from_path(path: &Path) -> Result<(JesterConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }

    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    let config: JesterConfig = serde_json::from_reader(reader)?;
    Ok((config, path.to_path_buf()))
}
