//! Optional configuration from `modkit.toml` at the project root. The only
//! tunable today is the group prefix that seeds the derived `group`,
//! directory layout and generated package statements. A missing or
//! unparsable file falls back to defaults with a warning.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Prefix used when no modkit.toml overrides it
pub const DEFAULT_GROUP_PREFIX: &str = "com.piston.mc";

/// Main configuration structure matching modkit.toml
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Package prefix for the mod group, e.g. "com.piston.mc".
    /// `group` becomes `<group_prefix>.<modid>` and the source tree lives
    /// under `src/main/java/<group_prefix as path>/<modid>`.
    pub group_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            group_prefix: DEFAULT_GROUP_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from modkit.toml in the given root directory
    pub fn load(root: &Path) -> Self {
        let config_path = root.join("modkit.toml");

        if !config_path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse modkit.toml: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read modkit.toml: {}", e);
                Self::default()
            }
        }
    }
}
