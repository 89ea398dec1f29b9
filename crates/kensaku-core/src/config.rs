use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::KensakuError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub images: ImageConfig,
    pub appearance: AppearanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub discard_stale_responses: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    pub allowed_hosts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppearanceConfig {
    pub mode: ThemeMode,
}

/// Light/dark preference. `System` follows the OS setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    System,
    #[default]
    Dark,
    Light,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl AppConfig {
    /// Load config: user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, KensakuError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load a specific file, merged over built-in defaults.
    pub fn load_from(path: &Path) -> Result<Self, KensakuError> {
        let user_str = std::fs::read_to_string(path)?;
        Self::from_overrides(&user_str)
    }

    /// Parse a (possibly partial) TOML document over the built-in defaults.
    pub fn from_overrides(user_str: &str) -> Result<Self, KensakuError> {
        let mut base: toml::Table =
            toml::from_str(DEFAULT_CONFIG).map_err(|e| KensakuError::Config(e.to_string()))?;
        let overlay: toml::Table =
            toml::from_str(user_str).map_err(|e| KensakuError::Config(e.to_string()))?;
        merge_tables(&mut base, overlay);
        toml::Value::Table(base)
            .try_into()
            .map_err(|e: toml::de::Error| KensakuError::Config(e.to_string()))
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "kensaku")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

/// Recursively overlay `overlay` onto `base`; scalars and arrays replace.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(sub) => {
                if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                    merge_tables(existing, sub);
                } else {
                    base.insert(key, toml::Value::Table(sub));
                }
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "https://api.jikan.moe/v4");
        assert_eq!(config.search.debounce_ms, 1000);
        assert!(!config.search.discard_stale_responses);
        assert_eq!(config.images.allowed_hosts, vec!["cdn.myanimelist.net"]);
        assert_eq!(config.appearance.mode, ThemeMode::Dark);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = AppConfig::from_overrides(
            r#"
            [search]
            debounce_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.search.debounce_ms, 250);
        assert!(!config.search.discard_stale_responses);
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.search.debounce(), Duration::from_millis(250));
    }

    #[test]
    fn test_override_replaces_arrays() {
        let config = AppConfig::from_overrides(
            r#"
            [images]
            allowed_hosts = ["img.example.org"]
            "#,
        )
        .unwrap();
        assert_eq!(config.images.allowed_hosts, vec!["img.example.org"]);
    }

    #[test]
    fn test_invalid_override_is_config_error() {
        let err = AppConfig::from_overrides("[search]\ndebounce_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, KensakuError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[appearance]\nmode = \"light\"\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.appearance.mode, ThemeMode::Light);

        let missing = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, KensakuError::Io(_)));
    }

    #[test]
    fn test_timeout_never_zero() {
        let mut config = AppConfig::default();
        config.api.timeout_secs = 0;
        assert_eq!(config.api.timeout(), Duration::from_secs(1));
    }
}
