use crate::clipboard::ClipboardBackend;
use crate::converter::{ConversionDirection, DEFAULT_DOMAIN};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".idconv.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_domain")]
    pub domain: String,

    #[serde(default)]
    pub direction: ConversionDirection,

    #[serde(default)]
    pub clipboard: ClipboardBackend,

    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_string()
}

fn default_color() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            direction: ConversionDirection::default(),
            clipboard: ClipboardBackend::default(),
            color: default_color(),
        }
    }
}

/// Values given on the command line; `None` leaves the file/default value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub domain: Option<String>,
    pub direction: Option<ConversionDirection>,
    pub clipboard: Option<ClipboardBackend>,
    pub no_color: bool,
}

/// One configuration layer as written in a TOML file; absent keys stay `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    domain: Option<String>,
    direction: Option<ConversionDirection>,
    clipboard: Option<ClipboardBackend>,
    color: Option<bool>,
}

impl ConfigFile {
    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            Path::new(LOCAL_CONFIG_FILE),
            overrides,
        )
    }

    pub fn load_from(global: Option<&Path>, local: &Path, overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                tracing::debug!(path = %global_path.display(), "loading global config");
                config = config.merge(ConfigFile::from_file(global_path)?);
            }
        }

        // Local config overrides global
        if local.exists() {
            tracing::debug!(path = %local.display(), "loading local config");
            config = config.merge(ConfigFile::from_file(local)?);
        }

        config = config.merge(ConfigFile {
            domain: overrides.domain,
            direction: overrides.direction,
            clipboard: overrides.clipboard,
            color: overrides.no_color.then_some(false),
        });

        config.domain = config.domain.trim().trim_start_matches('@').to_string();
        if config.domain.is_empty() {
            anyhow::bail!("Configured email domain is empty");
        }

        Ok(config)
    }

    /// Apply every key the layer actually sets.
    fn merge(mut self, layer: ConfigFile) -> Self {
        if let Some(domain) = layer.domain {
            self.domain = domain;
        }
        if let Some(direction) = layer.direction {
            self.direction = direction;
        }
        if let Some(clipboard) = layer.clipboard {
            self.clipboard = clipboard;
        }
        if let Some(color) = layer.color {
            self.color = color;
        }
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "idconv").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.domain, "kakaocorp.com");
        assert_eq!(config.direction, ConversionDirection::EmailToId);
        assert_eq!(config.clipboard, ClipboardBackend::System);
        assert!(config.color);
    }

    #[test]
    fn test_merge_configs() {
        let base = Config::default();
        let layer = ConfigFile {
            direction: Some(ConversionDirection::IdToEmail),
            ..Default::default()
        };

        let merged = base.merge(layer);
        assert_eq!(merged.direction, ConversionDirection::IdToEmail);
        assert_eq!(merged.domain, "kakaocorp.com");
        assert!(merged.color);
    }

    #[test]
    fn test_local_without_color_keeps_global_color() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.toml");
        let local = dir.path().join("local.toml");
        fs::write(&global, "color = false\n").unwrap();
        fs::write(&local, "domain = \"local.example\"\n").unwrap();

        let config = Config::load_from(Some(&global), &local, Overrides::default()).unwrap();
        assert!(!config.color);
        assert_eq!(config.domain, "local.example");
    }

    #[test]
    fn test_local_can_restore_default_values() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.toml");
        let local = dir.path().join("local.toml");
        fs::write(&global, "domain = \"g.example\"\ndirection = \"id-to-email\"\n").unwrap();
        fs::write(&local, "domain = \"kakaocorp.com\"\ndirection = \"email-to-id\"\n").unwrap();

        let config = Config::load_from(Some(&global), &local, Overrides::default()).unwrap();
        assert_eq!(config.direction, ConversionDirection::EmailToId);
        assert_eq!(config.domain, "kakaocorp.com");
    }

    #[test]
    fn test_cli_can_restore_default_direction() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("local.toml");
        fs::write(&local, "direction = \"id-to-email\"\n").unwrap();

        let overrides = Overrides {
            direction: Some(ConversionDirection::EmailToId),
            ..Default::default()
        };
        let config = Config::load_from(None, &local, overrides).unwrap();
        assert_eq!(config.direction, ConversionDirection::EmailToId);
    }

    #[test]
    fn test_local_overrides_global() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.toml");
        let local = dir.path().join("local.toml");
        fs::write(&global, "domain = \"global.example\"\nclipboard = \"osc52\"\n").unwrap();
        fs::write(&local, "domain = \"local.example\"\ndirection = \"id-to-email\"\n").unwrap();

        let config = Config::load_from(Some(&global), &local, Overrides::default()).unwrap();
        assert_eq!(config.domain, "local.example");
        assert_eq!(config.direction, ConversionDirection::IdToEmail);
        assert_eq!(config.clipboard, ClipboardBackend::Osc52);
    }

    #[test]
    fn test_cli_overrides_files() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("local.toml");
        fs::write(&local, "domain = \"local.example\"\n").unwrap();

        let overrides = Overrides {
            domain: Some("@cli.example".to_string()),
            no_color: true,
            ..Default::default()
        };
        let config = Config::load_from(None, &local, overrides).unwrap();
        assert_eq!(config.domain, "cli.example");
        assert!(!config.color);
    }

    #[test]
    fn test_invalid_files_are_errors() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("local.toml");
        fs::write(&local, "direction = \"sideways\"\n").unwrap();
        assert!(Config::load_from(None, &local, Overrides::default()).is_err());

        fs::write(&local, "colour = false\n").unwrap();
        assert!(Config::load_from(None, &local, Overrides::default()).is_err());

        fs::write(&local, "domain = \"  \"\n").unwrap();
        assert!(Config::load_from(None, &local, Overrides::default()).is_err());
    }
}
