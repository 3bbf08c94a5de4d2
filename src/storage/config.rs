//! Configuration handling for Bookshelf
//!
//! Configuration is read from `~/.config/bookshelf/config.toml` (global)
//! and from the nearest `bookshelf.toml` in the current directory or a
//! parent (local). Local values override global ones.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the local configuration
pub const LOCAL_CONFIG_FILE: &str = "bookshelf.toml";

/// Library file used when nothing is configured
pub const DEFAULT_LIBRARY_FILE: &str = "books.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Contents of one configuration file; every key is optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ConfigFile {
    /// Path of the library sheet
    pub library: Option<PathBuf>,

    /// Languages offered when adding a book
    pub languages: Option<Vec<String>>,

    /// Default output format (text or json)
    pub default_format: Option<OutputFormat>,
}

impl ConfigFile {
    /// Reads a configuration file. Relative library paths are resolved
    /// against the directory holding the file.
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let mut file: ConfigFile = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        if let (Some(library), Some(dir)) = (&file.library, path.parent()) {
            if library.is_relative() {
                file.library = Some(dir.join(library));
            }
        }

        Ok(file)
    }

    /// Overlays `other` on top of `self`
    fn merge(self, other: ConfigFile) -> Self {
        Self {
            library: other.library.or(self.library),
            languages: other.languages.or(self.languages),
            default_format: other.default_format.or(self.default_format),
        }
    }
}

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub library: PathBuf,
    pub languages: Vec<String>,
    pub default_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library: PathBuf::from(DEFAULT_LIBRARY_FILE),
            languages: vec!["FRA".to_string(), "ENG".to_string(), "AR".to_string()],
            default_format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Self::load_from(Self::global_config_path().as_deref(), &cwd)
    }

    /// Loads configuration from an explicit global file and a starting
    /// directory for the local file lookup
    pub fn load_from(global_path: Option<&Path>, start_dir: &Path) -> Result<Self> {
        let mut merged = ConfigFile::default();

        if let Some(path) = global_path.filter(|p| p.is_file()) {
            merged = merged.merge(ConfigFile::read(path)?);
        }

        if let Some(path) = Self::find_local_config(start_dir) {
            merged = merged.merge(ConfigFile::read(&path)?);
        }

        Self::from_file(merged)
    }

    fn from_file(file: ConfigFile) -> Result<Self> {
        let defaults = Config::default();

        let languages = file.languages.unwrap_or(defaults.languages);
        if languages.is_empty() {
            return Err(ConfigError::Invalid("languages must not be empty".to_string()).into());
        }

        Ok(Self {
            library: file.library.unwrap_or(defaults.library),
            languages,
            default_format: file.default_format.unwrap_or(defaults.default_format),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "bookshelf", "bookshelf").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Finds the nearest `bookshelf.toml` walking up from `start`
    pub fn find_local_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(LOCAL_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns the language offered by default when adding a book
    pub fn default_language(&self) -> &str {
        self.languages.first().map(String::as_str).unwrap_or_default()
    }

    /// Returns the configured language matching `value`, ignoring case
    pub fn language(&self, value: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|l| l.eq_ignore_ascii_case(value))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.library, PathBuf::from("books.csv"));
        assert_eq!(config.languages, vec!["FRA", "ENG", "AR"]);
        assert_eq!(config.default_language(), "FRA");
        assert_eq!(config.default_format, OutputFormat::Text);
    }

    #[test]
    fn parse_config_file() {
        let toml = r#"
library = "/srv/books.csv"
languages = ["ENG", "DEU"]
default_format = "json"
"#;

        let file: ConfigFile = toml::from_str(toml).unwrap();
        assert_eq!(file.library, Some(PathBuf::from("/srv/books.csv")));
        assert_eq!(file.languages, Some(vec!["ENG".to_string(), "DEU".to_string()]));
        assert_eq!(file.default_format, Some(OutputFormat::Json));
    }

    #[test]
    fn relative_library_resolves_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(LOCAL_CONFIG_FILE);
        fs::write(&path, "library = \"data/books.csv\"\n").unwrap();

        let file = ConfigFile::read(&path).unwrap();
        assert_eq!(file.library, Some(dir.path().join("data/books.csv")));
    }

    #[test]
    fn local_overrides_global() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(&global, "languages = [\"ENG\"]\ndefault_format = \"json\"\n").unwrap();

        let project = dir.path().join("home");
        let nested = project.join("shelf").join("box");
        fs::create_dir_all(&nested).unwrap();
        fs::write(project.join(LOCAL_CONFIG_FILE), "languages = [\"AR\", \"FRA\"]\n").unwrap();

        let config = Config::load_from(Some(&global), &nested).unwrap();
        assert_eq!(config.languages, vec!["AR", "FRA"]);
        assert_eq!(config.default_format, OutputFormat::Json);
        assert_eq!(config.library, PathBuf::from(DEFAULT_LIBRARY_FILE));
    }

    #[test]
    fn missing_files_give_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(Some(&dir.path().join("nope.toml")), dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn empty_languages_is_invalid() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(LOCAL_CONFIG_FILE), "languages = []\n").unwrap();

        assert!(Config::load_from(None, dir.path()).is_err());
    }

    #[test]
    fn malformed_config_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(LOCAL_CONFIG_FILE), "languages = \"ENG\"\n").unwrap();

        let err = Config::load_from(None, dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config"));
    }

    #[test]
    fn language_lookup_ignores_case() {
        let config = Config::default();
        assert_eq!(config.language("eng"), Some("ENG"));
        assert_eq!(config.language("DEU"), None);
    }
}
