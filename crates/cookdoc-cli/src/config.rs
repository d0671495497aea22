//! `.cookdoc.toml` loading.
//!
//! ```toml
//! cookbook_path = ["site-cookbooks", "cookbooks"]
//!
//! [registry]
//! program = "knife"
//! args = ["cookbook", "list"]
//!
//! [git]
//! program = "git"
//! ```
//!
//! Relative `cookbook_path` entries resolve against the file's directory.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = ".cookdoc.toml";
pub const DEFAULT_COOKBOOK_PATH: &str = "cookbooks";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Local search roots, highest precedence first.
    pub cookbook_path: Vec<PathBuf>,
    pub registry: RegistryConfig,
    pub git: GitConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    pub program: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cookbook_path: vec![PathBuf::from(DEFAULT_COOKBOOK_PATH)],
            registry: RegistryConfig::default(),
            git: GitConfig::default(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            program: "knife".to_string(),
            args: vec!["cookbook".to_string(), "list".to_string()],
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl Config {
    /// Parse `text` read from `path`, resolving relative search roots against
    /// the directory that holds `path`.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        if let Some(base_dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            config.cookbook_path = config
                .cookbook_path
                .into_iter()
                .map(|root| {
                    if root.is_absolute() {
                        root
                    } else {
                        base_dir.join(root)
                    }
                })
                .collect();
        }
        Ok(config)
    }

    /// Load the explicit config file, or the default one if it exists.
    ///
    /// A missing explicit file is an error; a missing default file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };
        if !required && !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text, &path)
    }

    /// Replace the configured search roots when any overrides were given.
    pub fn with_cookbook_paths(mut self, overrides: Vec<PathBuf>) -> Self {
        if !overrides.is_empty() {
            self.cookbook_path = overrides;
        }
        self
    }
}
