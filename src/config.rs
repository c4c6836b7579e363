//! User configuration: `~/.bizboost/config.yaml`.
//!
//! Every key is optional. A missing file is not an error; the defaults are
//! enough to run with only an API key in the environment.
//!
//! ```yaml
//! model: flash            # alias or full Gemini model id
//! base_url: https://generativelanguage.googleapis.com
//! api_key_env: GEMINI_API_KEY
//! language: te-IN
//! output_dir: ~/sites
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::resolve_language;
use crate::llm::types::DEFAULT_MODEL;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub model: String,
    pub base_url: String,
    pub api_key_env: String,
    pub language: String,
    /// Where "download" writes `index.html`. Relative paths are taken from
    /// the working directory; a leading `~/` expands to home.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_KEY_VAR.to_string(),
            language: "en-US".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    /// A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        let text = match std::fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        Self::from_yaml(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Parse YAML. An empty document is all defaults.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_yaml::from_str(text)?;
        config.language = resolve_language(&config.language).code.to_string();
        Ok(config)
    }

    /// `output_dir` with `~/` expanded.
    pub fn output_dir(&self) -> PathBuf {
        match self.output_dir.strip_prefix("~") {
            Ok(rest) => home_dir().map(|h| h.join(rest)).unwrap_or_else(|| self.output_dir.clone()),
            Err(_) => self.output_dir.clone(),
        }
    }
}

/// `~/.bizboost`, where the config and the TUI log live.
pub fn data_dir() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".bizboost"))
}

pub fn default_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join("config.yaml"))
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}
