//! Optional TOML configuration.
//!
//! Resolution order for every setting: command-line flag, then config file,
//! then the built-in default.

use aidcards_convert::{ChangelogSeed, DEFAULT_WORKBOOK};
use aidcards_model::DEFAULT_DATA_DIR;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "aidcards.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub changelog: ChangelogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    pub workbook: Option<String>,
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangelogConfig {
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub summary: Option<String>,
}

impl Config {
    /// Load the named file, or `./aidcards.toml` if it exists. Only an
    /// explicitly named file is required to exist.
    pub fn load(explicit: Option<&str>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&text, path)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn workbook(&self, flag: Option<String>) -> PathBuf {
        flag.or_else(|| self.paths.workbook.clone())
            .unwrap_or_else(|| DEFAULT_WORKBOOK.to_string())
            .into()
    }

    pub fn data_dir(&self, flag: Option<String>) -> PathBuf {
        flag.or_else(|| self.paths.data_dir.clone())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
            .into()
    }

    /// Changelog entry parameters; unset keys fall back to today's defaults.
    pub fn changelog_seed(&self) -> ChangelogSeed {
        let mut seed = ChangelogSeed::today();
        if let Some(date) = &self.changelog.date {
            seed.date = date.clone();
        }
        if let Some(kind) = &self.changelog.kind {
            seed.kind = kind.clone();
        }
        if let Some(summary) = &self.changelog.summary {
            seed.summary = summary.clone();
        }
        seed
    }
}
