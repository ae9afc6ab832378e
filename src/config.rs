//! Tunables read from an optional YAML file.
use crate::error::{Error, Result};
use crate::search::SearchOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Idle time before an edited document is saved.
    pub autosave_delay_ms: u64,
    /// Idle time before a typed query runs.
    pub search_debounce_ms: u64,
    /// Characters kept on each side of a search match.
    pub snippet_context: usize,
    pub min_query_len: usize,
    pub highlight_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            autosave_delay_ms: 2000,
            search_debounce_ms: 200,
            snippet_context: 60,
            min_query_len: 2,
            highlight_marker: "**".to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), "loading configuration");
        Self::from_yaml_str(&yaml)
    }

    /// Defaults when no path is given or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                debug!(path = %path.display(), "no configuration file, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.highlight_marker.is_empty() {
            return Err(Error::InvalidConfig(
                "highlight_marker must not be empty".to_string(),
            ));
        }
        if self.min_query_len == 0 {
            return Err(Error::InvalidConfig(
                "min_query_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            context: self.snippet_context,
            marker: self.highlight_marker.clone(),
            min_query_len: self.min_query_len,
        }
    }
}
