//! Configuration management
//!
//! Every field has a default, so the pipeline runs without any config file;
//! a YAML file only needs the keys it overrides:
//!
//! ```yaml
//! log_level: info
//! toolchains:
//!   install: npm ci
//! options:
//!   xtrace: false
//! ```

use crate::executor::ShellOptions;
use crate::pipeline::{PipelineError, Toolchains};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level
    pub log_level: String,
    /// Shell used to run commands
    pub shell: String,
    /// Shell strictness
    pub options: ShellOptions,
    /// Commands of the standard pipeline
    pub toolchains: Toolchains,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            shell: "bash".to_string(),
            options: ShellOptions::default(),
            toolchains: Toolchains::default(),
        }
    }
}

impl Config {
    /// Parses configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] when the YAML is malformed or has
    /// fields of the wrong type.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PipelineError> {
        serde_yaml::from_str(yaml).map_err(|e| PipelineError::Config(e.to_string()))
    }

    /// Loads configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] when the file cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&yaml)
    }
}
