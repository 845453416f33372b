//! Application configuration module
//!
//! This module handles loading and validating the settings shared by the
//! `unwrap` and `wrap` commands. Every field can be overridden on the
//! command line.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::alignment::{UnwrapOptions, DEFAULT_MISSING_MESSAGE};
use crate::corpus::DocumentFilter;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Placeholder for segments a translator or system does not cover
    #[serde(default = "default_missing_message")]
    pub missing_message: String,

    /// Separate documents with an empty line in unwrapped output
    #[serde(default)]
    pub document_boundaries: bool,

    /// Leave test-suite documents out of unwrapped output
    #[serde(default)]
    pub no_testsuites: bool,

    /// Prefix of the files written by `unwrap`
    #[serde(default = "default_output_stem")]
    pub output_stem: String,

    /// System name given to wrapped hypotheses
    #[serde(default = "default_system_name")]
    pub system_name: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_missing_message() -> String {
    DEFAULT_MISSING_MESSAGE.to_string()
}

fn default_output_stem() -> String {
    "wmt".to_string()
}

fn default_system_name() -> String {
    "MT".to_string()
}

impl Config {
    /// Load a configuration file, or the defaults when `path` does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Output is line aligned; a multi-line placeholder would shift every stream
        if self.missing_message.contains(['\n', '\r']) {
            return Err(anyhow!("Missing translation message must fit on one line"));
        }

        if self.output_stem.trim().is_empty() {
            return Err(anyhow!("Output stem must not be empty"));
        }

        if self.system_name.trim().is_empty() {
            return Err(anyhow!("System name must not be empty"));
        }

        Ok(())
    }

    /// Unwrap options for the given collection allow-list
    pub fn unwrap_options(&self, collections: Vec<String>) -> UnwrapOptions {
        UnwrapOptions {
            missing_message: self.missing_message.clone(),
            document_boundaries: self.document_boundaries,
            filter: DocumentFilter::new(self.no_testsuites, collections),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            missing_message: default_missing_message(),
            document_boundaries: false,
            no_testsuites: false,
            output_stem: default_output_stem(),
            system_name: default_system_name(),
            log_level: LogLevel::default(),
        }
    }
}
