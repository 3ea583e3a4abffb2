// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for peekenv-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. peekenv.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. PEEKENV_* env vars
//! 5. CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! PEEKENV_EXPORT__HEADER=true      → export.header = true
//! PEEKENV_EXPORT__SCOPE=user       → export.scope = "user"
//! PEEKENV_EXPORT__VARIABLES=A,B    → export.variables = ["A", "B"]
//! PEEKENV_GLOBAL__LOG_LEVEL=4      → global.log_level = 4
//! ```
//!
//! # Example
//!
//! ```toml
//! [global]
//! log_level = 2
//!
//! [export]
//! scope = "both"
//! header = true
//! expand = false
//! variables = ["Path", "TEMP"]
//! ```

pub mod loader;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::logging::LogLevel;
use crate::registry::Scope;

use loader::ConfigLoader;

/// Name of the optional configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "peekenv.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "PEEKENV";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging options.
    pub global: GlobalConfig,
    /// Export defaults.
    pub export: ExportConfig,
}

/// Logging options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for stderr output (0-6).
    pub log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::WARN,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Defaults for an export run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Registry scope to read.
    pub scope: Scope,
    /// Prepend the header comment block.
    pub header: bool,
    /// Expand `%NAME%` references.
    pub expand: bool,
    /// Variables to export; empty exports all.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<String>,
    /// Output file; standard output when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use peekenv_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("peekenv.toml")
    ///     .with_env_prefix("PEEKENV")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }
}
