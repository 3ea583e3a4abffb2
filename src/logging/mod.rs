// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Diagnostics through `tracing`.
//!
//! ```text
//!             init_logging(&LogConfig)
//!                        |
//!          tracing_subscriber::registry()
//!            |                        |
//!            v                        v
//!   stderr (always)             log file (--log-file)
//!   console_level, no time      file_level, non_blocking
//!                                     |
//!                                     v
//!                           LogGuard flushes on drop
//!
//! 0=off 1=error 2=warn (default) 3=info 4=debug 5=trace 6=dump (= trace)
//! ```
//!
//! stdout is reserved for exported text, so nothing here writes to it.


use std::fs::File;
use std::path::Path;

use anyhow::Context;
use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{ConfigError, Result};

/// Verbosity on the numeric 0-6 scale used by `-l` and the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LogLevel(u8);

impl LogLevel {
    pub const SILENT: Self = Self(0);
    pub const ERROR: Self = Self(1);
    pub const WARN: Self = Self(2);
    pub const INFO: Self = Self(3);
    pub const DEBUG: Self = Self(4);
    pub const TRACE: Self = Self(5);
    pub const DUMP: Self = Self(6);

    /// Validates a raw level.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for levels above 6.
    pub fn new(level: u8) -> std::result::Result<Self, ConfigError> {
        if level <= Self::DUMP.0 {
            Ok(Self(level))
        } else {
            Err(ConfigError::InvalidValue {
                section: "global".to_string(),
                key: "log_level".to_string(),
                message: format!("log level must be 0-6, got {level}"),
            })
        }
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// `EnvFilter` directive for this level; 5 and 6 both mean trace.
    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self.0 {
            0 => "off",
            1 => "error",
            2 => "warn",
            3 => "info",
            4 => "debug",
            _ => "trace",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::new(self.directive())
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::WARN
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = ConfigError;

    fn try_from(level: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level.0
    }
}

/// Where diagnostics go and how much of them.
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(setters(name = with_console_level), default = LogLevel::WARN)]
    console_level: LogLevel,
    #[builder(setters(name = with_file_level), default = LogLevel::TRACE)]
    file_level: LogLevel,
    #[builder(setters(name = with_log_file))]
    log_file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    #[must_use]
    pub const fn console_level(&self) -> LogLevel {
        self.console_level
    }

    #[must_use]
    pub const fn file_level(&self) -> LogLevel {
        self.file_level
    }

    #[must_use]
    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }
}

/// Keeps the file writer thread alive; pending lines are flushed on drop.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Installs the global subscriber.
///
/// Keep the returned guard until the program exits.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or a subscriber is
/// already installed.
///
/// # Example
///
/// ```no_run
/// use peekenv_rs::logging::{init_logging, LogConfig, LogLevel};
///
/// let config = LogConfig::builder()
///     .with_console_level(LogLevel::INFO)
///     .build();
/// let _guard = init_logging(&config)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(config.console_level.filter());

    let (file, file_guard) = match config.log_file() {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(create_log_file(Path::new(path))?);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(config.file_level.filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .context("failed to install the tracing subscriber")?;

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

fn create_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    File::create(path).with_context(|| format!("failed to create log file {}", path.display()))
}
