// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Options that configure the tool itself rather than the export.
//!
//! ```text
//! --config FILE     ← Additional config files (can repeat)
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (defaults to --log-level)
//! --log-file FILE   ← Enables file logging
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Additional TOML configuration file(s), loaded after `peekenv.toml`.
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, defaults to --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Converts the options that were given into `global.*` overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides = Vec::new();

        if let Some(level) = self.log_level {
            overrides.push(("global.log_level", i64::from(level).into()));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("global.file_log_level", i64::from(level).into()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file", path.to_string_lossy().into_owned().into()));
        }

        overrides
    }
}
