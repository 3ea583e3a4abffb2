// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for peekenv-rs using clap derive.
//!
//! ```text
//! peekenv [-m] [-u] [-H] [-x] [-o FILE] [global options] [VARIABLES]...
//!
//!   -m / -u        scope (both or neither => both)
//!   -H             header comment block
//!   -x             expand %NAME% references
//!   -o FILE        output file ("-" or "stdout" => stdout)
//!   VARIABLES      names to export (default: all)
//! ```
//!
//! Only flags that were given become config overrides, so unset flags
//! never mask values from `peekenv.toml` or `PEEKENV_*`.

pub mod global;


use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::cli::global::GlobalOptions;
use crate::registry::Scope;

/// Windows registry environment exporter
///
/// Exports machine and user environment variables from the registry.
#[derive(Debug, Parser)]
#[command(
    name = "peekenv",
    author,
    version,
    disable_version_flag = true,
    about = "Export Windows registry environment variables",
    long_about = "peekenv-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Exports the environment variables stored in the Windows registry\n\
                  as sections of one value segment per line. Without -m or -u, the\n\
                  machine and user variables are merged, user values overriding\n\
                  machine values and user Path entries appended to machine Path.",
    after_help = "CONFIG FILES:\n\n\
                  peekenv reads `peekenv.toml` from the current directory if it\n\
                  exists, then every file given with --config, then PEEKENV_*\n\
                  environment variables (PEEKENV_EXPORT__HEADER=true). Flags on\n\
                  the command line override all of them."
)]
pub struct Cli {
    /// Reads machine environment variables.
    #[arg(short = 'm', long)]
    pub machine: bool,

    /// Reads user environment variables.
    #[arg(short = 'u', long)]
    pub user: bool,

    /// Prepends a comment block naming the registry locations.
    #[arg(short = 'H', long)]
    pub header: bool,

    /// Expands %NAME% references in values.
    #[arg(short = 'x', long)]
    pub expand: bool,

    /// Output file; "-" or "stdout" writes to standard output.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Options that configure logging and config loading
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Variables to export; all when empty.
    #[arg(value_name = "VARIABLES")]
    pub variables: Vec<String>,

    /// Prints version.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
}

impl Cli {
    /// Scope selected by `-m`/`-u`, if either was given.
    #[must_use]
    pub const fn scope(&self) -> Option<Scope> {
        if self.machine || self.user {
            Some(Scope::from_flags(self.machine, self.user))
        } else {
            None
        }
    }

    /// Converts the given flags into configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides = self.global.to_config_overrides();

        if let Some(scope) = self.scope() {
            overrides.push(("export.scope", scope.to_string().into()));
        }

        if self.header {
            overrides.push(("export.header", true.into()));
        }

        if self.expand {
            overrides.push(("export.expand", true.into()));
        }

        if let Some(ref output) = self.output {
            overrides.push(("export.output", output.to_string_lossy().into_owned().into()));
        }

        if !self.variables.is_empty() {
            overrides.push(("export.variables", self.variables.clone().into()));
        }

        overrides
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
