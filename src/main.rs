// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config (file < --config < env < flags)
//!              --> Logging
//!              --> ExportOptions --> export() --> ExitCode
//! ```

use std::process::ExitCode;

use peekenv_rs::cli::{self, Cli};
use peekenv_rs::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use peekenv_rs::error::Result;
use peekenv_rs::export::{ExportOptions, ExportSummary, format_timestamp};
use peekenv_rs::logging::{LogConfig, LogGuard, init_logging};

use mimalloc::MiMalloc;
use tracing::debug;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    match run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExportSummary> {
    let (config, loaded_files) = load_config(cli)?;
    let _log_guard = start_logging(&config)?;

    for (source, path) in &loaded_files {
        debug!(source = %source, path = %path.display(), "loaded configuration");
    }

    let options = ExportOptions::from_config(&config);
    debug!(?options, "resolved export options");

    let timestamp = format_timestamp(&chrono::Local::now());
    run_export(&options, &timestamp)
}

fn load_config(cli: &Cli) -> Result<(Config, Vec<(String, std::path::PathBuf)>)> {
    let mut loader = Config::builder().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for path in &cli.global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in cli.to_config_overrides() {
        loader = loader.set(key, value)?;
    }

    let loaded_files = loader.loaded_files();
    Ok((loader.build()?, loaded_files))
}

fn start_logging(config: &Config) -> Result<LogGuard> {
    let log_config = LogConfig::builder()
        .with_console_level(config.global.log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build();
    init_logging(&log_config)
}

#[cfg(windows)]
fn run_export(options: &ExportOptions, timestamp: &str) -> Result<ExportSummary> {
    use peekenv_rs::expand::SystemExpander;
    use peekenv_rs::registry::windows::WindowsRegistry;

    Ok(peekenv_rs::export::export(
        &WindowsRegistry,
        &SystemExpander,
        options,
        timestamp,
    )?)
}

#[cfg(not(windows))]
fn run_export(_options: &ExportOptions, _timestamp: &str) -> Result<ExportSummary> {
    Err(peekenv_rs::error::RegistryError::Unsupported.into())
}
