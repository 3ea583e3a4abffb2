// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export orchestration.
//!
//! ```text
//! export(registry, expander, &ExportOptions, timestamp)
//!    |
//!    +--> merge::build_snapshot      (fatal on error / empty)
//!    +--> expand::expand_all         (if expand; per-value, non-fatal)
//!    +--> format::render_header      (if header)
//!    +--> format::render
//!    |
//!    v
//!  Output::Stdout  --> one write_all on the locked handle
//!  Output::File    --> temp file in target dir --> persist (rename)
//!    |
//!    v
//!  ExportSummary { variables, bytes, scope }
//! ```
//!
//! Nothing is written until the whole text is assembled.


use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use bon::Builder;
use chrono::{DateTime, TimeZone};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::Config;
use crate::env::FilterSet;
use crate::error::{ExportError, PeekResult};
use crate::expand::{Expander, expand_all};
use crate::format::{render, render_header};
use crate::merge::build_snapshot;
use crate::registry::{RegistrySource, Scope};

/// Timestamp layout used in the header block.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Where exported text goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Output {
    /// Standard output.
    #[default]
    Stdout,
    /// A named file, replaced atomically.
    File(PathBuf),
}

impl Output {
    /// Interprets an `--output` argument; `-` and `stdout` mean standard output.
    #[must_use]
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            None => Self::Stdout,
            Some(path) if path == Path::new("-") || path == Path::new("stdout") => Self::Stdout,
            Some(path) => Self::File(path.to_path_buf()),
        }
    }

    fn path(&self) -> PathBuf {
        match self {
            Self::Stdout => PathBuf::from("<stdout>"),
            Self::File(path) => path.clone(),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("<stdout>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Immutable settings of one export run.
#[derive(Debug, Clone, Default, Builder)]
pub struct ExportOptions {
    #[builder(setters(name = with_scope), default)]
    scope: Scope,
    #[builder(setters(name = with_filter), default)]
    filter: FilterSet,
    #[builder(setters(name = with_expand), default = false)]
    expand: bool,
    #[builder(setters(name = with_header), default = false)]
    header: bool,
    #[builder(setters(name = with_output), default)]
    output: Output,
}

impl ExportOptions {
    /// Folds the merged configuration into export options.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let export = &config.export;
        Self::builder()
            .with_scope(export.scope)
            .with_filter(export.variables.iter().map(String::as_str).collect())
            .with_expand(export.expand)
            .with_header(export.header)
            .with_output(Output::from_arg(export.output.as_deref()))
            .build()
    }

    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterSet {
        &self.filter
    }

    #[must_use]
    pub const fn expand(&self) -> bool {
        self.expand
    }

    #[must_use]
    pub const fn header(&self) -> bool {
        self.header
    }

    #[must_use]
    pub const fn output(&self) -> &Output {
        &self.output
    }
}

/// Outcome of a successful export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of exported variables.
    pub variables: usize,
    /// Bytes written to the output.
    pub bytes: usize,
    /// Scope that was read.
    pub scope: Scope,
}

/// Formats `time` the way the header block shows it.
#[must_use]
pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Builds the complete export text without writing it anywhere.
///
/// # Errors
///
/// Returns an [`ExportError`] if the snapshot cannot be built.
pub fn export_text<R, E>(
    registry: &R,
    expander: &E,
    options: &ExportOptions,
    timestamp: &str,
) -> Result<String, ExportError>
where
    R: RegistrySource,
    E: Expander + ?Sized,
{
    assemble(registry, expander, options, timestamp).map(|(text, _)| text)
}

fn assemble<R, E>(
    registry: &R,
    expander: &E,
    options: &ExportOptions,
    timestamp: &str,
) -> Result<(String, usize), ExportError>
where
    R: RegistrySource,
    E: Expander + ?Sized,
{
    let mut snapshot = build_snapshot(registry, options.scope, &options.filter)?;

    if options.expand {
        let failed = expand_all(&mut snapshot, expander);
        debug!(failed, "expanded variable references");
    }

    let body = render(&snapshot);
    let text = if options.header {
        let mut text = render_header(options.scope, timestamp);
        text.push_str(&body);
        text
    } else {
        body
    };

    Ok((text, snapshot.len()))
}

/// Runs a full export and writes the result to the configured output.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be built or the output cannot
/// be written. Nothing is written in the first case.
pub fn export<R, E>(
    registry: &R,
    expander: &E,
    options: &ExportOptions,
    timestamp: &str,
) -> PeekResult<ExportSummary>
where
    R: RegistrySource,
    E: Expander + ?Sized,
{
    let (text, variables) = assemble(registry, expander, options, timestamp)?;
    write_output(&options.output, &text)?;

    let summary = ExportSummary {
        variables,
        bytes: text.len(),
        scope: options.scope,
    };
    info!(
        variables = summary.variables,
        bytes = summary.bytes,
        scope = %summary.scope,
        output = %options.output,
        "export complete"
    );
    Ok(summary)
}

/// Writes `text` to `output` in one pass.
///
/// # Errors
///
/// Returns [`ExportError::Sink`] if the destination cannot be written.
pub fn write_output(output: &Output, text: &str) -> Result<(), ExportError> {
    let result = match output {
        Output::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
        }
        Output::File(path) => write_file_atomic(path, text),
    };

    result.map_err(|source| ExportError::Sink {
        path: output.path(),
        source,
    })
}

fn write_file_atomic(path: &Path, text: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropped (and deleted) on any error before persist.
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(text.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), bytes = text.len(), "wrote output file");
    Ok(())
}
