// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!         PeekError (~24 bytes, transparent)
//!                  |
//!    +-------+------+------+------+
//!    |       |      |      |      |
//!    v       v      v      v      v
//! Registry Export Expand Format Config
//!   Box     Box    Box    Box    Box
//!
//! Messages never repeat their source; `{:#}` appends the chain:
//!   reading user environment variables: cannot open registry key
//!   'HKEY_CURRENT_USER\Environment': entity not found
//!
//! Sub-errors (unboxed internally):
//!   Registry  Access, NotFound, Unsupported
//!   Export    Registry, Empty, Sink
//!   Expand    TooLong, InvalidInput, Platform (non-fatal)
//!   Format    Orphan
//!   Config    InvalidValue
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::registry::Scope;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`PeekError`].
pub type PeekResult<T> = std::result::Result<T, PeekError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
/// Each variant is transparent: the boxed error supplies both the message
/// and the source chain, so `{:#}` prints every cause once.
#[derive(Debug, Error)]
pub enum PeekError {
    /// Registry access failed.
    #[error(transparent)]
    Registry(#[from] Box<RegistryError>),

    /// Export pipeline failed.
    #[error(transparent)]
    Export(#[from] Box<ExportError>),

    /// Variable expansion failed.
    #[error(transparent)]
    Expand(#[from] Box<ExpandError>),

    /// Exported text could not be read back.
    #[error(transparent)]
    Format(#[from] Box<FormatError>),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] Box<ConfigError>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PeekError {
                fn from(err: $error) -> Self {
                    PeekError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    RegistryError => Registry,
    ExportError => Export,
    ExpandError => Expand,
    FormatError => Format,
    ConfigError => Config,
}

// --- Registry Errors ---

/// Registry reader errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The key could not be opened (permissions, missing key).
    #[error("cannot open registry key '{location}'")]
    Access {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// A value vanished between enumeration and read.
    #[error("value '{name}' not found under '{location}'")]
    NotFound { location: String, name: String },

    /// The live registry is not available on this platform.
    #[error("the Windows registry is not available on this platform")]
    Unsupported,
}

// --- Export Errors ---

/// Export pipeline errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Reading one of the scopes failed.
    #[error("reading {scope} environment variables")]
    Registry {
        scope: Scope,
        #[source]
        source: RegistryError,
    },

    /// Nothing left to export after reading and filtering.
    #[error("no environment variables found ({scope} scope)")]
    Empty { scope: Scope },

    /// The output destination could not be created or written.
    #[error("cannot write output to '{}'", path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// --- Expansion Errors ---

/// Variable expansion errors. Never fatal to an export.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// Expanded text exceeds the platform limit.
    #[error("expanded value is {len} UTF-16 units, limit is {limit}")]
    TooLong { len: usize, limit: usize },

    /// Input cannot be handed to the platform expander.
    #[error("value contains an interior NUL character")]
    InvalidInput,

    /// The platform expander reported a failure.
    #[error("platform expansion failed: {0}")]
    Platform(std::io::Error),
}

// --- Format Errors ---

/// Errors reading the sectioned text format.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Content before the first section that is not a comment or blank.
    #[error("line {line_number}: '{line}' is outside of any [section]")]
    Orphan { line_number: usize, line: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

#[cfg(test)]
mod tests;
