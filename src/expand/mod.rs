// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `%NAME%` reference expansion.
//!
//! ```text
//! Expander::expand(value)
//!   SystemExpander --> ExpandEnvironmentStringsW (Windows)
//!   MapExpander    --> same single-pass rules over an explicit variable map
//!
//! expand_all(snapshot) --> rewrite each value, keep original on error
//! ```
//!
//! Unknown references stay verbatim. Results longer than
//! [`MAX_EXPANDED_UNITS`] (UTF-16, including the terminator) are rejected.

#[cfg(windows)]
mod system;


use std::collections::BTreeMap;

use tracing::{trace, warn};

use crate::env::Snapshot;
use crate::env::types::VarName;
use crate::error::ExpandError;

#[cfg(windows)]
pub use system::SystemExpander;

/// Largest expansion result in UTF-16 units, terminator included.
pub const MAX_EXPANDED_UNITS: usize = 32_767;

/// Resolves `%NAME%` references inside a value.
pub trait Expander {
    /// Returns `value` with every resolvable reference substituted.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpandError`] if the value cannot be expanded; callers
    /// treat this as non-fatal.
    fn expand(&self, value: &str) -> Result<String, ExpandError>;
}

/// Expands references against an explicit set of variables.
///
/// Follows the rules of the Windows expander: one pass, no recursion into
/// substituted text, unknown names kept as written.
#[derive(Debug, Clone, Default)]
pub struct MapExpander {
    vars: BTreeMap<VarName, String>,
}

impl MapExpander {
    pub fn new<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (VarName::new(k), v.into()))
                .collect(),
        }
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.vars.get(&VarName::new(name)).map(String::as_str)
    }
}

impl Expander for MapExpander {
    fn expand(&self, value: &str) -> Result<String, ExpandError> {
        if value.contains('\0') {
            return Err(ExpandError::InvalidInput);
        }

        let mut out = String::with_capacity(value.len());
        let mut rest = value;

        while let Some(start) = rest.find('%') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];

            let Some(end) = after.find('%') else {
                out.push_str(&rest[start..]);
                rest = "";
                break;
            };

            let name = &after[..end];
            match self.lookup(name).filter(|_| !name.is_empty()) {
                Some(resolved) => {
                    out.push_str(resolved);
                    rest = &after[end + 1..];
                }
                None => {
                    // The closing '%' may open the next reference
                    out.push('%');
                    out.push_str(name);
                    rest = &after[end..];
                }
            }
        }
        out.push_str(rest);

        let len = out.encode_utf16().count();
        if len + 1 > MAX_EXPANDED_UNITS {
            return Err(ExpandError::TooLong {
                len,
                limit: MAX_EXPANDED_UNITS - 1,
            });
        }
        Ok(out)
    }
}

/// Expands every value of `snapshot` in place.
///
/// Values that fail to expand are left unchanged. Returns how many failed.
pub fn expand_all<E: Expander + ?Sized>(snapshot: &mut Snapshot, expander: &E) -> usize {
    let mut failed = 0;
    for (name, value) in snapshot.values_mut() {
        if !value.contains('%') {
            continue;
        }
        match expander.expand(value) {
            Ok(expanded) => {
                trace!(name, "expanded value");
                *value = expanded;
            }
            Err(e) => {
                warn!(name, error = %e, "keeping unexpanded value");
                failed += 1;
            }
        }
    }
    failed
}
