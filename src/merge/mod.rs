// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scope merging.
//!
//! ```text
//! build_snapshot(registry, scope, filter)
//!   1. machine (Machine | Both)  --> insert
//!   2. user    (User | Both)     --> Path/PsModulePath: machine;user
//!                                    others: user overrides machine
//!   3. empty --> ExportError::Empty
//! ```
//!
//! Machine is always read before user. Path-like appending only happens
//! when both scopes are read.


use tracing::{debug, trace};

use crate::env::types::VarName;
use crate::env::{FilterSet, Snapshot};
use crate::error::ExportError;
use crate::registry::{Location, RegistrySource, Scope};

/// How values read from one location combine with what is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeMode {
    /// Later values replace earlier ones.
    Overwrite,
    /// Path-like values are appended, the rest replace.
    AppendPaths,
}

/// Reads the requested scope(s) and merges them into one snapshot.
///
/// # Errors
///
/// Returns [`ExportError::Registry`] if a location cannot be read or a
/// value disappears while reading, and [`ExportError::Empty`] if no
/// variable survives filtering.
pub fn build_snapshot<R: RegistrySource>(
    registry: &R,
    scope: Scope,
    filter: &FilterSet,
) -> Result<Snapshot, ExportError> {
    let mut snapshot = Snapshot::new();

    if scope.includes_machine() {
        read_location(registry, &Location::MACHINE, filter, MergeMode::Overwrite, &mut snapshot)
            .map_err(|source| ExportError::Registry {
                scope: Scope::Machine,
                source,
            })?;
    }

    if scope.includes_user() {
        let mode = if scope.includes_machine() {
            MergeMode::AppendPaths
        } else {
            MergeMode::Overwrite
        };
        read_location(registry, &Location::USER, filter, mode, &mut snapshot).map_err(|source| {
            ExportError::Registry {
                scope: Scope::User,
                source,
            }
        })?;
    }

    if snapshot.is_empty() {
        return Err(ExportError::Empty { scope });
    }

    debug!(%scope, variables = snapshot.len(), "built environment snapshot");
    Ok(snapshot)
}

fn read_location<R: RegistrySource>(
    registry: &R,
    location: &Location,
    filter: &FilterSet,
    mode: MergeMode,
    snapshot: &mut Snapshot,
) -> Result<(), crate::error::RegistryError> {
    let names = registry.enumerate(location)?;
    debug!(%location, values = names.len(), "enumerated registry values");

    for name in names.into_iter().filter(|n| filter.matches(n)) {
        let value = registry.read_string(location, &name)?;
        trace!(%location, name = %name, "read value");

        if mode == MergeMode::AppendPaths && VarName::new(name.as_str()).is_path_like() {
            snapshot.append_segments(name, value);
        } else {
            snapshot.insert(name, value);
        }
    }

    Ok(())
}
