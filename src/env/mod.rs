// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment snapshot.
//!
//! # Architecture
//!
//! ```text
//! Snapshot (BTreeMap<VarName, String>)
//! Built by merge::build_snapshot, rewritten by expand::expand_all,
//! consumed by format::render
//! Ops: insert / append_segments / get / iter / values_mut
//!
//! FilterSet (case-insensitive names, empty = keep all)
//! ```
//!
//! - **Case-insensitive keys**: first-seen casing is kept for display
//! - **Sorted iteration**: case-insensitive ascending, independent of insert order

pub mod types;


use std::collections::{BTreeMap, BTreeSet};

use types::{DELIMITER, VarName};

/// Merged environment variables of one export run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    vars: BTreeMap<VarName, String>,
}

impl Snapshot {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Sets a variable, replacing any value stored under the same name.
    ///
    /// The casing of an existing name is kept.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = VarName::new(name);
        let value = value.into();
        if let Some(existing) = self.vars.get_mut(&name) {
            *existing = value;
        } else {
            self.vars.insert(name, value);
        }
        self
    }

    /// Appends `value` as further segments of an existing variable.
    ///
    /// Behaves like [`Snapshot::insert`] when the name is not present yet.
    pub fn append_segments(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        let name = VarName::new(name);
        let value = value.into();
        if let Some(existing) = self.vars.get_mut(&name) {
            existing.push(DELIMITER);
            existing.push_str(&value);
        } else {
            self.vars.insert(name, value);
        }
        self
    }

    /// Gets a variable value (case-insensitive lookup).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(&VarName::new(name)).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(&VarName::new(name))
    }

    /// Iterates `(display name, value)` in case-insensitive name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates values mutably, in name order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = (&str, &mut String)> {
        self.vars.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns display names in case-insensitive order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.vars.keys().map(VarName::as_str).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (k, v) in iter {
            snapshot.insert(k, v);
        }
        snapshot
    }
}

/// Variable names an export is restricted to.
///
/// An empty set keeps every variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    names: BTreeSet<VarName>,
}

impl FilterSet {
    /// A filter that keeps everything.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Checks whether `name` passes the filter (case-insensitive).
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.names.is_empty() || self.names.contains(&VarName::new(name))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FilterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(VarName::new).collect(),
        }
    }
}
