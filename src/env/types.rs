// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Types for environment variable snapshots.
//!
//! ```text
//! VarName: case-insensitive (PATH == Path == path), display casing kept
//! PATH_LIKE: Path, PsModulePath --> merged by appending segments
//! DELIMITER: ';'
//! ```

/// Separator between path-like segments.
pub const DELIMITER: char = ';';

/// Variables whose user value is appended to the machine value.
pub const PATH_LIKE: [&str; 2] = ["Path", "PsModulePath"];

/// A case-insensitive variable name that remembers its original casing.
#[derive(Debug, Clone, Eq)]
pub struct VarName(String);

impl VarName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as originally written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether this name is one of [`PATH_LIKE`].
    #[must_use]
    pub fn is_path_like(&self) -> bool {
        PATH_LIKE.iter().any(|p| self == &Self::new(*p))
    }

    fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

impl PartialEq for VarName {
    fn eq(&self, other: &Self) -> bool {
        self.folded() == other.folded()
    }
}

impl std::hash::Hash for VarName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.folded().hash(state);
    }
}

impl PartialOrd for VarName {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VarName {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.folded().cmp(&other.folded())
    }
}

impl std::fmt::Display for VarName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VarName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for VarName {
    fn from(name: String) -> Self {
        Self(name)
    }
}
