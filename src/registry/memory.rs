// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory registry backend.
//!
//! Keys that were never added behave like missing registry keys
//! ([`RegistryError::Access`]). Values keep insertion order.

use std::collections::HashMap;

use super::{Location, RegistrySource};
use crate::error::RegistryError;

#[derive(Debug, Clone, Default)]
struct MemoryKey {
    values: Vec<(String, String)>,
    /// Names that enumerate but no longer read (simulates concurrent deletion).
    vanished: Vec<String>,
}

/// Deterministic registry substitute.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    keys: HashMap<Location, MemoryKey>,
}

impl MemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty key at `location`.
    #[must_use]
    pub fn with_key(mut self, location: Location) -> Self {
        self.keys.entry(location).or_default();
        self
    }

    /// Stores a string value, creating the key if needed.
    ///
    /// Setting an existing name (same casing) replaces its data in place.
    #[must_use]
    pub fn with_value(
        mut self,
        location: Location,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let value = value.into();
        let key = self.keys.entry(location).or_default();
        if let Some(slot) = key.values.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            key.values.push((name, value));
        }
        self
    }

    /// Adds a name that is listed by `enumerate` but fails `read_string`.
    #[must_use]
    pub fn with_vanished_value(mut self, location: Location, name: impl Into<String>) -> Self {
        self.keys
            .entry(location)
            .or_default()
            .vanished
            .push(name.into());
        self
    }

    fn key(&self, location: &Location) -> Result<&MemoryKey, RegistryError> {
        self.keys.get(location).ok_or_else(|| RegistryError::Access {
            location: location.to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }
}

impl RegistrySource for MemoryRegistry {
    fn enumerate(&self, location: &Location) -> Result<Vec<String>, RegistryError> {
        let key = self.key(location)?;
        Ok(key
            .values
            .iter()
            .map(|(name, _)| name.clone())
            .chain(key.vanished.iter().cloned())
            .collect())
    }

    fn read_string(&self, location: &Location, name: &str) -> Result<String, RegistryError> {
        self.key(location)?
            .values
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
            .ok_or_else(|| RegistryError::NotFound {
                location: location.to_string(),
                name: name.to_string(),
            })
    }
}
