// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Registry reader.
//!
//! ```text
//! Scope: Machine | User | Both
//!   Machine --> HKEY_LOCAL_MACHINE\SYSTEM\...\Session Manager\Environment
//!   User    --> HKEY_CURRENT_USER\Environment
//!   Both    --> machine first, then user
//!
//! RegistrySource
//!   enumerate(location)         --> value names (unordered)
//!   read_string(location, name) --> value text (no expansion)
//!
//! Backends: WindowsRegistry (Win32, Windows only)
//!           MemoryRegistry  (deterministic, tests)
//! ```

pub mod memory;
#[cfg(windows)]
pub mod windows;


use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, RegistryError};

/// Root hive of a registry location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hive {
    /// `HKEY_CURRENT_USER`
    CurrentUser,
    /// `HKEY_LOCAL_MACHINE`
    LocalMachine,
}

impl Hive {
    /// Returns the conventional hive name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CurrentUser => "HKEY_CURRENT_USER",
            Self::LocalMachine => "HKEY_LOCAL_MACHINE",
        }
    }
}

/// A registry key holding environment variables: root hive plus subkey path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    hive: Hive,
    subkey: &'static str,
}

impl Location {
    /// Current user's environment.
    pub const USER: Self = Self {
        hive: Hive::CurrentUser,
        subkey: "Environment",
    };

    /// Machine-wide environment.
    pub const MACHINE: Self = Self {
        hive: Hive::LocalMachine,
        subkey: r"SYSTEM\CurrentControlSet\Control\Session Manager\Environment",
    };

    #[must_use]
    pub const fn hive(&self) -> Hive {
        self.hive
    }

    #[must_use]
    pub const fn subkey(&self) -> &'static str {
        self.subkey
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\\{}", self.hive.name(), self.subkey)
    }
}

/// Which registry location(s) an export reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Machine-wide variables only.
    Machine,
    /// Per-user variables only.
    User,
    /// Machine variables, then user variables merged on top.
    #[default]
    Both,
}

impl Scope {
    /// Resolves the `--machine` / `--user` flag pair.
    ///
    /// Both flags or neither select [`Scope::Both`].
    #[must_use]
    pub const fn from_flags(machine: bool, user: bool) -> Self {
        match (machine, user) {
            (true, false) => Self::Machine,
            (false, true) => Self::User,
            _ => Self::Both,
        }
    }

    #[must_use]
    pub const fn includes_machine(self) -> bool {
        matches!(self, Self::Machine | Self::Both)
    }

    #[must_use]
    pub const fn includes_user(self) -> bool {
        matches!(self, Self::User | Self::Both)
    }

    /// Locations consulted for this scope, in read order.
    #[must_use]
    pub const fn locations(self) -> &'static [Location] {
        match self {
            Self::Machine => &[Location::MACHINE],
            Self::User => &[Location::USER],
            Self::Both => &[Location::MACHINE, Location::USER],
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Machine => write!(f, "machine"),
            Self::User => write!(f, "user"),
            Self::Both => write!(f, "both"),
        }
    }
}

impl std::str::FromStr for Scope {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "machine" => Ok(Self::Machine),
            "user" => Ok(Self::User),
            "both" => Ok(Self::Both),
            _ => Err(ConfigError::InvalidValue {
                section: "export".to_string(),
                key: "scope".to_string(),
                message: format!("expected 'machine', 'user' or 'both', got '{s}'"),
            }),
        }
    }
}

/// Read access to registry string values.
///
/// Implementations acquire and release any OS handle within each call.
/// Enumeration order is unspecified; callers sort.
pub trait RegistrySource {
    /// Lists the names of string values stored under `location`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Access`] if the key cannot be opened.
    fn enumerate(&self, location: &Location) -> Result<Vec<String>, RegistryError>;

    /// Reads one string value without expanding embedded references.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the value does not exist and
    /// [`RegistryError::Access`] if the key cannot be opened.
    fn read_string(&self, location: &Location, name: &str) -> Result<String, RegistryError>;
}

impl<T: RegistrySource + ?Sized> RegistrySource for &T {
    fn enumerate(&self, location: &Location) -> Result<Vec<String>, RegistryError> {
        (**self).enumerate(location)
    }

    fn read_string(&self, location: &Location, name: &str) -> Result<String, RegistryError> {
        (**self).read_string(location, name)
    }
}
