// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Win32 registry backend.
//!
//! ```text
//! KeyHandle::open(location) --> RegOpenKeyExW(KEY_READ)
//!   enumerate   --> RegEnumValueW until ERROR_NO_MORE_ITEMS
//!   read_string --> RegQueryValueExW (size, then data)
//!   drop()      --> RegCloseKey
//! ```
//!
//! Each call opens its own handle; it is closed on every exit path by `Drop`.

use tracing::trace;
use windows::Win32::Foundation::{
    ERROR_FILE_NOT_FOUND, ERROR_MORE_DATA, ERROR_NO_MORE_ITEMS, ERROR_SUCCESS, WIN32_ERROR,
};
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, REG_EXPAND_SZ, REG_SZ,
    REG_VALUE_TYPE, RegCloseKey, RegEnumValueW, RegOpenKeyExW, RegQueryValueExW,
};
use windows::core::{HSTRING, PWSTR};

use super::{Hive, Location, RegistrySource};
use crate::error::RegistryError;

/// Longest value name the registry allows, in UTF-16 units.
const MAX_VALUE_NAME: usize = 16_383;

/// Converts a Win32 status code to a `std::io::Error`.
fn win32_error_to_io(status: WIN32_ERROR) -> std::io::Error {
    std::io::Error::from_raw_os_error(i32::try_from(status.0).unwrap_or(i32::MAX))
}

const fn root_key(hive: Hive) -> HKEY {
    match hive {
        Hive::CurrentUser => HKEY_CURRENT_USER,
        Hive::LocalMachine => HKEY_LOCAL_MACHINE,
    }
}

const fn is_string_type(kind: u32) -> bool {
    kind == REG_SZ.0 || kind == REG_EXPAND_SZ.0
}

/// An open registry key, closed on drop.
struct KeyHandle {
    hkey: HKEY,
    location: Location,
}

impl KeyHandle {
    fn open(location: &Location) -> Result<Self, RegistryError> {
        let subkey = HSTRING::from(location.subkey());
        let mut hkey = HKEY::default();

        // SAFETY: `subkey` outlives the call and `hkey` is a valid out pointer.
        let status = unsafe {
            RegOpenKeyExW(
                root_key(location.hive()),
                &subkey,
                Some(0),
                KEY_READ,
                &raw mut hkey,
            )
        };
        if status != ERROR_SUCCESS {
            return Err(RegistryError::Access {
                location: location.to_string(),
                source: win32_error_to_io(status),
            });
        }

        Ok(Self {
            hkey,
            location: *location,
        })
    }

    fn access_error(&self, status: WIN32_ERROR) -> RegistryError {
        RegistryError::Access {
            location: self.location.to_string(),
            source: win32_error_to_io(status),
        }
    }

    fn not_found(&self, name: &str) -> RegistryError {
        RegistryError::NotFound {
            location: self.location.to_string(),
            name: name.to_string(),
        }
    }
}

impl Drop for KeyHandle {
    fn drop(&mut self) {
        // SAFETY: We own this handle and it's valid.
        unsafe {
            let _ = RegCloseKey(self.hkey);
        }
    }
}

/// Reads the live Windows registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsRegistry;

impl RegistrySource for WindowsRegistry {
    fn enumerate(&self, location: &Location) -> Result<Vec<String>, RegistryError> {
        let key = KeyHandle::open(location)?;
        let mut names = Vec::new();
        let mut buffer = vec![0u16; MAX_VALUE_NAME + 1];

        for index in 0u32.. {
            let mut len = u32::try_from(buffer.len()).unwrap_or(u32::MAX);
            let mut kind = 0u32;

            // SAFETY: `buffer` holds `len` UTF-16 units; the other out pointers are valid.
            let status = unsafe {
                RegEnumValueW(
                    key.hkey,
                    index,
                    Some(PWSTR(buffer.as_mut_ptr())),
                    &raw mut len,
                    None,
                    Some(&raw mut kind),
                    None,
                    None,
                )
            };

            match status {
                ERROR_SUCCESS => {
                    let name = String::from_utf16_lossy(&buffer[..len as usize]);
                    if is_string_type(kind) {
                        names.push(name);
                    } else {
                        trace!(%location, name = %name, kind, "skipping non-string value");
                    }
                }
                ERROR_NO_MORE_ITEMS => break,
                other => return Err(key.access_error(other)),
            }
        }

        Ok(names)
    }

    fn read_string(&self, location: &Location, name: &str) -> Result<String, RegistryError> {
        let key = KeyHandle::open(location)?;
        let value_name = HSTRING::from(name);

        loop {
            let mut kind = REG_VALUE_TYPE::default();
            let mut size = 0u32;

            // SAFETY: size query; no data buffer is passed.
            let status = unsafe {
                RegQueryValueExW(
                    key.hkey,
                    &value_name,
                    None,
                    Some(&raw mut kind),
                    None,
                    Some(&raw mut size),
                )
            };
            match status {
                ERROR_SUCCESS => {}
                ERROR_FILE_NOT_FOUND => return Err(key.not_found(name)),
                other => return Err(key.access_error(other)),
            }
            if !is_string_type(kind.0) {
                return Err(key.not_found(name));
            }

            // One spare unit so an unterminated value still ends in NUL.
            let mut data = vec![0u16; size as usize / 2 + 1];
            let mut size = u32::try_from(data.len() * 2).unwrap_or(u32::MAX);

            // SAFETY: `data` is `size` bytes long and outlives the call.
            let status = unsafe {
                RegQueryValueExW(
                    key.hkey,
                    &value_name,
                    None,
                    None,
                    Some(data.as_mut_ptr().cast::<u8>()),
                    Some(&raw mut size),
                )
            };
            match status {
                ERROR_SUCCESS => {
                    let units = (size as usize / 2).min(data.len());
                    let end = data[..units].iter().position(|&c| c == 0).unwrap_or(units);
                    return Ok(String::from_utf16_lossy(&data[..end]));
                }
                // Value grew between the two queries
                ERROR_MORE_DATA => {}
                ERROR_FILE_NOT_FOUND => return Err(key.not_found(name)),
                other => return Err(key.access_error(other)),
            }
        }
    }
}
