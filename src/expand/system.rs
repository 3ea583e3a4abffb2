// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Expansion through `ExpandEnvironmentStringsW`, using the current
//! process environment.

use windows::Win32::System::Environment::ExpandEnvironmentStringsW;
use windows::core::HSTRING;

use super::{Expander, MAX_EXPANDED_UNITS};
use crate::error::ExpandError;

/// The operating system's own expander.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExpander;

impl Expander for SystemExpander {
    fn expand(&self, value: &str) -> Result<String, ExpandError> {
        if value.contains('\0') {
            return Err(ExpandError::InvalidInput);
        }

        let source = HSTRING::from(value);
        let mut buffer = vec![0u16; MAX_EXPANDED_UNITS];

        // SAFETY: `source` is NUL-terminated and `buffer` is a valid writable slice.
        let written = unsafe { ExpandEnvironmentStringsW(&source, Some(&mut buffer)) } as usize;

        if written == 0 {
            return Err(ExpandError::Platform(std::io::Error::last_os_error()));
        }
        if written > buffer.len() {
            return Err(ExpandError::TooLong {
                len: written - 1,
                limit: MAX_EXPANDED_UNITS - 1,
            });
        }
        // `written` counts the terminating NUL
        Ok(String::from_utf16_lossy(&buffer[..written - 1]))
    }
}
