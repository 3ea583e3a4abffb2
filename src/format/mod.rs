// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sectioned text format.
//!
//! ```text
//! # HKEY_LOCAL_MACHINE\...\Environment - Exported 2026-01-02 03:04:05 +0100   (optional)
//! # HKEY_CURRENT_USER\Environment - Exported 2026-01-02 03:04:05 +0100       (optional)
//!                                                                           (optional)
//! [ComSpec]
//! C:\Windows\system32\cmd.exe
//!
//! [Path]
//! C:\Windows\system32
//! C:\Windows
//! ```
//!
//! Sections are sorted case-insensitively, one value segment per line,
//! exactly one blank line between sections and one trailing newline.
//! This is also the import format of companion tooling, so the layout is
//! byte-for-byte stable.

#[cfg(test)]
mod tests;

use std::fmt::Write as _;

use crate::env::Snapshot;
use crate::env::types::DELIMITER;
use crate::error::FormatError;
use crate::registry::Scope;

/// Renders every variable of `snapshot` as a section.
///
/// An empty snapshot renders as an empty string.
#[must_use]
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for (i, (name, value)) in snapshot.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push('[');
        out.push_str(name);
        out.push_str("]\n");
        for segment in value.split(DELIMITER) {
            out.push_str(segment);
            out.push('\n');
        }
    }
    out
}

/// Renders the comment block naming the consulted locations.
///
/// One line per location in read order, followed by a blank line.
#[must_use]
pub fn render_header(scope: Scope, timestamp: &str) -> String {
    let mut out = String::new();
    for location in scope.locations() {
        let _ = writeln!(out, "# {location} - Exported {timestamp}");
    }
    out.push('\n');
    out
}

fn section_title(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

/// Reads text produced by [`render`] (with or without header) back into a
/// snapshot.
///
/// A section body runs until the next title line; the blank line in front
/// of a title is the separator and not part of the value.
///
/// # Errors
///
/// Returns [`FormatError::Orphan`] for a non-comment, non-blank line before
/// the first section title.
pub fn parse(text: &str) -> Result<Snapshot, FormatError> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if text.ends_with('\n') {
        lines.pop();
    }

    let separator = DELIMITER.to_string();
    let mut snapshot = Snapshot::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if let Some(title) = section_title(line) {
            if let Some((name, mut body)) = current.take() {
                if body.last() == Some(&"") {
                    body.pop();
                }
                snapshot.insert(name, body.join(&separator));
            }
            current = Some((title, Vec::new()));
            continue;
        }

        match current.as_mut() {
            Some((_, body)) => body.push(line),
            None if line.is_empty() || line.starts_with('#') => {}
            None => {
                return Err(FormatError::Orphan {
                    line_number: index + 1,
                    line: line.to_string(),
                });
            }
        }
    }

    if let Some((name, body)) = current {
        snapshot.insert(name, body.join(&separator));
    }

    Ok(snapshot)
}
