// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::{ConfigError, ExportError, PeekError, PeekResult, RegistryError};
use crate::registry::Scope;

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidValue {
        section: "export".to_string(),
        key: "scope".to_string(),
        message: "expected 'machine', 'user' or 'both', got 'all'".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'scope' in section '[export]': expected 'machine', 'user' or 'both', got 'all'"
    );
}

#[test]
fn test_export_error_display() {
    let empty = ExportError::Empty { scope: Scope::Both };
    let registry = ExportError::Registry {
        scope: Scope::User,
        source: RegistryError::NotFound {
            location: r"HKEY_CURRENT_USER\Environment".to_string(),
            name: "TEMP".to_string(),
        },
    };
    let sink = ExportError::Sink {
        path: PathBuf::from("out.txt"),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    };

    insta::assert_snapshot!(empty.to_string(), @"no environment variables found (both scope)");
    insta::assert_snapshot!(registry.to_string(), @"reading user environment variables");
    insta::assert_snapshot!(sink.to_string(), @"cannot write output to 'out.txt'");
}

#[test]
fn test_peek_error_from_boxes() {
    let err: PeekError = ExportError::Empty {
        scope: Scope::Machine,
    }
    .into();
    assert!(matches!(err, PeekError::Export(_)));
    insta::assert_snapshot!(err.to_string(), @"no environment variables found (machine scope)");
}

#[test]
fn test_error_chain_names_each_cause_once() {
    let err: PeekError = ExportError::Registry {
        scope: Scope::User,
        source: RegistryError::Access {
            location: r"HKEY_CURRENT_USER\Environment".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        },
    }
    .into();

    let rendered = format!("{:#}", anyhow::Error::from(err));
    insta::assert_snapshot!(
        rendered,
        @r"reading user environment variables: cannot open registry key 'HKEY_CURRENT_USER\Environment': entity not found"
    );
    assert_eq!(rendered.matches("HKEY_CURRENT_USER").count(), 1);
    assert_eq!(rendered.matches("reading user").count(), 1);
}

#[test]
fn test_sink_error_chain_names_each_cause_once() {
    let err: PeekError = ExportError::Sink {
        path: PathBuf::from("out.txt"),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    }
    .into();

    let rendered = format!("{:#}", anyhow::Error::from(err));
    assert_eq!(rendered.matches("out.txt").count(), 1);
    assert!(rendered.starts_with("cannot write output to 'out.txt': "));
}

#[test]
fn test_peek_error_size() {
    // Box variants are a single pointer plus discriminant
    let size = std::mem::size_of::<PeekError>();
    assert!(size <= 24, "PeekError is {size} bytes, expected <= 24");
}

#[test]
fn test_peek_result_size() {
    let size = std::mem::size_of::<PeekResult<()>>();
    assert!(size <= 24, "PeekResult<()> is {size} bytes, expected <= 24");
}
