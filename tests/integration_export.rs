// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the export pipeline.
//!
//! Runs registry -> merge -> expand -> format -> output against an
//! in-memory registry, so these run on every platform.

use peekenv_rs::env::Snapshot;
use peekenv_rs::error::{ExportError, PeekError};
use peekenv_rs::expand::MapExpander;
use peekenv_rs::export::{ExportOptions, Output, export, export_text};
use peekenv_rs::format::{parse, render};
use peekenv_rs::registry::memory::MemoryRegistry;
use peekenv_rs::registry::{Location, Scope};

const STAMP: &str = "2026-03-04 05:06:07 +0000";

fn no_expansion() -> MapExpander {
    MapExpander::default()
}

fn workstation() -> MemoryRegistry {
    MemoryRegistry::new()
        .with_value(
            Location::MACHINE,
            "Path",
            r"%SystemRoot%\system32;%SystemRoot%;C:\Program Files\Git\cmd",
        )
        .with_value(Location::MACHINE, "TEMP", r"%SystemRoot%\TEMP")
        .with_value(Location::MACHINE, "TMP", r"%SystemRoot%\TEMP")
        .with_value(Location::MACHINE, "NUMBER_OF_PROCESSORS", "16")
        .with_value(Location::USER, "PATH", r"%USERPROFILE%\.cargo\bin")
        .with_value(Location::USER, "TEMP", r"%USERPROFILE%\AppData\Local\Temp")
        .with_value(Location::USER, "TMP", r"%USERPROFILE%\AppData\Local\Temp")
        .with_value(Location::USER, "OneDrive", r"C:\Users\me\OneDrive")
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn export_single_variable_exact_bytes() {
    let registry = MemoryRegistry::new()
        .with_value(Location::MACHINE, "OS", "Windows_NT")
        .with_key(Location::USER);

    let text = export_text(&registry, &no_expansion(), &ExportOptions::default(), STAMP).unwrap();
    assert_eq!(text, "[OS]\nWindows_NT\n");
}

#[test]
fn export_sections_sorted_regardless_of_insert_order() {
    let forward = MemoryRegistry::new()
        .with_value(Location::USER, "alpha", "1")
        .with_value(Location::USER, "Beta", "2");
    let backward = MemoryRegistry::new()
        .with_value(Location::USER, "Beta", "2")
        .with_value(Location::USER, "alpha", "1");
    let options = ExportOptions::builder().with_scope(Scope::User).build();

    let first = export_text(&forward, &no_expansion(), &options, STAMP).unwrap();
    let second = export_text(&backward, &no_expansion(), &options, STAMP).unwrap();

    assert_eq!(first, "[alpha]\n1\n\n[Beta]\n2\n");
    assert_eq!(first, second);
}

#[test]
fn export_full_workstation() {
    let text =
        export_text(&workstation(), &no_expansion(), &ExportOptions::default(), STAMP).unwrap();
    insta::assert_snapshot!(text, @r"
    [NUMBER_OF_PROCESSORS]
    16

    [OneDrive]
    C:\Users\me\OneDrive

    [Path]
    %SystemRoot%\system32
    %SystemRoot%
    C:\Program Files\Git\cmd
    %USERPROFILE%\.cargo\bin

    [TEMP]
    %USERPROFILE%\AppData\Local\Temp

    [TMP]
    %USERPROFILE%\AppData\Local\Temp
    ");
}

#[test]
fn export_full_workstation_expanded_with_header() {
    let expander = MapExpander::new([
        ("SystemRoot", r"C:\Windows"),
        ("USERPROFILE", r"C:\Users\me"),
    ]);
    let options = ExportOptions::builder()
        .with_header(true)
        .with_expand(true)
        .with_scope(Scope::Machine)
        .build();

    let text = export_text(&workstation(), &expander, &options, STAMP).unwrap();
    insta::assert_snapshot!(text, @r"
    # HKEY_LOCAL_MACHINE\SYSTEM\CurrentControlSet\Control\Session Manager\Environment - Exported 2026-03-04 05:06:07 +0000

    [NUMBER_OF_PROCESSORS]
    16

    [Path]
    C:\Windows\system32
    C:\Windows
    C:\Program Files\Git\cmd

    [TEMP]
    C:\Windows\TEMP

    [TMP]
    C:\Windows\TEMP
    ");
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn export_filter_keeps_only_requested() {
    let options = ExportOptions::builder()
        .with_filter(["TEMP"].into_iter().collect())
        .build();

    let text = export_text(&workstation(), &no_expansion(), &options, STAMP).unwrap();
    assert_eq!(text, "[TEMP]\n%USERPROFILE%\\AppData\\Local\\Temp\n");
}

#[test]
fn export_filter_is_case_insensitive() {
    let options = ExportOptions::builder()
        .with_filter(["path", "onedrive"].into_iter().collect())
        .build();

    let text = export_text(&workstation(), &no_expansion(), &options, STAMP).unwrap();
    let snapshot = parse(&text).unwrap();
    assert_eq!(snapshot.names(), vec!["OneDrive", "Path"]);
}

#[test]
fn export_nothing_matched_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("env.txt");
    let options = ExportOptions::builder()
        .with_filter(["JAVA_HOME"].into_iter().collect())
        .with_output(Output::File(path.clone()))
        .build();

    let err = export(&workstation(), &no_expansion(), &options, STAMP).unwrap_err();
    assert!(matches!(
        err,
        PeekError::Export(ref inner) if matches!(**inner, ExportError::Empty { .. })
    ));
    assert!(!path.exists());
}

#[test]
fn export_empty_registry_is_empty_error() {
    let registry = MemoryRegistry::new()
        .with_key(Location::MACHINE)
        .with_key(Location::USER);

    let err = export_text(&registry, &no_expansion(), &ExportOptions::default(), STAMP)
        .unwrap_err();
    assert_eq!(err.to_string(), "no environment variables found (both scope)");
}

// =============================================================================
// Round trip
// =============================================================================

#[test]
fn export_round_trip_recovers_merged_values() {
    let expected: Snapshot = [
        ("NUMBER_OF_PROCESSORS", "16"),
        ("OneDrive", r"C:\Users\me\OneDrive"),
        (
            "Path",
            r"%SystemRoot%\system32;%SystemRoot%;C:\Program Files\Git\cmd;%USERPROFILE%\.cargo\bin",
        ),
        ("TEMP", r"%USERPROFILE%\AppData\Local\Temp"),
        ("TMP", r"%USERPROFILE%\AppData\Local\Temp"),
    ]
    .into_iter()
    .collect();

    let options = ExportOptions::builder().with_header(true).build();
    let text = export_text(&workstation(), &no_expansion(), &options, STAMP).unwrap();

    let parsed = parse(&text).unwrap();
    assert_eq!(parsed, expected);
    assert_eq!(
        parsed.names(),
        ["NUMBER_OF_PROCESSORS", "OneDrive", "Path", "TEMP", "TMP"]
    );
    assert_eq!(render(&expected), text.split_once("\n\n").unwrap().1);
}

// =============================================================================
// File output
// =============================================================================

#[test]
fn export_to_file_matches_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested-name.env.txt");
    let options = ExportOptions::builder()
        .with_header(true)
        .with_output(Output::File(path.clone()))
        .build();

    let summary = export(&workstation(), &no_expansion(), &options, STAMP).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();

    assert_eq!(summary.variables, 5);
    assert_eq!(summary.bytes, written.len());
    assert_eq!(summary.scope, Scope::Both);
    assert_eq!(
        written,
        export_text(&workstation(), &no_expansion(), &options, STAMP).unwrap()
    );
}
