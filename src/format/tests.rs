// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{parse, render, render_header};
use crate::env::Snapshot;
use crate::error::FormatError;
use crate::registry::Scope;

fn snapshot(vars: &[(&str, &str)]) -> Snapshot {
    vars.iter().copied().collect()
}

#[test]
fn test_render_single_variable() {
    let out = render(&snapshot(&[("TEMP", r"C:\Temp")]));
    assert_eq!(out, "[TEMP]\nC:\\Temp\n");
}

#[test]
fn test_render_two_variables_one_blank_line() {
    let out = render(&snapshot(&[("USER", "johndoe"), ("TEMP", r"C:\Temp")]));
    assert_eq!(out, "[TEMP]\nC:\\Temp\n\n[USER]\njohndoe\n");
}

#[test]
fn test_render_splits_segments() {
    let out = render(&snapshot(&[("X", "A;B;C")]));
    assert_eq!(out, "[X]\nA\nB\nC\n");
}

#[test]
fn test_render_path_and_other_variables() {
    let out = render(&snapshot(&[
        ("TEMP", r"C:\Temp"),
        ("Path", r"C:\Windows;C:\Program Files"),
        ("ComSpec", r"C:\Windows\system32\cmd.exe"),
    ]));
    insta::assert_snapshot!(out, @r"
    [ComSpec]
    C:\Windows\system32\cmd.exe

    [Path]
    C:\Windows
    C:\Program Files

    [TEMP]
    C:\Temp
    ");
}

#[test]
fn test_render_sorts_case_insensitively() {
    let out = render(&snapshot(&[("b", "2"), ("C", "3"), ("A", "1")]));
    assert_eq!(out, "[A]\n1\n\n[b]\n2\n\n[C]\n3\n");
}

#[test]
fn test_render_empty_value() {
    assert_eq!(render(&snapshot(&[("EMPTY", "")])), "[EMPTY]\n\n");
}

#[test]
fn test_render_empty_snapshot() {
    assert_eq!(render(&Snapshot::new()), "");
}

#[test]
fn test_render_header_both() {
    let header = render_header(Scope::Both, "2026-01-02 03:04:05 +0100");
    insta::assert_snapshot!(header, @r"
    # HKEY_LOCAL_MACHINE\SYSTEM\CurrentControlSet\Control\Session Manager\Environment - Exported 2026-01-02 03:04:05 +0100
    # HKEY_CURRENT_USER\Environment - Exported 2026-01-02 03:04:05 +0100
    ");
    assert!(header.ends_with("\n\n"));
}

#[test]
fn test_render_header_single_scope() {
    assert_eq!(
        render_header(Scope::User, "T"),
        "# HKEY_CURRENT_USER\\Environment - Exported T\n\n"
    );
    assert_eq!(render_header(Scope::Machine, "T").lines().count(), 2);
}

#[test]
fn test_parse_recovers_rendered_snapshot() {
    let original = snapshot(&[
        ("Path", r"C:\Windows\System32;C:\Windows;C:\Program Files\Git\bin"),
        ("TEMP", r"%USERPROFILE%\AppData\Local\Temp"),
        ("EMPTY", ""),
        ("GAP", "A;;B"),
        ("TRAILING", "A;B;"),
        ("OS", "Windows_NT"),
        ("OneDrive", r"C:\Users\me\OneDrive"),
        ("PsModulePath", r"C:\Modules"),
    ]);

    let parsed = parse(&render(&original)).unwrap();
    assert_eq!(parsed, original);
    // Snapshot equality ignores case; titles must keep theirs.
    assert_eq!(parsed.names(), original.names());
}

#[test]
fn test_parse_skips_header() {
    let text = format!(
        "{}{}",
        render_header(Scope::Both, "2026-01-02 03:04:05 +0100"),
        "[OS]\nWindows_NT\n"
    );
    let parsed = parse(&text).unwrap();
    assert_eq!(parsed.names(), vec!["OS"]);
    assert_eq!(parsed.get("OS"), Some("Windows_NT"));
}

#[test]
fn test_parse_accepts_crlf() {
    let parsed = parse("[Path]\r\nC:\\A\r\nC:\\B\r\n\r\n[TMP]\r\nc:\\temp\r\n").unwrap();
    assert_eq!(parsed.get("Path"), Some(r"C:\A;C:\B"));
    assert_eq!(parsed.get("TMP"), Some(r"c:\temp"));
}

#[test]
fn test_parse_rejects_orphan_line() {
    let err = parse("# comment\nstray\n[OS]\nWindows_NT\n").unwrap_err();
    assert!(matches!(
        err,
        FormatError::Orphan { line_number: 2, ref line } if line == "stray"
    ));
}
