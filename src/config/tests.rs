// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::{Config, ConfigLoader};
use crate::logging::LogLevel;
use crate::registry::Scope;

#[test]
fn test_default_config() {
    let config = Config::default();
    insta::assert_yaml_snapshot!(
        serde_json::json!({
            "global.log_level": config.global.log_level.as_u8(),
            "global.file_log_level": config.global.file_log_level.as_u8(),
            "export.scope": config.export.scope,
            "export.header": config.export.header,
            "export.expand": config.export.expand,
        }),
        @r"
    export.expand: false
    export.header: false
    export.scope: both
    global.file_log_level: 5
    global.log_level: 2
    "
    );
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
log_level = 4
log_file = "peekenv.log"

[export]
scope = "user"
header = true
variables = ["Path", "TEMP"]
output = "env.txt"
"#;

    let config = Config::parse(toml).unwrap();
    assert_eq!(config.global.log_level, LogLevel::DEBUG);
    assert_eq!(config.global.log_file, Some(PathBuf::from("peekenv.log")));
    assert_eq!(config.export.scope, Scope::User);
    assert!(config.export.header);
    assert!(!config.export.expand);
    assert_eq!(config.export.variables, vec!["Path", "TEMP"]);
    assert_eq!(config.export.output, Some(PathBuf::from("env.txt")));
}

#[test]
fn test_config_rejects_unknown_scope() {
    let result = Config::parse("[export]\nscope = \"everything\"\n");
    assert!(result.is_err());
}

#[test]
fn test_config_rejects_unknown_keys() {
    let result = Config::parse("[export]\nformat = \"json\"\n");
    assert!(result.is_err());
}

#[test]
fn test_config_rejects_out_of_range_log_level() {
    let result = Config::parse("[global]\nlog_level = 9\n");
    assert!(result.is_err());
}

#[test]
fn test_config_builder_set_override() {
    let config = Config::builder()
        .add_toml_str("[export]\nheader = false\nscope = \"machine\"\n")
        .set("export.header", true)
        .unwrap()
        .set("export.scope", "both")
        .unwrap()
        .build()
        .unwrap();

    assert!(config.export.header);
    assert_eq!(config.export.scope, Scope::Both);
}

#[test]
fn test_config_loader_tracks_files() {
    let loader = ConfigLoader::new().add_toml_str("[export]\n header = true");

    let loaded_files = loader.loaded_files();
    let files: Vec<_> = loaded_files
        .iter()
        .map(|(source, path)| (source.as_str(), path.to_string_lossy().into_owned()))
        .collect();
    assert_eq!(files, vec![("string", "<string>".to_string())]);
}

#[test]
fn test_config_loader_optional_only_tracks_existing() {
    let loader = ConfigLoader::new().add_toml_file_optional("/nonexistent/peekenv.toml");
    assert!(loader.loaded_files().is_empty());
    assert!(loader.build().is_ok());
}

#[test]
fn test_config_required_file_missing() {
    let result = Config::from_file("/nonexistent/peekenv.toml");
    assert!(result.is_err());
}
