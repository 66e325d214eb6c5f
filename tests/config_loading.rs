use std::io::Write;
use std::path::PathBuf;

use gauge_exec::config::{ExecutionConfig, ExecutionOverrides, load_and_validate, resolve, validate_execution};
use gauge_exec::errors::GaugeExecError;
use tempfile::NamedTempFile;

#[test]
fn full_execution_section_is_loaded() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[execution]
specs_dir = "/proj/specs"
tags = "smoke & !wip"
in_parallel = true
nodes = 4
flags = ["--verbose", "--env", "ci"]
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap().into_execution();

    assert_eq!(cfg.specs_dir, Some(PathBuf::from("/proj/specs")));
    assert_eq!(cfg.tags.as_deref(), Some("smoke & !wip"));
    assert_eq!(cfg.in_parallel, Some(true));
    assert_eq!(cfg.nodes, 4);
    assert_eq!(cfg.flags, vec!["--verbose", "--env", "ci"]);
    assert!(!cfg.skip);
}

#[test]
fn empty_file_yields_defaults() {
    let file = NamedTempFile::new().unwrap();
    let cfg = load_and_validate(file.path()).unwrap().into_execution();
    assert_eq!(cfg, Default::default());
}

#[test]
fn relative_specs_dir_is_resolved_against_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("GaugeExec.toml");
    std::fs::write(&path, "[execution]\nspecs_dir = \"specs\"\n").unwrap();

    let cfg = load_and_validate(&path).unwrap().into_execution();

    assert_eq!(cfg.specs_dir, Some(dir.path().join("specs")));
}

#[test]
fn unknown_key_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[execution]\nparalel = true\n").unwrap();

    match load_and_validate(file.path()) {
        Err(GaugeExecError::TomlError(e)) => assert!(e.to_string().contains("paralel")),
        other => panic!("expected TomlError, got {other:?}"),
    }
}

#[test]
fn negative_nodes_are_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[execution]\nnodes = -1\n").unwrap();

    assert!(matches!(
        load_and_validate(file.path()),
        Err(GaugeExecError::TomlError(_))
    ));
}

#[test]
fn overrides_win_over_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[execution]
tags = "smoke"
in_parallel = true
nodes = 2
flags = ["--verbose"]
"#
    )
    .unwrap();

    let cfg = resolve(
        Some(file.path()),
        ExecutionOverrides {
            tags: Some("regression".to_string()),
            in_parallel: Some(false),
            flags: vec!["--simple-console".to_string()],
            ..ExecutionOverrides::default()
        },
    )
    .unwrap();

    assert_eq!(cfg.tags.as_deref(), Some("regression"));
    assert_eq!(cfg.in_parallel, Some(false));
    assert_eq!(cfg.nodes, 2);
    assert_eq!(cfg.flags, vec!["--verbose", "--simple-console"]);
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    match resolve(Some(&missing), ExecutionOverrides::default()) {
        Err(GaugeExecError::ConfigError(msg)) => assert!(msg.contains("does not exist")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn overrides_are_validated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("GaugeExec.toml");
    std::fs::write(&path, "").unwrap();

    let res = resolve(
        Some(&path),
        ExecutionOverrides {
            flags: vec!["bad\0".to_string()],
            ..ExecutionOverrides::default()
        },
    );
    assert!(matches!(res, Err(GaugeExecError::ConfigError(_))));
}

#[test]
fn empty_specs_dir_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[execution]\nspecs_dir = \"\"\n").unwrap();

    match load_and_validate(file.path()) {
        Err(GaugeExecError::ConfigError(msg)) => assert!(msg.contains("specs_dir")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn nul_byte_in_flag_names_the_offending_entry() {
    let cfg = ExecutionConfig {
        flags: vec!["--ok".to_string(), "--b\0ad".to_string()],
        ..ExecutionConfig::default()
    };

    match validate_execution(&cfg) {
        Err(GaugeExecError::ConfigError(msg)) => assert!(msg.contains("flags[1]"), "{msg}"),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn nodes_without_parallel_is_accepted() {
    let cfg = ExecutionConfig {
        nodes: 4,
        ..ExecutionConfig::default()
    };
    assert!(validate_execution(&cfg).is_ok());
}

#[test]
fn blank_tags_are_not_effective() {
    let cfg = ExecutionConfig {
        tags: Some(" \t ".to_string()),
        ..ExecutionConfig::default()
    };
    assert_eq!(cfg.effective_tags(), None);

    let cfg = ExecutionConfig {
        tags: Some(" smoke ".to_string()),
        ..ExecutionConfig::default()
    };
    assert_eq!(cfg.effective_tags(), Some(" smoke "));
}

#[test]
fn unset_overrides_keep_file_values() {
    let base = ExecutionConfig {
        tags: Some("smoke".to_string()),
        in_parallel: Some(true),
        nodes: 3,
        skip: true,
        ..ExecutionConfig::default()
    };

    let merged = base.clone().with_overrides(ExecutionOverrides::default());
    assert_eq!(merged, base);
}
