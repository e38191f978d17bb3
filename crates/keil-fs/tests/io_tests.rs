use assert_fs::prelude::*;
use keil_fs::{Error, NormalizedPath, io, read_toml_optional};
use predicates::prelude::*;
use serde::Deserialize;
use std::fs;

#[test]
fn test_write_atomic_creates_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("demo.uvprojx"));

    io::write_atomic(&path, b"<Project/>").unwrap();

    temp.child("demo.uvprojx").assert("<Project/>");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let child = temp.child("demo.uvprojx");
    child.write_str("original").unwrap();

    io::write_atomic(&NormalizedPath::new(child.path()), b"updated").unwrap();

    child.assert("updated");
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = assert_fs::TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("demo.uvprojx"));

    io::write_atomic(&path, b"content").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn test_write_atomic_into_missing_parent_creates_it() {
    let temp = assert_fs::TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("a/b/file.txt"));

    io::write_atomic(&path, b"deep").unwrap();

    temp.child("a/b/file.txt").assert(predicate::path::exists());
}

#[test]
fn test_read_text_missing_file_is_not_found() {
    let temp = assert_fs::TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("missing.txt"));

    assert!(matches!(io::read_text(&path), Err(Error::NotFound { .. })));
    assert!(matches!(io::read_bytes(&path), Err(Error::NotFound { .. })));
}

#[derive(Debug, PartialEq, Deserialize)]
struct Sample {
    depth: usize,
    exts: Vec<String>,
}

#[test]
fn test_read_toml_optional_parses_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("keil-sync.toml")
        .write_str("depth = 4\nexts = [\".c\"]\n")
        .unwrap();
    let path = NormalizedPath::new(temp.path().join("keil-sync.toml"));

    let loaded: Option<Sample> = read_toml_optional(&path).unwrap();

    assert_eq!(
        loaded,
        Some(Sample {
            depth: 4,
            exts: vec![".c".into()],
        })
    );
}

#[test]
fn test_read_toml_optional_missing_is_none() {
    let temp = assert_fs::TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("keil-sync.toml"));

    let loaded: Option<Sample> = read_toml_optional(&path).unwrap();

    assert!(loaded.is_none());
}

#[test]
fn test_read_toml_optional_reports_parse_errors() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("bad.toml").write_str("depth = [").unwrap();
    let path = NormalizedPath::new(temp.path().join("bad.toml"));

    let err = read_toml_optional::<Sample>(&path).unwrap_err();

    assert!(matches!(err, Error::ConfigParse { .. }));
    assert!(err.to_string().contains("bad.toml"));
}
