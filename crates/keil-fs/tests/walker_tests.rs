//! Tests for bounded folder enumeration and file discovery

use assert_fs::prelude::*;
use keil_fs::{Error, FileType, NormalizedPath, TreeWalker};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn rel(root: &NormalizedPath, paths: &[NormalizedPath]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string())
        .collect()
}

/// `root/a/b/c`, three levels below the root
fn chain_fixture() -> assert_fs::TempDir {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a/b/c").create_dir_all().unwrap();
    temp
}

#[rstest]
#[case(0, vec![])]
#[case(1, vec!["a"])]
#[case(2, vec!["a/b"])]
#[case(3, vec!["a/b/c"])]
#[case(4, vec!["a/b/c"])]
fn test_enumerate_bounded_chain(#[case] max_depth: usize, #[case] expected: Vec<&str>) {
    let temp = chain_fixture();
    let root = NormalizedPath::new(temp.path());

    let folders = TreeWalker::new().enumerate_bounded(&root, max_depth).unwrap();

    assert_eq!(rel(&root, &folders), expected);
}

#[test]
fn test_enumerate_bounded_root_without_subdirs_emits_root() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("main.c").touch().unwrap();
    let root = NormalizedPath::new(temp.path());

    let folders = TreeWalker::new().enumerate_bounded(&root, 2).unwrap();

    assert_eq!(folders, vec![root]);
}

#[test]
fn test_enumerate_bounded_batches_children_before_boundary() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("drivers/uart").create_dir_all().unwrap();
    temp.child("drivers/spi/dma").create_dir_all().unwrap();
    temp.child("app").create_dir_all().unwrap();
    let root = NormalizedPath::new(temp.path());

    let folders = TreeWalker::new().enumerate_bounded(&root, 2).unwrap();

    // `app` is a leaf at depth 1; `drivers` sits one level before the boundary
    // so both of its children are emitted without descending into `spi`.
    assert_eq!(
        rel(&root, &folders),
        vec!["app", "drivers/spi", "drivers/uart"]
    );
}

#[test]
fn test_enumerate_bounded_is_deterministic() {
    let temp = assert_fs::TempDir::new().unwrap();
    for dir in ["z", "m", "a", "k/x", "k/b"] {
        temp.child(dir).create_dir_all().unwrap();
    }
    let root = NormalizedPath::new(temp.path());
    let walker = TreeWalker::new();

    let first = walker.enumerate_bounded(&root, 3).unwrap();
    let second = walker.enumerate_bounded(&root, 3).unwrap();

    assert_eq!(first, second);
    assert_eq!(rel(&root, &first), vec!["a", "k/b", "k/x", "m", "z"]);
}

#[test]
fn test_enumerate_bounded_missing_root_is_not_found() {
    let temp = assert_fs::TempDir::new().unwrap();
    let root = NormalizedPath::new(temp.path().join("absent"));

    let err = TreeWalker::new().enumerate_bounded(&root, 2).unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn test_find_files_recurses_and_filters_by_suffix() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("uart.c").touch().unwrap();
    temp.child("uart.h").touch().unwrap();
    temp.child("notes.txt").touch().unwrap();
    temp.child("ll/uart_ll.c").touch().unwrap();
    let root = NormalizedPath::new(temp.path());

    let files = TreeWalker::new().find_files(&root, &[".c"]).unwrap();

    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["uart_ll.c", "uart.c"]);
    assert!(files.iter().all(|f| f.file_type == FileType::CSource));
    assert_eq!(files[0].path, root.join("ll/uart_ll.c"));
}

#[test]
fn test_find_files_assigns_type_codes() {
    let temp = assert_fs::TempDir::new().unwrap();
    for name in ["a.c", "b.h", "c.cpp", "d.s", "e.asm", "f.hpp"] {
        temp.child(name).touch().unwrap();
    }
    let root = NormalizedPath::new(temp.path());

    let files = TreeWalker::new()
        .find_files(&root, &[".c", ".h", ".cpp", ".s", ".asm", ".hpp"])
        .unwrap();

    let codes: Vec<(String, u8)> = files
        .iter()
        .map(|f| (f.name.clone(), f.file_type.code()))
        .collect();
    assert_eq!(
        codes,
        vec![
            ("a.c".to_string(), 1),
            ("b.h".to_string(), 5),
            ("c.cpp".to_string(), 8),
            ("d.s".to_string(), 2),
            ("e.asm".to_string(), 2),
            ("f.hpp".to_string(), 1),
        ]
    );
}

#[test]
fn test_find_files_missing_folder_is_not_found() {
    let temp = assert_fs::TempDir::new().unwrap();
    let folder = NormalizedPath::new(temp.path().join("nope"));

    let err = TreeWalker::new().find_files(&folder, &[".c"]).unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn test_find_folders_containing_lists_direct_holders_only() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("top.h").touch().unwrap();
    temp.child("drivers/uart.h").touch().unwrap();
    temp.child("drivers/uart.c").touch().unwrap();
    temp.child("app/main.c").touch().unwrap();
    temp.child("deep/er/inc/board.hpp").touch().unwrap();
    let root = NormalizedPath::new(temp.path());

    let folders = TreeWalker::new()
        .find_folders_containing(&root, &[".h", ".hpp"])
        .unwrap();

    assert_eq!(rel(&root, &folders), vec!["", "deep/er/inc", "drivers"]);
}

/// `root/app/main.c` plus `root/app/vendor`, a symlink to a directory outside
/// the root holding `inner/lib.c`.
#[cfg(unix)]
fn linked_vendor_fixture() -> (assert_fs::TempDir, assert_fs::TempDir) {
    let root = assert_fs::TempDir::new().unwrap();
    let outside = assert_fs::TempDir::new().unwrap();
    root.child("app/main.c").touch().unwrap();
    outside.child("inner/lib.c").touch().unwrap();
    std::os::unix::fs::symlink(outside.path(), root.path().join("app/vendor")).unwrap();
    (root, outside)
}

#[cfg(unix)]
#[rstest]
#[case(false, 2, vec!["app/vendor"])]
#[case(false, 3, vec![])]
#[case(true, 3, vec!["app/vendor/inner"])]
fn test_enumerate_bounded_symlinked_dir(
    #[case] follow: bool,
    #[case] max_depth: usize,
    #[case] expected: Vec<&str>,
) {
    let (temp, _outside) = linked_vendor_fixture();
    let root = NormalizedPath::new(temp.path());

    let folders = TreeWalker::new()
        .follow_links(follow)
        .enumerate_bounded(&root, max_depth)
        .unwrap();

    assert_eq!(rel(&root, &folders), expected);
}

#[cfg(unix)]
#[test]
fn test_subdirectories_lists_unfollowed_links() {
    let (temp, _outside) = linked_vendor_fixture();
    let app = NormalizedPath::new(temp.path().join("app"));

    let subdirs = TreeWalker::new().subdirectories(&app).unwrap();

    assert_eq!(subdirs, vec![app.join("vendor")]);
}
