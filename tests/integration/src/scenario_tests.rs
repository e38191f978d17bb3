//! Scenario tests: long operation sequences against a realistic firmware tree
//!
//! The property tests drive random sequences of engine operations and check
//! the document-level invariants after every step.

use std::collections::HashSet;

use keil_core::{CollectingReporter, SyncEngine};
use keil_test_utils::TestProject;
use proptest::prelude::*;

const FIRMWARE_TREE: &[&str] = &[
    "src/app/main.c",
    "src/app/app.h",
    "src/drivers/uart/uart.c",
    "src/drivers/uart/uart.h",
    "src/drivers/spi/spi.c",
    "src/drivers/spi/spi_ll.cpp",
    "src/middleware/rtos/tasks.c",
    "src/middleware/rtos/include/rtos.h",
    "src/board/board.hpp",
];

#[derive(Debug, Clone)]
enum Op {
    Create { depth: usize, prefixed: bool },
    Refresh { depth: usize },
    Clean { depth: usize },
    Delete(&'static str),
    AddIncludes,
    DeleteIncludes(&'static str),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..5, any::<bool>()).prop_map(|(depth, prefixed)| Op::Create { depth, prefixed }),
        (0usize..5).prop_map(|depth| Op::Refresh { depth }),
        (0usize..5).prop_map(|depth| Op::Clean { depth }),
        prop::sample::select(vec!["^Fw/drivers", "uart", "Startup", "^$", "rtos"]).prop_map(Op::Delete),
        Just(Op::AddIncludes),
        prop::sample::select(vec!["drivers", "^Inc$", "include"]).prop_map(Op::DeleteIncludes),
    ]
}

fn apply(engine: &mut SyncEngine, project: &TestProject, op: &Op) -> bool {
    let src = project.path("src");
    match op {
        Op::Create { depth, prefixed } => {
            let prefix = prefixed.then_some("Fw");
            engine.create_group(&src, *depth, prefix)
        }
        Op::Refresh { depth } => engine.refresh_group("Fw", &src, *depth),
        Op::Clean { depth } => engine.clean_rebuild_group("Fw", &src, *depth),
        Op::Delete(pattern) => engine.delete_groups(pattern),
        Op::AddIncludes => engine.add_include_paths(&src),
        Op::DeleteIncludes(pattern) => engine.delete_include_paths(pattern),
    }
}

fn assert_invariants(engine: &SyncEngine) {
    let doc = engine.document().expect("engine stays loaded");

    let names = doc.group_names();
    let unique: HashSet<&String> = names.iter().collect();
    assert_eq!(unique.len(), names.len(), "duplicate group names: {names:?}");

    for group in doc.all_groups() {
        let files = group.file_names();
        let unique: HashSet<&&str> = files.iter().collect();
        assert_eq!(unique.len(), files.len(), "duplicate files in {}", group.name);
    }

    let field = doc.include_paths().to_field();
    let entries: Vec<&str> = field.split(';').filter(|s| !s.is_empty()).collect();
    let mut sorted = entries.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(entries, sorted, "include paths not sorted and unique");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn operation_sequences_keep_invariants(ops in prop::collection::vec(op_strategy(), 1..8)) {
        let project = TestProject::new();
        project.add_files(FIRMWARE_TREE);
        let mut engine = SyncEngine::new(CollectingReporter::new());
        prop_assert!(engine.set_project(project.descriptor_path()));

        for op in &ops {
            prop_assert!(apply(&mut engine, &project, op), "{:?} failed", op);
            assert_invariants(&engine);
        }
    }

    #[test]
    fn refresh_twice_is_byte_identical(depth in 0usize..5) {
        let project = TestProject::new();
        project.add_files(FIRMWARE_TREE);
        let mut engine = SyncEngine::new(CollectingReporter::new());
        prop_assert!(engine.set_project(project.descriptor_path()));

        prop_assert!(engine.refresh_group("Fw", project.path("src"), depth));
        let first = project.read_descriptor();
        prop_assert!(engine.refresh_group("Fw", project.path("src"), depth));

        prop_assert_eq!(first, project.read_descriptor());
    }
}

#[test]
fn test_firmware_tree_rebuild_layout() {
    let project = TestProject::new();
    project.add_files(FIRMWARE_TREE);
    let mut engine = SyncEngine::new(CollectingReporter::new());
    assert!(engine.set_project(project.descriptor_path()));

    let summary = engine
        .try_clean_rebuild_group("Fw", project.path("src"), 3)
        .unwrap();

    assert_eq!(
        summary.groups_created,
        vec![
            "Fw/app",
            "Fw/board",
            "Fw/drivers/spi",
            "Fw/drivers/uart",
            "Fw/middleware/rtos/include",
        ]
    );
    let doc = engine.document().unwrap();
    assert_eq!(
        doc.find_group("Fw/drivers/spi").unwrap().file_names(),
        vec!["spi.c", "spi_ll.cpp"]
    );
    assert_eq!(
        doc.include_paths().to_field(),
        "Inc;src/app;src/board;src/drivers/uart;src/middleware/rtos/include"
    );
}

#[test]
fn test_shallow_refresh_collapses_subfolders() {
    let project = TestProject::new();
    project.add_files(FIRMWARE_TREE);
    let mut engine = SyncEngine::new(CollectingReporter::new());
    assert!(engine.set_project(project.descriptor_path()));
    assert!(engine.refresh_group("Fw", project.path("src"), 3));

    let summary = engine.try_refresh_group("Fw", project.path("src"), 1).unwrap();

    assert_eq!(
        summary.groups_created,
        vec!["Fw/app", "Fw/board", "Fw/drivers", "Fw/middleware"]
    );
    let doc = engine.document().unwrap();
    assert_eq!(
        doc.find_group("Fw/drivers").unwrap().file_names(),
        vec!["spi.c", "spi_ll.cpp", "uart.c", "uart.h"]
    );
    assert!(doc.find_group("Fw/drivers/uart").is_none());
}
