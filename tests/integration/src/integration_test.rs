//! End-to-end integration test for the vertical slice
//!
//! Exercises the complete flow: descriptor on disk -> engine mutation ->
//! descriptor reloaded from disk by an independent reader.

use std::thread;

use keil_core::{CollectingReporter, EngineState, SyncEngine};
use keil_fs::NormalizedPath;
use keil_project::DescriptorDocument;
use keil_test_utils::{MINIMAL_DESCRIPTOR, TestProject};
use pretty_assertions::assert_eq;

fn reload(project: &TestProject) -> DescriptorDocument {
    DescriptorDocument::load(&NormalizedPath::new(project.descriptor_path())).unwrap()
}

fn loaded_engine(project: &TestProject) -> SyncEngine {
    let mut engine = SyncEngine::new(CollectingReporter::new());
    assert!(engine.set_project(project.descriptor_path()));
    engine
}

#[test]
fn test_disk_matches_memory_after_each_operation() {
    let project = TestProject::new();
    project.add_files(&[
        "src/drivers/uart.c",
        "src/drivers/uart.h",
        "src/app/main.c",
        "lib/cmsis/core_cm4.h",
    ]);
    let mut engine = loaded_engine(&project);

    assert!(engine.clean_rebuild_group("Project", project.path("src"), 2));
    assert_eq!(reload(&project).all_groups(), engine.document().unwrap().all_groups());

    assert!(engine.add_include_paths(project.path("lib")));
    assert_eq!(
        reload(&project).include_paths(),
        engine.document().unwrap().include_paths()
    );

    assert!(engine.delete_groups("app$"));
    assert_eq!(reload(&project).group_names(), vec!["Startup", "Project/drivers"]);

    assert!(engine.delete_include_paths("cmsis"));
    assert_eq!(reload(&project).include_paths().to_field(), "Inc;src/drivers");
}

#[test]
fn test_end_to_end_scenario_from_fresh_engine() {
    let project = TestProject::new();
    project.add_files(&["src/drivers/uart.c", "src/drivers/uart.h", "src/app/main.c"]);
    let mut engine = loaded_engine(&project);

    assert!(engine.clean_rebuild_group("Project", project.path("src"), 2));

    let doc = reload(&project);
    let drivers = doc.find_group("Project/drivers").unwrap();
    let app = doc.find_group("Project/app").unwrap();
    assert_eq!(drivers.file_names(), vec!["uart.c", "uart.h"]);
    assert_eq!(app.file_names(), vec!["main.c"]);
    assert!(doc.include_paths().contains("src/drivers"));
    assert!(!doc.include_paths().contains("src/app"));

    let uart_h = drivers.files.iter().find(|f| f.file_name == "uart.h").unwrap();
    assert_eq!(uart_h.file_type, 5);
    assert_eq!(uart_h.file_path, "src/drivers/uart.h");
}

#[test]
fn test_two_engines_on_separate_projects() {
    let first = TestProject::new();
    let second = TestProject::new();
    first.add_file("src/a/a.c");
    second.add_file("src/b/b.c");

    let mut one = loaded_engine(&first);
    let mut two = loaded_engine(&second);
    assert!(one.refresh_group("One", first.path("src"), 1));
    assert!(two.refresh_group("Two", second.path("src"), 1));

    assert_eq!(reload(&first).group_names(), vec!["Startup", "One/a"]);
    assert_eq!(reload(&second).group_names(), vec!["Startup", "Two/b"]);
}

#[test]
fn test_engine_runs_on_worker_thread() {
    let project = TestProject::new();
    project.add_file("src/app/main.c");
    let reporter = CollectingReporter::new();
    let mut engine = SyncEngine::new(reporter.clone());
    assert!(engine.set_project(project.descriptor_path()));
    let src = project.path("src");

    let engine = thread::spawn(move || {
        assert!(engine.refresh_group("Project", src, 2));
        engine
    })
    .join()
    .unwrap();

    assert_eq!(engine.state(), EngineState::Loaded);
    assert!(reporter.contains("Refreshed 'Project'"));
    assert_eq!(reload(&project).group_names(), vec!["Startup", "Project/app"]);
}

#[test]
fn test_descriptor_beside_sources_in_subfolder() {
    let project = TestProject::with_descriptor("MDK-ARM/board.uvprojx", MINIMAL_DESCRIPTOR);
    project.add_files(&["Core/Src/main.c", "Core/Inc/main.h", "Drivers/BSP/bsp.c"]);
    let mut engine = loaded_engine(&project);

    assert!(engine.refresh_group("App", project.root(), 2));

    let doc = reload(&project);
    let names = doc.group_names();
    assert!(names.contains(&"App/Core/Src".to_string()));
    assert!(names.contains(&"App/Core/Inc".to_string()));
    assert!(names.contains(&"App/Drivers/BSP".to_string()));
    let main_c = doc.find_group("App/Core/Src").unwrap().files.remove(0);
    assert_eq!(main_c.file_path, "../Core/Src/main.c");
    assert_eq!(doc.include_paths().to_field(), "../Core/Inc;Inc");
}
