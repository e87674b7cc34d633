use std::thread;

use planline::errors::PlanError;
use planline::graph::TaskGraphStore;
use planline_test_utils::builders::{PlanBuilder, ProjectBuilder, TaskBuilder};

#[test]
fn lookups_and_insertion_order() {
    let store = PlanBuilder::new()
        .project(ProjectBuilder::new("p"))
        .project(ProjectBuilder::new("q"))
        .task(TaskBuilder::new("z", "p"))
        .task(TaskBuilder::new("y", "q"))
        .task(TaskBuilder::new("a", "p"))
        .store();

    assert_eq!(store.get_project("q").unwrap().code, "Q");
    assert!(matches!(store.get_task("nope"), Err(PlanError::NotFound { .. })));

    let ids: Vec<&str> = store.tasks_of("p").map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["z", "a"]);
    assert_eq!(store.tasks_of("missing").count(), 0);
}

#[test]
fn successors_are_derived_from_dependencies() {
    let store = PlanBuilder::new()
        .project(ProjectBuilder::new("p"))
        .task(TaskBuilder::new("A", "p"))
        .task(TaskBuilder::new("B", "p").after("A"))
        .task(TaskBuilder::new("C", "p").after("A"))
        .store();

    let succ: Vec<&str> = store
        .successors_of("A")
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(succ, vec!["B", "C"]);
    assert!(store.successors_of("C").is_empty());
    assert!(store.successors_of("nope").is_empty());
}

#[test]
fn loaded_data_must_be_consistent() {
    let p = ProjectBuilder::new("p").build();

    let dangling = TaskGraphStore::from_parts(
        vec![p.clone()],
        vec![TaskBuilder::new("A", "p").after("ghost").build()],
    );
    assert!(matches!(dangling, Err(PlanError::NotFound { .. })));

    let orphan = TaskGraphStore::from_parts(vec![p.clone()], vec![TaskBuilder::new("A", "q").build()]);
    assert!(matches!(orphan, Err(PlanError::NotFound { .. })));

    let duplicate = TaskGraphStore::from_parts(
        vec![p.clone()],
        vec![
            TaskBuilder::new("A", "p").build(),
            TaskBuilder::new("A", "p").build(),
        ],
    );
    assert!(matches!(duplicate, Err(PlanError::DuplicateId { .. })));

    let cyclic = TaskGraphStore::from_parts(
        vec![p],
        vec![
            TaskBuilder::new("A", "p").after("B").build(),
            TaskBuilder::new("B", "p").after("A").build(),
        ],
    );
    assert!(matches!(cyclic, Err(PlanError::CyclicDependency { .. })));
}

#[test]
fn cross_project_loop_is_allowed_in_storage() {
    let store = TaskGraphStore::from_parts(
        vec![
            ProjectBuilder::new("p").build(),
            ProjectBuilder::new("q").build(),
        ],
        vec![
            TaskBuilder::new("A", "p").after("B").build(),
            TaskBuilder::new("B", "q").after("A").build(),
        ],
    );
    assert!(store.is_ok());
}

fn assert_sync<T: Sync>() {}

#[test]
fn store_can_be_read_from_several_threads() {
    assert_sync::<TaskGraphStore>();

    let store = PlanBuilder::new()
        .project(ProjectBuilder::new("p"))
        .task(TaskBuilder::new("A", "p"))
        .task(TaskBuilder::new("B", "p").after("A"))
        .task(TaskBuilder::new("C", "p").after("A"))
        .store();

    let counts: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| store.successors_of("A").len()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(counts, vec![2; 4]);
}
