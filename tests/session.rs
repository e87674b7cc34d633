use planline::errors::PlanError;
use planline::session::{DependencyEdit, PlannerSession, Refresh, UiIntent};
use planline::view::Filters;
use planline_test_utils::builders::{PlanBuilder, ProjectBuilder, TaskBuilder, day};
use planline_test_utils::init_tracing;
use planline_test_utils::sources::{StaticSource, UnavailableSource};

fn source() -> StaticSource {
    let plan = PlanBuilder::new()
        .project(ProjectBuilder::new("p"))
        .project(ProjectBuilder::new("q"))
        .task(TaskBuilder::new("A", "p").days(0, 10))
        .task(TaskBuilder::new("B", "p").days(0, 3))
        .task(TaskBuilder::new("C", "p").days(10, 2).after("A"))
        .task(TaskBuilder::new("Z", "q").days(0, 1));
    StaticSource::new(plan.projects, plan.tasks)
}

#[test]
fn failed_load_surfaces_as_data_unavailable() {
    init_tracing();
    let err = PlannerSession::load(&UnavailableSource).unwrap_err();
    assert_eq!(err, PlanError::DataUnavailable("backend offline".to_string()));
}

#[test]
fn inconsistent_load_surfaces_as_data_unavailable() {
    let source = StaticSource::new(
        vec![ProjectBuilder::new("p").build()],
        vec![
            TaskBuilder::new("A", "p").after("B").build(),
            TaskBuilder::new("B", "p").after("A").build(),
        ],
    );

    match PlannerSession::load(&source) {
        Err(PlanError::DataUnavailable(msg)) => assert!(msg.contains("cycle")),
        other => panic!("expected DataUnavailable, got {other:?}"),
    }
}

#[test]
fn every_project_is_selected_after_load() {
    let session = PlannerSession::load(&source()).unwrap();
    assert_eq!(session.view_options().selection, vec!["p", "q"]);
}

#[test]
fn dependency_edit_reports_schedule_refresh_and_moves_critical_path() {
    let mut session = PlannerSession::load(&source()).unwrap();

    let before = session.critical_task_ids("p").unwrap();
    assert!(before.contains("A") && before.contains("C"));
    assert!(!before.contains("B"));

    // Make C wait on B as well: B still has slack.
    let refresh = session
        .handle(UiIntent::DependencyEdit {
            task: "C".into(),
            predecessor: "B".into(),
            edit: DependencyEdit::Add,
        })
        .unwrap();
    assert_eq!(refresh, Refresh::Schedule("p".into()));

    let annotations = session.annotations("p").unwrap();
    assert_eq!(annotations["B"].slack, chrono::TimeDelta::days(7));

    // Dragging B to 11 days makes it the driver.
    session
        .handle(UiIntent::DateChange {
            task: "B".into(),
            start: day(0),
            end: day(11),
        })
        .unwrap();
    let after = session.critical_task_ids("p").unwrap();
    assert!(after.contains("B") && after.contains("C"));
    assert!(!after.contains("A"));
}

#[test]
fn rejected_drag_leaves_rows_unchanged() {
    let mut session = PlannerSession::load(&source()).unwrap();
    session.handle(UiIntent::ShowCriticalPath(true)).unwrap();
    let before = session.rows().unwrap();

    let err = session
        .handle(UiIntent::DateChange {
            task: "A".into(),
            start: day(5),
            end: day(1),
        })
        .unwrap_err();

    assert!(matches!(err, PlanError::InvalidRange { .. }));
    assert_eq!(session.rows().unwrap(), before);
    assert_eq!(session.store().get_task("A").unwrap().due_date, day(10));
}

#[test]
fn cyclic_edit_is_rejected() {
    let mut session = PlannerSession::load(&source()).unwrap();
    let err = session
        .handle(UiIntent::DependencyEdit {
            task: "A".into(),
            predecessor: "C".into(),
            edit: DependencyEdit::Add,
        })
        .unwrap_err();
    assert!(matches!(err, PlanError::CyclicDependency { .. }));
}

#[test]
fn view_intents_only_refresh_rows() {
    let mut session = PlannerSession::load(&source()).unwrap();

    assert_eq!(
        session.handle(UiIntent::CollapseToggle("p".into())).unwrap(),
        Refresh::Rows
    );
    assert_eq!(
        session
            .handle(UiIntent::ProgressChange {
                task: "A".into(),
                percent: 55
            })
            .unwrap(),
        Refresh::Rows
    );
    assert_eq!(
        session
            .handle(UiIntent::FilterChange(Filters::query("nothing")))
            .unwrap(),
        Refresh::Rows
    );

    // p collapsed, q filtered empty: headers only.
    let rows = session.rows().unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn unknown_selection_is_rejected_and_kept() {
    let mut session = PlannerSession::load(&source()).unwrap();

    let err = session
        .handle(UiIntent::ProjectSelectionChange(vec!["q".into(), "ghost".into()]))
        .unwrap_err();
    assert!(matches!(err, PlanError::NotFound { .. }));
    assert_eq!(session.view_options().selection, vec!["p", "q"]);

    session
        .handle(UiIntent::ProjectSelectionChange(vec!["q".into()]))
        .unwrap();
    let rows = session.rows().unwrap();
    assert!(rows.iter().all(|r| r.project_id() == "q"));
}

#[test]
fn dependency_removal_is_idempotent_through_the_session() {
    let mut session = PlannerSession::load(&source()).unwrap();
    for _ in 0..2 {
        session
            .handle(UiIntent::DependencyEdit {
                task: "C".into(),
                predecessor: "A".into(),
                edit: DependencyEdit::Remove,
            })
            .unwrap();
    }
    assert!(session.store().get_task("C").unwrap().dependencies.is_empty());
}
