use chrono::{DateTime, TimeDelta, Utc};
use planline::cpm::{CpmOptions, compute_all, compute_project, schedule_tasks};
use planline::errors::PlanError;
use planline::model::Task;
use planline_test_utils::builders::{PlanBuilder, ProjectBuilder, TaskBuilder, day};
use planline_test_utils::init_tracing;

#[test]
fn chain_propagates_earliest_times() {
    init_tracing();

    // A -> B -> C, five days each.
    let store = PlanBuilder::new()
        .project(ProjectBuilder::new("p"))
        .task(TaskBuilder::new("A", "p").days(0, 5))
        .task(TaskBuilder::new("B", "p").days(0, 5).after("A"))
        .task(TaskBuilder::new("C", "p").days(0, 5).after("B"))
        .store();

    let schedule = compute_project(&store, "p", &CpmOptions::default()).unwrap();

    let a = schedule.annotation("A").unwrap();
    let b = schedule.annotation("B").unwrap();
    let c = schedule.annotation("C").unwrap();

    assert_eq!((a.earliest_start, a.earliest_finish), (day(0), day(5)));
    assert_eq!((b.earliest_start, b.earliest_finish), (day(5), day(10)));
    assert_eq!((c.earliest_start, c.earliest_finish), (day(10), day(15)));
    assert_eq!(schedule.project_finish, day(15));

    assert!(a.is_critical && b.is_critical && c.is_critical);
    assert_eq!(schedule.critical_chain(), vec!["A", "B", "C"]);
}

#[test]
fn parallel_paths_give_the_short_branch_slack() {
    // A (10d) and B (3d) both feed C (2d).
    let store = PlanBuilder::new()
        .project(ProjectBuilder::new("p"))
        .task(TaskBuilder::new("A", "p").days(0, 10))
        .task(TaskBuilder::new("B", "p").days(0, 3))
        .task(TaskBuilder::new("C", "p").days(0, 2).after("A").after("B"))
        .store();

    let schedule = compute_project(&store, "p", &CpmOptions::default()).unwrap();

    let c = schedule.annotation("C").unwrap();
    assert_eq!(c.earliest_start, day(10));
    assert_eq!(c.earliest_finish, day(12));

    let a = schedule.annotation("A").unwrap();
    let b = schedule.annotation("B").unwrap();
    assert_eq!(a.slack, TimeDelta::zero());
    assert_eq!(b.slack, TimeDelta::days(7));
    assert_eq!(b.latest_start, day(7));
    assert_eq!(b.latest_finish, day(10));

    let critical: Vec<&str> = schedule.critical.iter().map(|s| s.as_str()).collect();
    assert_eq!(critical, vec!["A", "C"]);
}

#[test]
fn lone_task_has_zero_slack_and_is_critical() {
    let store = PlanBuilder::new()
        .project(ProjectBuilder::new("p"))
        .task(TaskBuilder::new("solo", "p").days(3, 4))
        .store();

    let schedule = compute_project(&store, "p", &CpmOptions::default()).unwrap();
    let solo = schedule.annotation("solo").unwrap();

    // Declared start is later than the project anchor, so it wins.
    assert_eq!(solo.earliest_start, day(3));
    assert_eq!(solo.earliest_start, solo.latest_start);
    assert_eq!(solo.slack, TimeDelta::zero());
    assert!(schedule.is_critical("solo"));
}

#[test]
fn root_task_never_starts_before_project_anchor() {
    let store = PlanBuilder::new()
        .project(ProjectBuilder::new("p").span(5, 50))
        .task(TaskBuilder::new("early", "p").days(0, 3))
        .store();

    let schedule = compute_project(&store, "p", &CpmOptions::default()).unwrap();
    let early = schedule.annotation("early").unwrap();

    assert_eq!(early.earliest_start, day(5));
    assert_eq!(early.earliest_finish, day(8));
}

#[test]
fn milestone_only_project_yields_empty_critical_set() {
    let store = PlanBuilder::new()
        .project(ProjectBuilder::new("p"))
        .task(TaskBuilder::new("kickoff", "p").milestone(0))
        .task(TaskBuilder::new("launch", "p").milestone(30).after("kickoff"))
        .store();

    let schedule = compute_project(&store, "p", &CpmOptions::default()).unwrap();

    assert!(schedule.is_empty());
    assert!(schedule.critical.is_empty());
    assert_eq!(schedule.project_finish, day(0));
}

#[test]
fn empty_project_is_not_an_error() {
    let store = PlanBuilder::new()
        .project(ProjectBuilder::new("p"))
        .store();

    let schedule = compute_project(&store, "p", &CpmOptions::default()).unwrap();
    assert!(schedule.annotations.is_empty());
    assert!(schedule.critical_chain().is_empty());
}

#[test]
fn dependency_on_milestone_is_ignored_for_scheduling() {
    let store = PlanBuilder::new()
        .project(ProjectBuilder::new("p"))
        .task(TaskBuilder::new("gate", "p").milestone(20))
        .task(TaskBuilder::new("work", "p").days(0, 2).after("gate"))
        .store();

    let schedule = compute_project(&store, "p", &CpmOptions::default()).unwrap();

    assert!(schedule.annotation("gate").is_none());
    assert_eq!(schedule.annotation("work").unwrap().earliest_start, day(0));
}

#[test]
fn cross_project_dependency_is_ignored_for_scheduling() {
    let store = PlanBuilder::new()
        .project(ProjectBuilder::new("p1"))
        .project(ProjectBuilder::new("p2"))
        .task(TaskBuilder::new("X", "p1").days(0, 20))
        .task(TaskBuilder::new("Y", "p2").days(0, 2).after("X"))
        .store();

    // Still stored.
    assert!(store.get_task("Y").unwrap().depends_on("X"));

    let schedules = compute_all(&store, ["p1", "p2"], &CpmOptions::default()).unwrap();
    let y = schedules["p2"].annotation("Y").unwrap();

    assert_eq!(y.earliest_start, day(0));
    assert_eq!(schedules["p2"].project_finish, day(2));
    assert_eq!(schedules["p1"].project_finish, day(20));
}

#[test]
fn disconnected_subgraphs_are_anchored_independently() {
    let store = PlanBuilder::new()
        .project(ProjectBuilder::new("p"))
        .task(TaskBuilder::new("long", "p").days(0, 10))
        .task(TaskBuilder::new("short1", "p").days(0, 2))
        .task(TaskBuilder::new("short2", "p").days(0, 2).after("short1"))
        .store();

    let schedule = compute_project(&store, "p", &CpmOptions::default()).unwrap();

    assert_eq!(schedule.annotation("short1").unwrap().earliest_start, day(0));
    assert_eq!(schedule.annotation("short2").unwrap().earliest_start, day(2));
    assert_eq!(schedule.annotation("short1").unwrap().slack, TimeDelta::days(6));
    assert_eq!(schedule.critical_chain(), vec!["long"]);
}

#[test]
fn diamond_keeps_every_duration() {
    //     B(4)
    //   /      \
    // A(1)      D(3)
    //   \      /
    //     C(2)
    let store = PlanBuilder::new()
        .project(ProjectBuilder::new("p"))
        .task(TaskBuilder::new("A", "p").days(0, 1))
        .task(TaskBuilder::new("B", "p").days(1, 4).after("A"))
        .task(TaskBuilder::new("C", "p").days(1, 2).after("A"))
        .task(TaskBuilder::new("D", "p").days(9, 3).after("B").after("C"))
        .store();

    let schedule = compute_project(&store, "p", &CpmOptions::default()).unwrap();

    for task in store.tasks_of("p") {
        let a = schedule.annotation(&task.id).unwrap();
        assert_eq!(a.earliest_finish - a.earliest_start, task.duration());
        assert_eq!(a.latest_finish - a.latest_start, task.duration());
    }

    assert_eq!(schedule.annotation("D").unwrap().earliest_start, day(5));
    assert_eq!(schedule.annotation("C").unwrap().slack, TimeDelta::days(2));
    assert_eq!(schedule.critical_chain(), vec!["A", "B", "D"]);
}

#[test]
fn slack_below_tolerance_counts_as_critical() {
    // B is half a day shorter than A; both feed C.
    let mut b = TaskBuilder::new("B", "p").days(0, 10).build();
    b.due_date = b.due_date - TimeDelta::hours(12);

    let tasks: Vec<Task> = vec![
        TaskBuilder::new("A", "p").days(0, 10).build(),
        b,
        TaskBuilder::new("C", "p").days(0, 1).after("A").after("B").build(),
    ];

    let default = schedule_tasks("p".into(), day(0), &tasks, &CpmOptions::default()).unwrap();
    assert_eq!(default.annotation("B").unwrap().slack, TimeDelta::hours(12));
    assert!(default.is_critical("B"));

    let strict = CpmOptions {
        slack_tolerance: TimeDelta::hours(1),
    };
    let strict = schedule_tasks("p".into(), day(0), &tasks, &strict).unwrap();
    assert!(!strict.is_critical("B"));
    assert!(strict.is_critical("A"));
}

#[test]
fn chain_past_the_calendar_end_fails_instead_of_panicking() {
    init_tracing();

    // Each task is valid on its own; chained, B would finish past the
    // representable range.
    let start = DateTime::<Utc>::MIN_UTC + TimeDelta::days(1);
    let end = DateTime::<Utc>::MAX_UTC - TimeDelta::days(1);
    let a = Task::new("A", "p", "A", start, end);
    let mut b = Task::new("B", "p", "B", start, end);
    b.dependencies.insert("A".to_string());

    let err = schedule_tasks("p".into(), start, &[a, b], &CpmOptions::default()).unwrap_err();
    assert!(matches!(err, PlanError::ScheduleComputationFailed(_)));
}

#[test]
fn unknown_project_is_not_found() {
    let store = PlanBuilder::new()
        .project(ProjectBuilder::new("p"))
        .store();

    let err = compute_project(&store, "nope", &CpmOptions::default()).unwrap_err();
    assert!(matches!(err, PlanError::NotFound { .. }));
}

#[test]
fn repeated_passes_are_identical() {
    let store = PlanBuilder::new()
        .project(ProjectBuilder::new("p"))
        .task(TaskBuilder::new("A", "p").days(0, 3))
        .task(TaskBuilder::new("B", "p").days(0, 4).after("A"))
        .store();

    let first = compute_project(&store, "p", &CpmOptions::default()).unwrap();
    let second = compute_project(&store, "p", &CpmOptions::default()).unwrap();
    assert_eq!(first, second);
}
