// src/view/projection.rs

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::cpm::ProjectSchedule;
use crate::graph::TaskGraphStore;
use crate::model::{Project, ProjectId, Task, Timestamp};
use crate::types::TaskStatus;
use crate::view::filter::Filters;
use crate::view::rows::{ProjectRow, Row, RowColor, TaskRow};

/// UI flags that shape the row list. Collapse state lives in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Projects to show, in the order the user picked them.
    pub selection: Vec<ProjectId>,
    pub filters: Filters,
    pub show_milestones: bool,
    pub show_critical_path: bool,
    /// Reference instant for the "today" line and overdue flags.
    pub today: Option<Timestamp>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            selection: Vec::new(),
            filters: Filters::default(),
            show_milestones: true,
            show_critical_path: false,
            today: None,
        }
    }
}

/// Derive the ordered row list: each selected project's header, followed by
/// its visible task rows unless it is collapsed.
///
/// `schedules` is consulted only when `show_critical_path` is set; a project
/// missing from it just gets no critical decoration. Unknown project ids in
/// the selection are skipped.
pub fn project_rows(
    store: &TaskGraphStore,
    options: &ViewOptions,
    schedules: &HashMap<ProjectId, ProjectSchedule>,
) -> Vec<Row> {
    let mut rows = Vec::new();

    for project_id in options.selection.iter() {
        let project = match store.get_project(project_id) {
            Ok(p) => p,
            Err(_) => {
                warn!(project = %project_id, "selected project not in store; skipping");
                continue;
            }
        };

        let schedule = if options.show_critical_path {
            schedules.get(project_id)
        } else {
            None
        };

        let visible: Vec<&Task> = store
            .tasks_of(project_id)
            .filter(|t| options.show_milestones || !t.is_milestone)
            .filter(|t| options.filters.matches(t))
            .collect();

        let collapsed = store.is_collapsed(project_id);
        rows.push(Row::Project(project_row(
            project,
            collapsed,
            visible.len(),
            schedule,
        )));

        if collapsed {
            continue;
        }

        for task in visible {
            rows.push(Row::Task(task_row(task, schedule, options.today)));
        }
    }

    debug!(rows = rows.len(), "view projected");
    rows
}

fn project_row(
    project: &Project,
    collapsed: bool,
    visible_tasks: usize,
    schedule: Option<&ProjectSchedule>,
) -> ProjectRow {
    let scheduled_finish = schedule.filter(|s| !s.is_empty()).map(|s| s.project_finish);
    ProjectRow {
        project_id: project.id.clone(),
        code: project.code.clone(),
        name: project.name.clone(),
        start_date: project.start_date,
        delivery_date: project.end_date,
        progress: project.progress,
        collapsed,
        visible_tasks,
        scheduled_finish,
        finish_overrun: scheduled_finish.is_some_and(|f| f > project.end_date),
    }
}

fn task_row(task: &Task, schedule: Option<&ProjectSchedule>, today: Option<Timestamp>) -> TaskRow {
    let annotation = schedule.and_then(|s| s.annotation(&task.id));
    let is_critical = annotation.is_some_and(|a| a.is_critical);

    TaskRow {
        task_id: task.id.clone(),
        project_id: task.project_id.clone(),
        title: task.title.clone(),
        status: task.status,
        priority: task.priority,
        start_date: task.start_date,
        due_date: task.due_date,
        progress: task.progress,
        assignee: task.assignee.clone(),
        is_milestone: task.is_milestone,
        color: if is_critical {
            RowColor::Critical
        } else {
            RowColor::Status(task.status)
        },
        is_critical,
        slack: annotation.map(|a| a.slack),
        is_overdue: today.is_some_and(|now| task.due_date < now && task.status != TaskStatus::Done),
    }
}
