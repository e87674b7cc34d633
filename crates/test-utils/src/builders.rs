#![allow(dead_code)]

use chrono::{NaiveDate, TimeDelta};
use planline::graph::TaskGraphStore;
use planline::model::{Project, Task, Timestamp};
use planline::types::{TaskPriority, TaskStatus};

/// Day zero for test plans: 2024-01-01T00:00:00Z.
pub fn epoch() -> Timestamp {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
        .and_utc()
}

/// `n` days after [`epoch`] (negative goes back).
pub fn day(n: i64) -> Timestamp {
    epoch() + TimeDelta::days(n)
}

/// Builder for `Project`, anchored at day 0 and ending at day 100.
pub struct ProjectBuilder {
    project: Project,
}

impl ProjectBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            project: Project::new(id, id.to_uppercase(), format!("Project {id}"), day(0), day(100)),
        }
    }

    pub fn span(mut self, start: i64, end: i64) -> Self {
        self.project.start_date = day(start);
        self.project.end_date = day(end);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.project.name = name.to_string();
        self
    }

    pub fn progress(mut self, progress: u8) -> Self {
        self.project.progress = progress;
        self
    }

    pub fn build(self) -> Project {
        self.project
    }
}

/// Builder for `Task`, spanning days 0..1 by default.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(id: &str, project_id: &str) -> Self {
        Self {
            task: Task::new(id, project_id, format!("Task {id}"), day(0), day(1)),
        }
    }

    /// Declared start day and length in days.
    pub fn days(mut self, start: i64, len: i64) -> Self {
        self.task.start_date = day(start);
        self.task.due_date = day(start + len);
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.dependencies.insert(dep.to_string());
        self
    }

    pub fn milestone(mut self, at: i64) -> Self {
        self.task.is_milestone = true;
        self.task.start_date = day(at);
        self.task.due_date = day(at);
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.task.title = title.to_string();
        self
    }

    pub fn assignee(mut self, who: &str) -> Self {
        self.task.assignee = Some(who.to_string());
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.task.status = status;
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.task.priority = priority;
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Collects projects and tasks, then builds a validated store.
#[derive(Default)]
pub struct PlanBuilder {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
}

impl PlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(mut self, project: ProjectBuilder) -> Self {
        self.projects.push(project.build());
        self
    }

    pub fn task(mut self, task: TaskBuilder) -> Self {
        self.tasks.push(task.build());
        self
    }

    pub fn store(self) -> TaskGraphStore {
        TaskGraphStore::from_parts(self.projects, self.tasks)
            .expect("Failed to build valid store from builder")
    }
}
