// src/model/task.rs

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ProjectId, Span, TaskId, Timestamp, dates};
use crate::types::{TaskPriority, TaskStatus};

/// A unit of planned work owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(with = "dates")]
    pub start_date: Timestamp,
    #[serde(with = "dates")]
    pub due_date: Timestamp,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub assignee: Option<String>,
    /// Predecessors: tasks that must finish before this one starts.
    ///
    /// Successors are never stored; the store derives them.
    #[serde(default)]
    pub dependencies: BTreeSet<TaskId>,
    #[serde(default)]
    pub is_milestone: bool,
}

impl Task {
    pub fn new(
        id: impl Into<TaskId>,
        project_id: impl Into<ProjectId>,
        title: impl Into<String>,
        start_date: Timestamp,
        due_date: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            title: title.into(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            start_date,
            due_date,
            progress: 0,
            assignee: None,
            dependencies: BTreeSet::new(),
            is_milestone: false,
        }
    }

    /// Declared length of the task. Scheduling moves a task, never resizes it.
    pub fn duration(&self) -> Span {
        self.due_date - self.start_date
    }

    pub fn depends_on(&self, predecessor: &str) -> bool {
        self.dependencies.contains(predecessor)
    }
}
