// src/cpm/annotation.rs

use std::collections::{BTreeSet, HashMap};

use crate::model::{ProjectId, Span, TaskId, Timestamp};

/// Earliest/latest window of one task from a single critical path pass.
///
/// Produced fresh on every computation and never updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleAnnotation {
    pub earliest_start: Timestamp,
    pub earliest_finish: Timestamp,
    pub latest_start: Timestamp,
    pub latest_finish: Timestamp,
    /// `latest_start - earliest_start`.
    pub slack: Span,
    pub is_critical: bool,
}

/// Result of one project's critical path pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSchedule {
    pub project_id: ProjectId,
    pub project_start: Timestamp,
    /// Latest earliest-finish over the project's working tasks, or the
    /// project start when there are none.
    pub project_finish: Timestamp,
    pub annotations: HashMap<TaskId, ScheduleAnnotation>,
    pub critical: BTreeSet<TaskId>,
    /// Working task ids, predecessors first.
    pub(crate) order: Vec<TaskId>,
}

impl ProjectSchedule {
    pub(crate) fn empty(project_id: ProjectId, project_start: Timestamp) -> Self {
        Self {
            project_id,
            project_start,
            project_finish: project_start,
            annotations: HashMap::new(),
            critical: BTreeSet::new(),
            order: Vec::new(),
        }
    }

    pub fn annotation(&self, task_id: &str) -> Option<&ScheduleAnnotation> {
        self.annotations.get(task_id)
    }

    pub fn is_critical(&self, task_id: &str) -> bool {
        self.critical.contains(task_id)
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Critical task ids, predecessors first.
    pub fn critical_chain(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter(|id| self.critical.contains(id.as_str()))
            .map(|id| id.as_str())
            .collect()
    }
}
