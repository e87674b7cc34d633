// src/view/filter.rs

use std::collections::BTreeSet;

use crate::model::Task;
use crate::types::{TaskPriority, TaskStatus};

/// Active row filters. An empty field filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    /// Case-insensitive substring matched against title and assignee.
    pub query: String,
    pub statuses: BTreeSet<TaskStatus>,
    pub priorities: BTreeSet<TaskPriority>,
}

impl Filters {
    /// Text search only.
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.statuses.insert(status);
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priorities.insert(priority);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.statuses.is_empty() && self.priorities.is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&task.status) {
            return false;
        }
        if !self.priorities.is_empty() && !self.priorities.contains(&task.priority) {
            return false;
        }

        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        task.title.to_lowercase().contains(&needle)
            || task
                .assignee
                .as_deref()
                .is_some_and(|a| a.to_lowercase().contains(&needle))
    }
}
