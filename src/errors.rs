// src/errors.rs

//! Crate-wide error taxonomy.
//!
//! Every core operation returns a typed [`Result`] so the host UI can decide
//! whether to snap a dragged bar back, show a toast, or retry a load.

use thiserror::Error;

use crate::model::Timestamp;

/// What kind of entity an id referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Project,
    Task,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Project => f.write_str("project"),
            EntityKind::Task => f.write_str("task"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} id already exists: {id}")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: Timestamp, end: Timestamp },

    #[error("dependency '{task}' -> '{predecessor}' would create a cycle")]
    CyclicDependency { task: String, predecessor: String },

    #[error("plan data unavailable: {0}")]
    DataUnavailable(String),

    #[error("schedule computation failed: {0}")]
    ScheduleComputationFailed(String),
}

impl PlanError {
    pub fn task_not_found(id: impl Into<String>) -> Self {
        PlanError::NotFound {
            kind: EntityKind::Task,
            id: id.into(),
        }
    }

    pub fn project_not_found(id: impl Into<String>) -> Self {
        PlanError::NotFound {
            kind: EntityKind::Project,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
