// src/source.rs

//! Seam for the data-loading collaborator.

use crate::errors::Result;
use crate::model::{Project, Task};

/// Supplies the initial projects and tasks, once, at startup.
///
/// Implemented by the plan-file loader and by in-memory fakes in tests.
/// Whatever goes wrong here is reported to the session as
/// [`PlanError::DataUnavailable`](crate::errors::PlanError::DataUnavailable).
pub trait PlanSource {
    fn load_projects(&self) -> Result<Vec<Project>>;
    fn load_tasks(&self) -> Result<Vec<Task>>;
}
