// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{PlanFile, RawPlanFile};
use crate::errors::{PlanError, Result};
use crate::model::{Project, Task};
use crate::source::PlanSource;

/// Read and deserialise a plan file without semantic validation.
///
/// I/O and TOML errors are reported as `DataUnavailable`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawPlanFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        PlanError::DataUnavailable(format!("cannot read {}: {e}", path.display()))
    })?;

    let plan: RawPlanFile = toml::from_str(&contents).map_err(|e| {
        PlanError::DataUnavailable(format!("cannot parse {}: {e}", path.display()))
    })?;

    debug!(
        path = %path.display(),
        projects = plan.project.len(),
        tasks = plan.task.len(),
        "plan file read"
    );
    Ok(plan)
}

/// Read a plan file and validate it.
///
/// This is the entry point the binary uses. Besides TOML syntax it checks
/// settings, progress bounds, id uniqueness, date ranges, dangling
/// dependencies and same-project cycles.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<PlanFile> {
    let raw = load_from_path(&path)?;
    PlanFile::try_from(raw)
}

impl PlanSource for PlanFile {
    fn load_projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.clone())
    }

    fn load_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }
}
