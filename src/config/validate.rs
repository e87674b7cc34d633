// src/config/validate.rs

use crate::config::model::{PlanFile, RawPlanFile};
use crate::errors::{PlanError, Result};
use crate::graph::validate_parts;

impl TryFrom<RawPlanFile> for PlanFile {
    type Error = PlanError;

    fn try_from(raw: RawPlanFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_plan(&raw)?;
        Ok(PlanFile::new_unchecked(raw.settings, raw.project, raw.task))
    }
}

fn validate_raw_plan(plan: &RawPlanFile) -> Result<()> {
    ensure_has_projects(plan)?;
    validate_settings(plan)?;
    validate_progress(plan)?;
    validate_parts(&plan.project, &plan.task).map_err(|e| unavailable(e.to_string()))?;
    Ok(())
}

fn ensure_has_projects(plan: &RawPlanFile) -> Result<()> {
    if plan.project.is_empty() {
        return Err(unavailable(
            "plan must contain at least one [[project]] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_settings(plan: &RawPlanFile) -> Result<()> {
    if plan.settings.slack_tolerance_hours == 0 {
        return Err(unavailable(
            "[settings].slack_tolerance_hours must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_progress(plan: &RawPlanFile) -> Result<()> {
    for project in plan.project.iter() {
        if project.progress > 100 {
            return Err(unavailable(format!(
                "project '{}' has progress {} (must be 0..=100)",
                project.id, project.progress
            )));
        }
    }
    for task in plan.task.iter() {
        if task.progress > 100 {
            return Err(unavailable(format!(
                "task '{}' has progress {} (must be 0..=100)",
                task.id, task.progress
            )));
        }
    }
    Ok(())
}

fn unavailable(msg: String) -> PlanError {
    PlanError::DataUnavailable(msg)
}
