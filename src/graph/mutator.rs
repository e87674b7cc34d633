// src/graph/mutator.rs

//! The only write path into the [`TaskGraphStore`].
//!
//! Every operation validates against a copy of the affected record and
//! commits it in one step, so a rejected call leaves the store untouched.
//! Dependent tasks are never shifted: a date change only alters the slack
//! reported by the next critical path pass.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::errors::{EntityKind, PlanError, Result};
use crate::graph::store::TaskGraphStore;
use crate::graph::validate::{ensure_range, ensure_task_range};
use crate::model::{Project, Task, TaskId, Timestamp};
use crate::types::TaskStatus;

/// Applies user edits to a store.
pub struct ScheduleMutator<'a> {
    store: &'a mut TaskGraphStore,
}

impl<'a> ScheduleMutator<'a> {
    pub fn new(store: &'a mut TaskGraphStore) -> Self {
        Self { store }
    }

    /// Move or resize a task.
    ///
    /// Fails with `InvalidRange` if `start > end`, or if a milestone would
    /// get a non-zero length.
    pub fn set_dates(&mut self, task_id: &str, start: Timestamp, end: Timestamp) -> Result<()> {
        let mut task = self.store.get_task(task_id)?.clone();
        task.start_date = start;
        task.due_date = end;
        ensure_task_range(&task)?;

        debug!(task = %task_id, %start, %end, "dates updated");
        self.store.commit_task(task);
        Ok(())
    }

    /// Set declared progress, clamped to `0..=100`.
    pub fn set_progress(&mut self, task_id: &str, percent: i32) -> Result<()> {
        let mut task = self.store.get_task(task_id)?.clone();
        task.progress = clamp_percent(percent);

        debug!(task = %task_id, progress = task.progress, "progress updated");
        self.store.commit_task(task);
        Ok(())
    }

    pub fn set_status(&mut self, task_id: &str, status: TaskStatus) -> Result<()> {
        let mut task = self.store.get_task(task_id)?.clone();
        task.status = status;

        debug!(task = %task_id, %status, "status updated");
        self.store.commit_task(task);
        Ok(())
    }

    /// Make `predecessor_id` a predecessor of `task_id`.
    ///
    /// - Unknown ids: `NotFound`.
    /// - Self edge, or an edge that closes a loop inside the project:
    ///   `CyclicDependency`.
    /// - Cross-project edges are stored as-is; the critical path pass ignores
    ///   them.
    /// - Adding an edge that already exists is a no-op.
    pub fn add_dependency(&mut self, task_id: &str, predecessor_id: &str) -> Result<()> {
        let task = self.store.get_task(task_id)?;
        let predecessor = self.store.get_task(predecessor_id)?;

        if task.depends_on(predecessor_id) {
            return Ok(());
        }

        let cyclic = task_id == predecessor_id
            || (task.project_id == predecessor.project_id
                && self.reaches(predecessor_id, task_id));
        if cyclic {
            warn!(
                task = %task_id,
                predecessor = %predecessor_id,
                "rejecting dependency: would create a cycle"
            );
            return Err(PlanError::CyclicDependency {
                task: task_id.to_string(),
                predecessor: predecessor_id.to_string(),
            });
        }

        if task.project_id != predecessor.project_id {
            info!(
                task = %task_id,
                predecessor = %predecessor_id,
                "cross-project dependency stored; excluded from critical path"
            );
        }

        let mut task = task.clone();
        task.dependencies.insert(predecessor_id.to_string());
        self.store.commit_task(task);
        Ok(())
    }

    /// Drop a dependency edge. Absent edges are a no-op.
    pub fn remove_dependency(&mut self, task_id: &str, predecessor_id: &str) -> Result<()> {
        let task = self.store.get_task(task_id)?;
        if !task.depends_on(predecessor_id) {
            return Ok(());
        }

        let mut task = task.clone();
        task.dependencies.remove(predecessor_id);
        debug!(task = %task_id, predecessor = %predecessor_id, "dependency removed");
        self.store.commit_task(task);
        Ok(())
    }

    /// Flip a project's collapsed flag. View state only; returns the new flag.
    pub fn toggle_collapse(&mut self, project_id: &str) -> Result<bool> {
        self.store.get_project(project_id)?;
        let collapsed = self.store.toggle_collapsed(project_id);
        debug!(project = %project_id, collapsed, "collapse toggled");
        Ok(collapsed)
    }

    /// Move or resize a project. Tasks keep their own dates.
    pub fn set_project_dates(
        &mut self,
        project_id: &str,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<()> {
        ensure_range(start, end)?;
        let mut project = self.store.get_project(project_id)?.clone();
        project.start_date = start;
        project.end_date = end;

        debug!(project = %project_id, %start, %end, "project dates updated");
        self.store.commit_project(project);
        Ok(())
    }

    pub fn set_project_progress(&mut self, project_id: &str, percent: i32) -> Result<()> {
        let mut project = self.store.get_project(project_id)?.clone();
        project.progress = clamp_percent(percent);
        self.store.commit_project(project);
        Ok(())
    }

    /// Register a newly created project.
    pub fn add_project(&mut self, project: Project) -> Result<()> {
        if self.store.contains_project(&project.id) {
            return Err(PlanError::DuplicateId {
                kind: EntityKind::Project,
                id: project.id,
            });
        }
        ensure_range(project.start_date, project.end_date)?;

        let mut project = project;
        project.progress = project.progress.min(100);
        info!(project = %project.id, "project added");
        self.store.insert_project(project);
        Ok(())
    }

    /// Register a newly created task.
    ///
    /// Its owning project and every dependency must already exist. Nothing
    /// can depend on a task that is not stored yet, so a new task cannot
    /// close a cycle.
    pub fn add_task(&mut self, task: Task) -> Result<()> {
        if self.store.contains_task(&task.id) {
            return Err(PlanError::DuplicateId {
                kind: EntityKind::Task,
                id: task.id,
            });
        }
        self.store.get_project(&task.project_id)?;
        ensure_task_range(&task)?;
        if task.dependencies.contains(&task.id) {
            return Err(PlanError::CyclicDependency {
                task: task.id.clone(),
                predecessor: task.id,
            });
        }
        if let Some(missing) = task
            .dependencies
            .iter()
            .find(|d| !self.store.contains_task(d))
        {
            return Err(PlanError::task_not_found(missing.clone()));
        }

        let mut task = task;
        task.progress = task.progress.min(100);
        info!(task = %task.id, project = %task.project_id, "task added");
        self.store.insert_task(task);
        Ok(())
    }

    /// Delete a task; other tasks forget it as a predecessor.
    pub fn remove_task(&mut self, task_id: &str) -> Result<Task> {
        let removed = self
            .store
            .remove_task(task_id)
            .ok_or_else(|| PlanError::task_not_found(task_id))?;
        info!(task = %task_id, "task removed");
        Ok(removed)
    }

    /// Whether `to` is reachable from `from` by following same-project
    /// dependency edges (i.e. `from` already waits on `to`, transitively).
    fn reaches(&self, from: &str, to: &str) -> bool {
        let project = match self.store.get_task(from) {
            Ok(t) => t.project_id.clone(),
            Err(_) => return false,
        };

        let mut stack: Vec<TaskId> = vec![from.to_string()];
        let mut visited: HashSet<TaskId> = HashSet::new();

        while let Some(id) = stack.pop() {
            if id == to {
                return true;
            }
            if !visited.insert(id.clone()) {
                continue;
            }
            if let Ok(task) = self.store.get_task(&id) {
                for dep in task.dependencies.iter() {
                    let same_project = self
                        .store
                        .get_task(dep)
                        .map(|d| d.project_id == project)
                        .unwrap_or(false);
                    if same_project && !visited.contains(dep) {
                        stack.push(dep.clone());
                    }
                }
            }
        }

        false
    }
}

fn clamp_percent(percent: i32) -> u8 {
    percent.clamp(0, 100) as u8
}
