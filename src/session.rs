// src/session.rs

//! Session facade: the one object a host UI talks to.
//!
//! It owns the store and the view flags, routes every [`UiIntent`] to the
//! mutator or the view options, and answers rendering queries by running
//! the critical path engine and the projection on demand. Every call runs
//! to completion before the next is accepted; there is no background work.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info, warn};

use crate::cpm::{CpmOptions, ProjectSchedule, ScheduleAnnotation, compute_all, compute_project};
use crate::errors::{PlanError, Result};
use crate::graph::{ScheduleMutator, TaskGraphStore};
use crate::model::{ProjectId, TaskId, Timestamp};
use crate::source::PlanSource;
use crate::types::TaskStatus;
use crate::view::{Filters, Row, ViewOptions, project_rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyEdit {
    Add,
    Remove,
}

/// Events flowing in from the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiIntent {
    /// A bar was dragged or resized.
    DateChange {
        task: TaskId,
        start: Timestamp,
        end: Timestamp,
    },
    /// The progress handle was dragged.
    ProgressChange { task: TaskId, percent: i32 },
    /// A card moved between workflow columns.
    StatusChange { task: TaskId, status: TaskStatus },
    DependencyEdit {
        task: TaskId,
        predecessor: TaskId,
        edit: DependencyEdit,
    },
    ProjectSelectionChange(Vec<ProjectId>),
    CollapseToggle(ProjectId),
    FilterChange(Filters),
    ShowMilestones(bool),
    ShowCriticalPath(bool),
}

/// What became stale after an intent was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// Schedule data of this project changed: recompute its critical path
    /// and re-project rows.
    Schedule(ProjectId),
    /// Only the row list changed.
    Rows,
}

#[derive(Debug, Clone)]
pub struct PlannerSession {
    store: TaskGraphStore,
    view: ViewOptions,
    cpm: CpmOptions,
}

impl PlannerSession {
    /// Wrap an already-built store. All projects start out selected.
    pub fn new(store: TaskGraphStore) -> Self {
        let view = ViewOptions {
            selection: store.projects().map(|p| p.id.clone()).collect(),
            ..ViewOptions::default()
        };
        Self {
            store,
            view,
            cpm: CpmOptions::default(),
        }
    }

    /// Load initial data from a collaborator.
    ///
    /// Any failure, whether the source could not deliver or the delivered
    /// data breaks an invariant, is reported as `DataUnavailable`.
    pub fn load(source: &impl PlanSource) -> Result<Self> {
        let loaded = source
            .load_projects()
            .and_then(|projects| Ok((projects, source.load_tasks()?)))
            .and_then(|(projects, tasks)| TaskGraphStore::from_parts(projects, tasks));

        match loaded {
            Ok(store) => {
                info!(
                    projects = store.projects().count(),
                    tasks = store.tasks().count(),
                    "planner session loaded"
                );
                Ok(Self::new(store))
            }
            Err(PlanError::DataUnavailable(msg)) => Err(PlanError::DataUnavailable(msg)),
            Err(other) => {
                warn!(error = %other, "loaded plan data rejected");
                Err(PlanError::DataUnavailable(other.to_string()))
            }
        }
    }

    pub fn with_cpm_options(mut self, cpm: CpmOptions) -> Self {
        self.cpm = cpm;
        self
    }

    pub fn with_today(mut self, today: Timestamp) -> Self {
        self.view.today = Some(today);
        self
    }

    pub fn store(&self) -> &TaskGraphStore {
        &self.store
    }

    pub fn view_options(&self) -> &ViewOptions {
        &self.view
    }

    /// Direct write access for edits that have no UI intent (creating or
    /// deleting records).
    pub fn mutator(&mut self) -> ScheduleMutator<'_> {
        ScheduleMutator::new(&mut self.store)
    }

    /// Apply one UI intent.
    ///
    /// A rejected intent returns the typed error and leaves both the store
    /// and the view flags as they were.
    pub fn handle(&mut self, intent: UiIntent) -> Result<Refresh> {
        debug!(?intent, "handling ui intent");
        match intent {
            UiIntent::DateChange { task, start, end } => {
                self.mutator().set_dates(&task, start, end)?;
                self.schedule_refresh(&task)
            }
            UiIntent::ProgressChange { task, percent } => {
                self.mutator().set_progress(&task, percent)?;
                Ok(Refresh::Rows)
            }
            UiIntent::StatusChange { task, status } => {
                self.mutator().set_status(&task, status)?;
                Ok(Refresh::Rows)
            }
            UiIntent::DependencyEdit {
                task,
                predecessor,
                edit,
            } => {
                match edit {
                    DependencyEdit::Add => self.mutator().add_dependency(&task, &predecessor)?,
                    DependencyEdit::Remove => {
                        self.mutator().remove_dependency(&task, &predecessor)?
                    }
                }
                self.schedule_refresh(&task)
            }
            UiIntent::ProjectSelectionChange(ids) => {
                if let Some(missing) = ids.iter().find(|id| !self.store.contains_project(id)) {
                    return Err(PlanError::project_not_found(missing.clone()));
                }
                self.view.selection = ids;
                Ok(Refresh::Rows)
            }
            UiIntent::CollapseToggle(project) => {
                self.mutator().toggle_collapse(&project)?;
                Ok(Refresh::Rows)
            }
            UiIntent::FilterChange(filters) => {
                self.view.filters = filters;
                Ok(Refresh::Rows)
            }
            UiIntent::ShowMilestones(show) => {
                self.view.show_milestones = show;
                Ok(Refresh::Rows)
            }
            UiIntent::ShowCriticalPath(show) => {
                self.view.show_critical_path = show;
                Ok(Refresh::Rows)
            }
        }
    }

    /// Fresh critical path pass for one project.
    pub fn schedule(&self, project_id: &str) -> Result<ProjectSchedule> {
        compute_project(&self.store, project_id, &self.cpm)
    }

    pub fn annotations(&self, project_id: &str) -> Result<HashMap<TaskId, ScheduleAnnotation>> {
        Ok(self.schedule(project_id)?.annotations)
    }

    pub fn critical_task_ids(&self, project_id: &str) -> Result<BTreeSet<TaskId>> {
        Ok(self.schedule(project_id)?.critical)
    }

    /// Rows for the current selection, filters and flags.
    pub fn rows(&self) -> Result<Vec<Row>> {
        let schedules = if self.view.show_critical_path {
            let selected = self
                .view
                .selection
                .iter()
                .filter(|id| self.store.contains_project(id))
                .map(|id| id.as_str());
            compute_all(&self.store, selected, &self.cpm)?
        } else {
            HashMap::new()
        };
        Ok(project_rows(&self.store, &self.view, &schedules))
    }

    fn schedule_refresh(&self, task_id: &str) -> Result<Refresh> {
        let task = self.store.get_task(task_id)?;
        Ok(Refresh::Schedule(task.project_id.clone()))
    }
}
