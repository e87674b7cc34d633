// src/cpm/engine.rs

//! Classical two-pass critical path computation.
//!
//! Forward pass: a task with no in-graph predecessor starts at
//! `max(project_start, declared start)`; otherwise at the latest
//! earliest-finish of its predecessors. Backward pass mirrors it from the
//! project finish. Each task keeps its declared duration throughout.

use std::collections::{BTreeSet, HashMap};

use chrono::TimeDelta;
use tracing::{debug, warn};

use crate::cpm::annotation::{ProjectSchedule, ScheduleAnnotation};
use crate::errors::{PlanError, Result};
use crate::graph::{ProjectGraph, TaskGraphStore};
use crate::model::{ProjectId, Span, Task, Timestamp};

/// Knobs for a critical path pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpmOptions {
    /// A task is critical when `|slack|` is strictly below this.
    ///
    /// Defaults to one day so that day-granularity dates don't produce false
    /// negatives from rounding.
    pub slack_tolerance: Span,
}

impl Default for CpmOptions {
    fn default() -> Self {
        Self {
            slack_tolerance: TimeDelta::days(1),
        }
    }
}

/// Per-task values from the forward pass.
#[derive(Debug, Clone, Copy)]
struct EarlyTimes {
    start: Timestamp,
    finish: Timestamp,
}

/// Per-task values from the backward pass.
#[derive(Debug, Clone, Copy)]
struct LateTimes {
    start: Timestamp,
    finish: Timestamp,
}

/// Compute the schedule for one project in the store.
pub fn compute_project(
    store: &TaskGraphStore,
    project_id: &str,
    options: &CpmOptions,
) -> Result<ProjectSchedule> {
    let project = store.get_project(project_id)?;
    schedule_tasks(
        project.id.clone(),
        project.start_date,
        store.tasks_of(project_id),
        options,
    )
}

/// Compute independent schedules for each listed project.
pub fn compute_all<'a>(
    store: &TaskGraphStore,
    project_ids: impl IntoIterator<Item = &'a str>,
    options: &CpmOptions,
) -> Result<HashMap<ProjectId, ProjectSchedule>> {
    let mut out = HashMap::new();
    for id in project_ids {
        let schedule = compute_project(store, id, options)?;
        out.insert(id.to_string(), schedule);
    }
    Ok(out)
}

/// Pure critical path pass over one project's tasks.
///
/// `tasks` should be the project's tasks; milestones are skipped and
/// dependencies pointing outside the set are ignored for this pass.
pub fn schedule_tasks<'a>(
    project_id: ProjectId,
    project_start: Timestamp,
    tasks: impl IntoIterator<Item = &'a Task>,
    options: &CpmOptions,
) -> Result<ProjectSchedule> {
    let working: Vec<&Task> = tasks.into_iter().filter(|t| !t.is_milestone).collect();

    if working.is_empty() {
        debug!(project = %project_id, "no working tasks; empty schedule");
        return Ok(ProjectSchedule::empty(project_id, project_start));
    }

    let by_id: HashMap<&str, &Task> = working.iter().map(|t| (t.id.as_str(), *t)).collect();
    let graph = ProjectGraph::from_tasks(working.iter().copied());
    let topo = graph.topological_order()?;

    // Forward pass.
    let mut early: HashMap<&str, EarlyTimes> = HashMap::with_capacity(topo.len());
    for &id in topo.iter() {
        let task = lookup(&by_id, id)?;
        let preds = graph.dependencies_of(id);

        let start = if preds.is_empty() {
            project_start.max(task.start_date)
        } else {
            let mut latest: Option<Timestamp> = None;
            for p in preds {
                let finish = early
                    .get(p.as_str())
                    .ok_or_else(|| invariant(format!("predecessor '{p}' of '{id}' not yet scheduled")))?
                    .finish;
                latest = Some(latest.map_or(finish, |l| l.max(finish)));
            }
            latest.unwrap_or(project_start)
        };

        let finish = start
            .checked_add_signed(task.duration())
            .ok_or_else(|| invariant(format!("earliest finish of '{id}' is out of range")))?;
        early.insert(id, EarlyTimes { start, finish });
    }

    let project_finish = early
        .values()
        .map(|e| e.finish)
        .max()
        .unwrap_or(project_start);

    // Backward pass.
    let mut late: HashMap<&str, LateTimes> = HashMap::with_capacity(topo.len());
    for &id in topo.iter().rev() {
        let task = lookup(&by_id, id)?;
        let succs = graph.dependents_of(id);

        let finish = if succs.is_empty() {
            project_finish
        } else {
            let mut earliest: Option<Timestamp> = None;
            for s in succs {
                let start = late
                    .get(s.as_str())
                    .ok_or_else(|| invariant(format!("successor '{s}' of '{id}' not yet scheduled")))?
                    .start;
                earliest = Some(earliest.map_or(start, |e| e.min(start)));
            }
            earliest.unwrap_or(project_finish)
        };

        let start = finish
            .checked_sub_signed(task.duration())
            .ok_or_else(|| invariant(format!("latest start of '{id}' is out of range")))?;
        late.insert(id, LateTimes { start, finish });
    }

    let mut annotations = HashMap::with_capacity(topo.len());
    let mut critical = BTreeSet::new();
    for &id in topo.iter() {
        let (e, l) = match (early.get(id), late.get(id)) {
            (Some(e), Some(l)) => (*e, *l),
            _ => return Err(invariant(format!("task '{id}' missing from a pass"))),
        };
        let slack = l.start - e.start;
        let is_critical = slack.abs() < options.slack_tolerance;
        if is_critical {
            critical.insert(id.to_string());
        }
        annotations.insert(
            id.to_string(),
            ScheduleAnnotation {
                earliest_start: e.start,
                earliest_finish: e.finish,
                latest_start: l.start,
                latest_finish: l.finish,
                slack,
                is_critical,
            },
        );
    }

    debug!(
        project = %project_id,
        tasks = annotations.len(),
        critical = critical.len(),
        %project_finish,
        "critical path computed"
    );

    Ok(ProjectSchedule {
        project_id,
        project_start,
        project_finish,
        annotations,
        critical,
        order: topo.into_iter().map(str::to_string).collect(),
    })
}

fn lookup<'t>(by_id: &HashMap<&str, &'t Task>, id: &str) -> Result<&'t Task> {
    by_id
        .get(id)
        .copied()
        .ok_or_else(|| invariant(format!("task '{id}' missing from graph input")))
}

fn invariant(msg: String) -> PlanError {
    warn!(reason = %msg, "aborting critical path computation");
    PlanError::ScheduleComputationFailed(msg)
}
