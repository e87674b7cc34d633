// src/graph/validate.rs

//! Structural checks for a batch of projects and tasks handed to the store.

use std::collections::{HashMap, HashSet};

use petgraph::algo::{has_path_connecting, toposort};
use petgraph::graphmap::DiGraphMap;

use crate::errors::{EntityKind, PlanError, Result};
use crate::model::{Project, Task, Timestamp};

/// Validate a full set of projects and tasks before they enter the store.
///
/// Checks, in order:
/// - unique project ids and unique task ids,
/// - `start <= end` for every project and task (`start == due` for milestones),
/// - every task's owning project exists,
/// - every dependency id names an existing task,
/// - the same-project dependency graph is acyclic.
pub fn validate_parts(projects: &[Project], tasks: &[Task]) -> Result<()> {
    let mut project_ids: HashSet<&str> = HashSet::new();
    for project in projects {
        if !project_ids.insert(project.id.as_str()) {
            return Err(PlanError::DuplicateId {
                kind: EntityKind::Project,
                id: project.id.clone(),
            });
        }
        ensure_range(project.start_date, project.end_date)?;
    }

    let mut task_ids: HashSet<&str> = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.id.as_str()) {
            return Err(PlanError::DuplicateId {
                kind: EntityKind::Task,
                id: task.id.clone(),
            });
        }
        ensure_task_range(task)?;
        if !project_ids.contains(task.project_id.as_str()) {
            return Err(PlanError::project_not_found(task.project_id.clone()));
        }
    }

    for task in tasks {
        for dep in task.dependencies.iter() {
            if !task_ids.contains(dep.as_str()) {
                return Err(PlanError::task_not_found(dep.clone()));
            }
        }
    }

    ensure_acyclic(tasks)
}

pub(crate) fn ensure_range(start: Timestamp, end: Timestamp) -> Result<()> {
    if start > end {
        return Err(PlanError::InvalidRange { start, end });
    }
    Ok(())
}

pub(crate) fn ensure_task_range(task: &Task) -> Result<()> {
    ensure_range(task.start_date, task.due_date)?;
    if task.is_milestone && task.start_date != task.due_date {
        return Err(PlanError::InvalidRange {
            start: task.start_date,
            end: task.due_date,
        });
    }
    Ok(())
}

/// Reject any cycle formed by same-project dependency edges.
///
/// Edge direction is predecessor -> task. Cross-project edges are kept in
/// storage but never take part in scheduling, so they are left out here.
fn ensure_acyclic(tasks: &[Task]) -> Result<()> {
    let project_of: HashMap<&str, &str> = tasks
        .iter()
        .map(|t| (t.id.as_str(), t.project_id.as_str()))
        .collect();

    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for task in tasks {
        graph.add_node(task.id.as_str());
    }
    for task in tasks {
        for dep in task.dependencies.iter() {
            if project_of.get(dep.as_str()) == Some(&task.project_id.as_str()) {
                graph.add_edge(dep.as_str(), task.id.as_str(), ());
            }
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let node = cycle.node_id();
            // Name the edge that closes the loop: a predecessor reachable from `node`.
            let predecessor = graph
                .neighbors_directed(node, petgraph::Direction::Incoming)
                .find(|&p| has_path_connecting(&graph, node, p, None))
                .unwrap_or(node);
            Err(PlanError::CyclicDependency {
                task: node.to_string(),
                predecessor: predecessor.to_string(),
            })
        }
    }
}
