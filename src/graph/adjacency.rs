// src/graph/adjacency.rs

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{PlanError, Result};
use crate::model::{Task, TaskId};

/// Internal node structure: stores immediate deps and dependents.
#[derive(Debug, Clone)]
struct GraphNode {
    /// Direct predecessors that are themselves part of this graph.
    deps: Vec<TaskId>,
    /// Direct successors that are part of this graph.
    dependents: Vec<TaskId>,
}

/// Scheduling graph for one project.
///
/// Only working tasks take part: milestones are left out, and so is any
/// dependency whose target is not in the given task set (another project,
/// or a milestone). Those edges stay in storage; they just don't count here.
#[derive(Debug, Clone)]
pub struct ProjectGraph {
    /// Task ids in the order they were supplied.
    order: Vec<TaskId>,
    nodes: HashMap<TaskId, GraphNode>,
}

impl ProjectGraph {
    /// Build the graph from one project's tasks.
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let working: Vec<&Task> = tasks.into_iter().filter(|t| !t.is_milestone).collect();

        let mut order = Vec::with_capacity(working.len());
        let mut nodes: HashMap<TaskId, GraphNode> = HashMap::with_capacity(working.len());

        // First pass: register every node so the dep filter below can see it.
        for task in working.iter() {
            order.push(task.id.clone());
            nodes.insert(
                task.id.clone(),
                GraphNode {
                    deps: Vec::new(),
                    dependents: Vec::new(),
                },
            );
        }

        // Second pass: keep in-graph deps and mirror them as dependents.
        for task in working.iter() {
            let deps: Vec<TaskId> = task
                .dependencies
                .iter()
                .filter(|d| nodes.contains_key(d.as_str()))
                .cloned()
                .collect();

            for dep in deps.iter() {
                if let Some(dep_node) = nodes.get_mut(dep) {
                    dep_node.dependents.push(task.id.clone());
                }
            }
            if let Some(node) = nodes.get_mut(&task.id) {
                node.deps = deps;
            }
        }

        Self { order, nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Task ids in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    pub fn dependencies_of(&self, id: &str) -> &[TaskId] {
        self.nodes
            .get(id)
            .map(|n| n.deps.as_slice())
            .unwrap_or(&[])
    }

    pub fn dependents_of(&self, id: &str) -> &[TaskId] {
        self.nodes
            .get(id)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Predecessors-first ordering of every node.
    ///
    /// The mutator never admits a cycle, so a failure here is an internal
    /// invariant violation and is reported as such.
    pub fn topological_order(&self) -> Result<Vec<&str>> {
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
        for id in self.order.iter() {
            graph.add_node(id.as_str());
        }
        for id in self.order.iter() {
            for dep in self.dependencies_of(id) {
                graph.add_edge(dep.as_str(), id.as_str(), ());
            }
        }

        toposort(&graph, None).map_err(|cycle| {
            PlanError::ScheduleComputationFailed(format!(
                "dependency cycle reached the scheduler at task '{}'",
                cycle.node_id()
            ))
        })
    }
}
