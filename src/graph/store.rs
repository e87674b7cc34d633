// src/graph/store.rs

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::errors::{PlanError, Result};
use crate::graph::validate::validate_parts;
use crate::model::{Project, ProjectId, Task, TaskId};

/// Single source of truth for the projects and tasks of one session.
///
/// Lookups by id are O(1) on average. Successors are not stored on tasks;
/// they are derived on first request and cached until the next committed
/// mutation.
///
/// The store is `Sync`, so readers on several threads can share it behind
/// an `RwLock` or a plain `&`. Writes go through
/// [`ScheduleMutator`](crate::graph::ScheduleMutator) only, and the host
/// must serialise them against reads.
#[derive(Debug, Clone, Default)]
pub struct TaskGraphStore {
    projects: Vec<Project>,
    project_index: HashMap<ProjectId, usize>,
    tasks: Vec<Task>,
    task_index: HashMap<TaskId, usize>,
    /// Projects whose task rows are folded away in the view.
    collapsed: HashSet<ProjectId>,
    /// Bumped on every committed change to schedule data.
    revision: u64,
    successors: OnceLock<HashMap<TaskId, Vec<TaskId>>>,
}

impl TaskGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded data, validating every structural invariant.
    ///
    /// Declared progress above 100 is clamped.
    pub fn from_parts(projects: Vec<Project>, tasks: Vec<Task>) -> Result<Self> {
        validate_parts(&projects, &tasks)?;

        let mut store = Self::new();
        for mut project in projects {
            if project.progress > 100 {
                warn!(project = %project.id, progress = project.progress, "clamping project progress to 100");
                project.progress = 100;
            }
            store.push_project(project);
        }
        for mut task in tasks {
            if task.progress > 100 {
                warn!(task = %task.id, progress = task.progress, "clamping task progress to 100");
                task.progress = 100;
            }
            store.push_task(task);
        }

        debug!(
            projects = store.projects.len(),
            tasks = store.tasks.len(),
            "task graph store loaded"
        );
        Ok(store)
    }

    pub fn get_task(&self, id: &str) -> Result<&Task> {
        self.task_index
            .get(id)
            .map(|&i| &self.tasks[i])
            .ok_or_else(|| PlanError::task_not_found(id))
    }

    pub fn get_project(&self, id: &str) -> Result<&Project> {
        self.project_index
            .get(id)
            .map(|&i| &self.projects[i])
            .ok_or_else(|| PlanError::project_not_found(id))
    }

    pub fn contains_task(&self, id: &str) -> bool {
        self.task_index.contains_key(id)
    }

    pub fn contains_project(&self, id: &str) -> bool {
        self.project_index.contains_key(id)
    }

    /// All projects, in insertion order.
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    /// All tasks, in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Tasks owned by `project_id`, in insertion order.
    ///
    /// An unknown project simply yields nothing.
    pub fn tasks_of<'a>(&'a self, project_id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.project_id == project_id)
    }

    /// Existing tasks listed in `task_id`'s dependencies.
    pub fn predecessors_of(&self, task_id: &str) -> Vec<&Task> {
        match self.get_task(task_id) {
            Ok(task) => task
                .dependencies
                .iter()
                .filter_map(|dep| self.get_task(dep).ok())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Tasks that list `task_id` among their dependencies, in insertion order.
    pub fn successors_of(&self, task_id: &str) -> Vec<&Task> {
        self.successor_map()
            .get(task_id)
            .map(|ids| ids.iter().filter_map(|id| self.get_task(id).ok()).collect())
            .unwrap_or_default()
    }

    pub fn is_collapsed(&self, project_id: &str) -> bool {
        self.collapsed.contains(project_id)
    }

    /// Counter of committed schedule mutations; unchanged by UI-only flags.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn successor_map(&self) -> &HashMap<TaskId, Vec<TaskId>> {
        self.successors.get_or_init(|| {
            let mut map: HashMap<TaskId, Vec<TaskId>> = HashMap::new();
            for task in self.tasks.iter() {
                for dep in task.dependencies.iter() {
                    map.entry(dep.clone()).or_default().push(task.id.clone());
                }
            }
            map
        })
    }

    // ---- write path, reserved for the mutator ----

    fn push_project(&mut self, project: Project) {
        self.project_index
            .insert(project.id.clone(), self.projects.len());
        self.projects.push(project);
    }

    fn push_task(&mut self, task: Task) {
        self.task_index.insert(task.id.clone(), self.tasks.len());
        self.tasks.push(task);
    }

    fn invalidate(&mut self) {
        self.successors = OnceLock::new();
        self.revision += 1;
    }

    pub(crate) fn insert_project(&mut self, project: Project) {
        self.push_project(project);
        self.invalidate();
    }

    pub(crate) fn insert_task(&mut self, task: Task) {
        self.push_task(task);
        self.invalidate();
    }

    /// Replace a stored task with an already-validated copy.
    pub(crate) fn commit_task(&mut self, task: Task) {
        if let Some(&i) = self.task_index.get(&task.id) {
            self.tasks[i] = task;
            self.invalidate();
        }
    }

    /// Replace a stored project with an already-validated copy.
    pub(crate) fn commit_project(&mut self, project: Project) {
        if let Some(&i) = self.project_index.get(&project.id) {
            self.projects[i] = project;
            self.invalidate();
        }
    }

    /// Remove a task and strip its id from every other task's dependencies.
    pub(crate) fn remove_task(&mut self, task_id: &str) -> Option<Task> {
        let idx = self.task_index.remove(task_id)?;
        let removed = self.tasks.remove(idx);

        for task in self.tasks.iter_mut() {
            task.dependencies.remove(task_id);
        }
        self.task_index = self
            .tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();

        self.invalidate();
        Some(removed)
    }

    /// Flip the collapse flag; returns the new state.
    pub(crate) fn toggle_collapsed(&mut self, project_id: &str) -> bool {
        if self.collapsed.remove(project_id) {
            false
        } else {
            self.collapsed.insert(project_id.to_string());
            true
        }
    }
}
