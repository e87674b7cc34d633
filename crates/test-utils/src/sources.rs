use planline::errors::{PlanError, Result};
use planline::model::{Project, Task};
use planline::source::PlanSource;

/// In-memory source that hands back fixed data.
pub struct StaticSource {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
}

impl StaticSource {
    pub fn new(projects: Vec<Project>, tasks: Vec<Task>) -> Self {
        Self { projects, tasks }
    }
}

impl PlanSource for StaticSource {
    fn load_projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.clone())
    }

    fn load_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }
}

/// Source whose backing store is down.
pub struct UnavailableSource;

impl PlanSource for UnavailableSource {
    fn load_projects(&self) -> Result<Vec<Project>> {
        Err(PlanError::DataUnavailable("backend offline".to_string()))
    }

    fn load_tasks(&self) -> Result<Vec<Task>> {
        Err(PlanError::DataUnavailable("backend offline".to_string()))
    }
}
