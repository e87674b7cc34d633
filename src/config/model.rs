// src/config/model.rs

use chrono::TimeDelta;
use serde::Deserialize;

use crate::cpm::CpmOptions;
use crate::model::{Project, Task};

/// Plan file as read from TOML, before validation.
///
/// ```toml
/// [settings]
/// slack_tolerance_hours = 24
///
/// [[project]]
/// id = "web"
/// code = "WEB"
/// name = "Website"
/// start_date = "2024-01-01"
/// end_date = "2024-03-01"
///
/// [[task]]
/// id = "design"
/// project_id = "web"
/// title = "Design"
/// start_date = "2024-01-01"
/// due_date = "2024-01-10"
/// dependencies = []
/// ```
///
/// All sections are optional at the TOML level; validation decides what is
/// actually required.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlanFile {
    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub project: Vec<Project>,

    #[serde(default)]
    pub task: Vec<Task>,
}

/// Validated plan file.
///
/// Construct with `PlanFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct PlanFile {
    pub settings: Settings,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
}

impl PlanFile {
    pub(crate) fn new_unchecked(settings: Settings, projects: Vec<Project>, tasks: Vec<Task>) -> Self {
        Self {
            settings,
            projects,
            tasks,
        }
    }
}

/// `[settings]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Slack below this many hours counts as critical.
    #[serde(default = "default_slack_tolerance_hours")]
    pub slack_tolerance_hours: u32,
}

fn default_slack_tolerance_hours() -> u32 {
    24
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            slack_tolerance_hours: default_slack_tolerance_hours(),
        }
    }
}

impl Settings {
    pub fn cpm_options(&self) -> CpmOptions {
        CpmOptions {
            slack_tolerance: TimeDelta::hours(i64::from(self.slack_tolerance_hours)),
        }
    }
}
