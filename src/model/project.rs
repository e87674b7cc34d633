// src/model/project.rs

use serde::{Deserialize, Serialize};

use super::{ProjectId, Timestamp, dates};

/// A project as handed to the store by the data-loading collaborator.
///
/// `progress` is whatever the user declared; it is never derived from the
/// project's tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    /// Short display label (e.g. `"WEB"`).
    pub code: String,
    pub name: String,
    /// Anchor for the critical path pass.
    #[serde(with = "dates")]
    pub start_date: Timestamp,
    /// Declared delivery date.
    #[serde(with = "dates")]
    pub end_date: Timestamp,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub manager: String,
    /// Member identifiers, in display order.
    #[serde(default)]
    pub team: Vec<String>,
    #[serde(default)]
    pub budget: f64,
}

impl Project {
    pub fn new(
        id: impl Into<ProjectId>,
        code: impl Into<String>,
        name: impl Into<String>,
        start_date: Timestamp,
        end_date: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            start_date,
            end_date,
            progress: 0,
            manager: String::new(),
            team: Vec::new(),
            budget: 0.0,
        }
    }
}
