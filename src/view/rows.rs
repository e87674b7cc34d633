// src/view/rows.rs

//! Plain row types handed to the presentation layer.

use std::fmt;

use crate::model::{ProjectId, Span, TaskId, Timestamp};
use crate::types::{TaskPriority, TaskStatus};

/// How the UI should paint a task bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowColor {
    /// Highlighted as part of the critical path.
    Critical,
    /// Regular colour keyed by workflow stage.
    Status(TaskStatus),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRow {
    pub project_id: ProjectId,
    pub code: String,
    pub name: String,
    pub start_date: Timestamp,
    /// Where the UI draws the delivery line.
    pub delivery_date: Timestamp,
    pub progress: u8,
    pub collapsed: bool,
    /// Task rows that pass the filters, whether or not they are emitted.
    pub visible_tasks: usize,
    /// Critical path finish, when the critical path is shown.
    pub scheduled_finish: Option<Timestamp>,
    /// The critical path finishes after the declared delivery date.
    pub finish_overrun: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub task_id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub start_date: Timestamp,
    pub due_date: Timestamp,
    pub progress: u8,
    pub assignee: Option<String>,
    pub is_milestone: bool,
    pub color: RowColor,
    pub is_critical: bool,
    pub slack: Option<Span>,
    /// Due before "today" and not done.
    pub is_overdue: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Project(ProjectRow),
    Task(TaskRow),
}

impl Row {
    pub fn project_id(&self) -> &str {
        match self {
            Row::Project(p) => &p.project_id,
            Row::Task(t) => &t.project_id,
        }
    }

    pub fn as_task(&self) -> Option<&TaskRow> {
        match self {
            Row::Task(t) => Some(t),
            Row::Project(_) => None,
        }
    }

    pub fn as_project(&self) -> Option<&ProjectRow> {
        match self {
            Row::Project(p) => Some(p),
            Row::Task(_) => None,
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Row::Project(p) => {
                let fold = if p.collapsed { "+" } else { "-" };
                write!(
                    f,
                    "{fold} [{}] {} ({} .. {}, {}%, {} tasks)",
                    p.code,
                    p.name,
                    p.start_date.format("%Y-%m-%d"),
                    p.delivery_date.format("%Y-%m-%d"),
                    p.progress,
                    p.visible_tasks
                )?;
                if let Some(finish) = p.scheduled_finish {
                    write!(f, " finish {}", finish.format("%Y-%m-%d"))?;
                }
                if p.finish_overrun {
                    f.write_str(" LATE")?;
                }
                Ok(())
            }
            Row::Task(t) => {
                let marker = match (t.is_milestone, t.is_critical) {
                    (true, _) => "◆",
                    (false, true) => "*",
                    (false, false) => " ",
                };
                write!(
                    f,
                    "    {marker} {:<12} {} .. {}  {:>3}%  {:<11} {}",
                    t.task_id,
                    t.start_date.format("%Y-%m-%d"),
                    t.due_date.format("%Y-%m-%d"),
                    t.progress,
                    t.status,
                    t.title
                )?;
                if let Some(slack) = t.slack {
                    write!(f, "  slack {}d", slack.num_days())?;
                }
                if t.is_overdue {
                    f.write_str("  overdue")?;
                }
                Ok(())
            }
        }
    }
}
