// src/model/mod.rs

//! Plain data model: projects, tasks and the time types they use.
//!
//! - [`project`] holds the [`Project`] summary record.
//! - [`task`] holds [`Task`] and its dependency set.
//! - [`dates`] parses and prints the timestamps used in plan files.

pub mod dates;
pub mod project;
pub mod task;

pub use project::Project;
pub use task::Task;

/// Point in time used for every start/end/due date.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Signed span between two [`Timestamp`]s.
pub type Span = chrono::TimeDelta;

/// Canonical project identifier.
pub type ProjectId = String;

/// Canonical task identifier.
pub type TaskId = String;
