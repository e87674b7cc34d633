// src/cpm/mod.rs

//! Critical Path Method.
//!
//! [`engine`] runs the forward/backward passes for one project at a time and
//! returns a [`ProjectSchedule`]; [`annotation`] holds the output types.
//! Nothing here keeps state between calls: every pass is a pure function
//! of the tasks, their dependencies and the project's start date.

pub mod annotation;
pub mod engine;

pub use annotation::{ProjectSchedule, ScheduleAnnotation};
pub use engine::{CpmOptions, compute_all, compute_project, schedule_tasks};
