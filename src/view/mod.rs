// src/view/mod.rs

//! Row projection for the planner view.
//!
//! Stateless: given the store, the UI flags and (optionally) fresh critical
//! path results, [`project_rows`] returns the same rows every time.

pub mod filter;
pub mod projection;
pub mod rows;

pub use filter::Filters;
pub use projection::{ViewOptions, project_rows};
pub use rows::{ProjectRow, Row, RowColor, TaskRow};
