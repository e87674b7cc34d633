// src/config/mod.rs

//! Plan file loading and validation.
//!
//! - [`model`]: the TOML-backed data model.
//! - [`loader`]: read from disk; also makes a [`PlanFile`] a
//!   [`PlanSource`](crate::source::PlanSource).
//! - [`validate`]: `RawPlanFile` -> `PlanFile`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{PlanFile, RawPlanFile, Settings};
