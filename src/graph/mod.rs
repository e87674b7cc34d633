// src/graph/mod.rs

//! Task graph storage and the mutation protocol around it.
//!
//! - [`store`] is the read side: id lookups, per-project task lists and
//!   derived successor sets.
//! - [`mutator`] is the only write path and enforces the invariants.
//! - [`adjacency`] builds the per-project scheduling graph used by the
//!   critical path engine.
//! - [`validate`] checks whole batches of loaded data.

pub mod adjacency;
pub mod mutator;
pub mod store;
pub mod validate;

pub use adjacency::ProjectGraph;
pub use mutator::ScheduleMutator;
pub use store::TaskGraphStore;
pub use validate::validate_parts;
