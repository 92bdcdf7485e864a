//! Repository modules implementing CRUD operations for all control-center entities.
//!
//! Each module adds methods to `ControlService` via `impl ControlService` blocks.

pub mod adr;
pub mod agent_update;
pub mod feature;
pub mod project;
pub mod proposal;
pub mod refactor;
pub mod rule;
pub mod specification;
