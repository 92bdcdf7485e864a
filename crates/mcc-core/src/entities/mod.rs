//! Entity structs for all control-center domain objects.
//!
//! Each entity maps to a table in the libSQL database (see `mcc-db`
//! migrations). All structs derive `Serialize`, `Deserialize`, and `JsonSchema`
//! for JSON roundtrip and schema validation. Every child record is scoped to a
//! project through `project_id`.

mod adr;
mod agent_update;
mod feature;
mod project;
mod proposal;
mod refactor;
mod rule;
mod specification;

pub use adr::Adr;
pub use agent_update::AgentUpdate;
pub use feature::Feature;
pub use project::Project;
pub use proposal::Proposal;
pub use refactor::RefactorPlan;
pub use rule::Rule;
pub use specification::Specification;
