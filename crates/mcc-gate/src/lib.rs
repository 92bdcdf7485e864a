//! # mcc-gate
//!
//! Quality-gate evaluation and the gated proposal workflow.
//!
//! A proposal moves through:
//!
//! ```text
//! Received → Evaluated → Rejected
//!                      → Persisted → SyncedRemote
//!                                  → LocalOnly
//! ```
//!
//! The local write always happens before the remote call, and a remote
//! failure never undoes it. See [`workflow::ProposalWorkflow`].

pub mod error;
pub mod evaluator;
pub mod sink;
pub mod workflow;

pub use error::WorkflowError;
pub use evaluator::{Candidate, CheckRegistry, GateEvaluator, RuleCheck};
pub use sink::ProposalSink;
pub use workflow::{PreviewOutcome, ProposalWorkflow, SubmitOutcome, SubmitProposal};
