//! # mcc-core
//!
//! Core types and error types for the MCP Control Center.
//!
//! This crate provides the foundational types shared across all crates:
//! - Entity structs for projects and their child records
//! - Status, category, and gate enums
//! - The transient `Violation` produced by gate evaluation
//! - Report and document response types
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
pub mod violation;

pub use violation::Violation;
