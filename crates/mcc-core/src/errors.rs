//! Errors raised while converting raw values into core types.
//!
//! Storage and transport errors live in their own crates; they wrap
//! [`CoreError`] when a value read from a row or request does not fit.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The string matches no variant of the named enum.
    #[error("invalid {type_name} value: '{value}'")]
    InvalidEnumValue {
        type_name: &'static str,
        value: String,
    },
}
