//! Errors produced while loading [`MccConfig`](crate::MccConfig).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `MCC_*` variable could not be read or merged.
    #[error("failed to load mcc configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A loaded value is outside its accepted range.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
