//! Status, category, and severity enums for control-center entities.
//!
//! Category-like enums serialize as `SCREAMING_SNAKE_CASE` (`IN_PROGRESS`),
//! lifecycle statuses for plans, ADRs, and proposals serialize in
//! `PascalCase` (`Proposed`, `Submitted`). The same strings are stored in SQL,
//! so `as_str()` must stay in sync with the serde representation.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

/// Parse an enum from its stored string form (the serde representation).
///
/// # Errors
///
/// Returns [`CoreError::InvalidEnumValue`] if `value` names no variant of `T`.
pub fn from_wire<T: DeserializeOwned>(value: &str) -> Result<T, CoreError> {
    serde_json::from_value(serde_json::Value::String(value.to_string())).map_err(|_| {
        let full = std::any::type_name::<T>();
        CoreError::InvalidEnumValue {
            type_name: full.rsplit("::").next().unwrap_or(full),
            value: value.to_string(),
        }
    })
}

// ---------------------------------------------------------------------------
// FeatureStatus
// ---------------------------------------------------------------------------

/// Planning status of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureStatus {
    #[default]
    Draft,
    Planned,
    InProgress,
    Done,
}

impl FeatureStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Planned => "PLANNED",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SpecificationKind
// ---------------------------------------------------------------------------

/// Kind of specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecificationKind {
    #[default]
    Api,
    Ui,
    Data,
    Security,
}

impl SpecificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "API",
            Self::Ui => "UI",
            Self::Data => "DATA",
            Self::Security => "SECURITY",
        }
    }
}

impl fmt::Display for SpecificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RefactorScope / RiskLevel / RefactorStatus
// ---------------------------------------------------------------------------

/// How much of the codebase a refactor plan touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefactorScope {
    #[default]
    File,
    Package,
    Service,
}

impl RefactorScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "FILE",
            Self::Package => "PACKAGE",
            Self::Service => "SERVICE",
        }
    }
}

impl fmt::Display for RefactorScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a refactor plan.
///
/// ```text
/// Proposed → Approved → InProgress → Done
///          → Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum RefactorStatus {
    #[default]
    Proposed,
    Approved,
    InProgress,
    Done,
    Rejected,
}

impl RefactorStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Proposed => "Proposed",
            Self::Approved => "Approved",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for RefactorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AdrStatus
// ---------------------------------------------------------------------------

/// Status of an architecture decision record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum AdrStatus {
    #[default]
    Proposed,
    Accepted,
    Deprecated,
    Superseded,
}

impl AdrStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Proposed => "Proposed",
            Self::Accepted => "Accepted",
            Self::Deprecated => "Deprecated",
            Self::Superseded => "Superseded",
        }
    }
}

impl fmt::Display for AdrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RuleCategory / RuleGate
// ---------------------------------------------------------------------------

/// Which quality concern a rule polices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleCategory {
    #[default]
    Style,
    Security,
    Soc,
    Testing,
    Perf,
}

impl RuleCategory {
    pub const ALL: [Self; 5] = [
        Self::Style,
        Self::Security,
        Self::Soc,
        Self::Testing,
        Self::Perf,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Style => "STYLE",
            Self::Security => "SECURITY",
            Self::Soc => "SOC",
            Self::Testing => "TESTING",
            Self::Perf => "PERF",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gate severity of a rule.
///
/// Only `Fail` rules can block a proposal; `Warn` rules are informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleGate {
    #[default]
    Warn,
    Fail,
}

impl RuleGate {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warn => "WARN",
            Self::Fail => "FAIL",
        }
    }

    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl fmt::Display for RuleGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UpdateSource
// ---------------------------------------------------------------------------

/// Origin of an agent update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateSource {
    #[default]
    Agent,
    Mcp,
}

impl UpdateSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agent => "AGENT",
            Self::Mcp => "MCP",
        }
    }
}

impl fmt::Display for UpdateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ProposalStatus
// ---------------------------------------------------------------------------

/// Status of a proposal.
///
/// ```text
/// Draft → Submitted
/// ```
///
/// Proposals created through the gated workflow start at `Submitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum ProposalStatus {
    #[default]
    Draft,
    Submitted,
}

impl ProposalStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Submitted],
            Self::Submitted => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
