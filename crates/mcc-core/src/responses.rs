//! Response types returned as JSON by the HTTP API and the `mcc` CLI.
//!
//! Report builders are pure: they take already-loaded entities and shape them,
//! so they can be shared by the server handlers and `mcc run-gates`.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Violation;
use crate::entities::{Project, Rule, Specification};
use crate::enums::{RuleCategory, RuleGate, SpecificationKind};

/// Longest policy excerpt shown in the quality report.
const POLICY_EXCERPT_CHARS: usize = 100;

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Short view of a rule used inside reports.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RuleSummary {
    pub name: String,
    pub gate: RuleGate,
    pub policy: String,
}

/// Status of an external quality tool that has not been run by the server.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ToolGateStatus {
    pub status: String,
    pub message: String,
}

/// Response from `GET /api/reports/quality`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QualityReport {
    pub project_id: i64,
    pub project_name: String,
    pub total_rules: usize,
    pub rules_by_category: BTreeMap<RuleCategory, Vec<RuleSummary>>,
    pub quality_gates: BTreeMap<String, ToolGateStatus>,
    pub recommendations: Vec<String>,
}

impl QualityReport {
    /// Group the project's enabled rules by category.
    #[must_use]
    pub fn build(project: &Project, enabled_rules: &[Rule]) -> Self {
        let mut rules_by_category: BTreeMap<RuleCategory, Vec<RuleSummary>> = BTreeMap::new();
        for rule in enabled_rules {
            rules_by_category
                .entry(rule.category)
                .or_default()
                .push(RuleSummary {
                    name: rule.name.clone(),
                    gate: rule.gate,
                    policy: policy_excerpt(&rule.policy_md),
                });
        }

        let quality_gates = [
            ("ruff", "Run 'ruff check .' to analyze code style"),
            ("mypy", "Run 'mypy .' to check type annotations"),
            ("pytest", "Run 'pytest' to execute tests"),
            ("bandit", "Run 'bandit -r .' to check for security issues"),
        ]
        .into_iter()
        .map(|(tool, message)| {
            (
                tool.to_string(),
                ToolGateStatus {
                    status: "not_run".to_string(),
                    message: message.to_string(),
                },
            )
        })
        .collect();

        Self {
            project_id: project.id,
            project_name: project.name.clone(),
            total_rules: enabled_rules.len(),
            rules_by_category,
            quality_gates,
            recommendations: vec![
                "Set up CI/CD to run quality checks automatically".to_string(),
                "Increase test coverage to ≥85%".to_string(),
                "Fix all FAIL gate violations before merging".to_string(),
            ],
        }
    }
}

/// Truncate a policy to [`POLICY_EXCERPT_CHARS`] characters, appending `...`.
#[must_use]
pub fn policy_excerpt(policy: &str) -> String {
    if policy.chars().count() > POLICY_EXCERPT_CHARS {
        let head: String = policy.chars().take(POLICY_EXCERPT_CHARS).collect();
        format!("{head}...")
    } else {
        policy.to_string()
    }
}

/// Placeholder for import-graph analysis, which the server does not run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SocAnalysis {
    pub analysis_available: bool,
    pub message: String,
    pub repo_url: String,
}

/// Response from `GET /api/reports/soc`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SocReport {
    pub project_id: i64,
    pub project_name: String,
    pub soc_rules_count: usize,
    pub soc_rules: Vec<RuleSummary>,
    pub analysis: Option<SocAnalysis>,
    pub recommendations: Vec<String>,
}

impl SocReport {
    /// Build the report from the project's enabled SOC rules.
    #[must_use]
    pub fn build(project: &Project, soc_rules: &[Rule]) -> Self {
        let analysis = project.repo_url.as_ref().map(|url| SocAnalysis {
            analysis_available: false,
            message: "Project analysis requires local repository access".to_string(),
            repo_url: url.clone(),
        });

        Self {
            project_id: project.id,
            project_name: project.name.clone(),
            soc_rules_count: soc_rules.len(),
            soc_rules: soc_rules
                .iter()
                .map(|rule| RuleSummary {
                    name: rule.name.clone(),
                    gate: rule.gate,
                    policy: rule.policy_md.clone(),
                })
                .collect(),
            analysis,
            recommendations: vec![
                "Define layer architecture (UI -> Service -> Domain -> Infrastructure)".to_string(),
                "Check for circular dependencies regularly".to_string(),
                "Add an import-graph checker for SOC rules to make them blocking".to_string(),
            ],
        }
    }
}

/// Response from `GET /api/reports/violations` and `mcc run-gates`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ViolationsReport {
    pub project_id: i64,
    pub project_name: String,
    pub total_violations: usize,
    pub violations: Vec<Violation>,
    /// `passed` or `failed`.
    pub status: String,
}

impl ViolationsReport {
    #[must_use]
    pub fn build(project: &Project, violations: Vec<Violation>) -> Self {
        let status = if violations.is_empty() { "passed" } else { "failed" };
        Self {
            project_id: project.id,
            project_name: project.name.clone(),
            total_violations: violations.len(),
            violations,
            status: status.to_string(),
        }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Listing entry for an ingested document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentSummary {
    pub id: i64,
    pub project_id: i64,
    pub kind: SpecificationKind,
    pub version: String,
    pub content_length: usize,
    pub links_count: usize,
}

impl From<&Specification> for DocumentSummary {
    fn from(spec: &Specification) -> Self {
        Self {
            id: spec.id,
            project_id: spec.project_id,
            kind: spec.kind,
            version: spec.version.clone(),
            content_length: spec.doc_md.len(),
            links_count: spec.links.len(),
        }
    }
}

/// Full content view of an ingested document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentDetail {
    pub id: i64,
    pub project_id: i64,
    pub kind: SpecificationKind,
    pub version: String,
    pub content: String,
    pub links: Vec<String>,
}

impl From<Specification> for DocumentDetail {
    fn from(spec: Specification) -> Self {
        Self {
            id: spec.id,
            project_id: spec.project_id,
            kind: spec.kind,
            version: spec.version,
            content: spec.doc_md,
            links: spec.links,
        }
    }
}

/// Response from single-document ingestion endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IngestResponse {
    pub status: String,
    pub message: String,
    pub spec_id: i64,
    pub project_id: i64,
    pub kind: SpecificationKind,
    pub version: String,
    pub size_bytes: usize,
}

/// One successfully ingested item in a bulk ingest.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BulkIngestItem {
    pub spec_id: i64,
    pub project_id: i64,
    pub kind: SpecificationKind,
}

/// One rejected item in a bulk ingest.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BulkIngestError {
    pub doc: serde_json::Value,
    pub error: String,
}

/// Response from `POST /api/documents/bulk-ingest`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BulkIngestResponse {
    /// `success` when every item was ingested, `partial` otherwise.
    pub status: String,
    pub ingested: usize,
    pub results: Vec<BulkIngestItem>,
    pub errors: Vec<BulkIngestError>,
    pub total_attempted: usize,
}

// ---------------------------------------------------------------------------
// GitHub sync
// ---------------------------------------------------------------------------

/// Response from `POST /api/github/sync`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GithubSyncResponse {
    pub status: String,
    /// Existing projects refreshed from their repository.
    pub synced: usize,
    /// Projects created for repositories not seen before.
    pub created: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn project(repo_url: Option<&str>) -> Project {
        Project {
            id: 7,
            name: "Demo".into(),
            repo_url: repo_url.map(String::from),
            language_matrix: BTreeMap::new(),
            tags: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn rule(name: &str, category: RuleCategory, gate: RuleGate, policy: &str) -> Rule {
        Rule {
            id: 1,
            project_id: 7,
            name: name.into(),
            category,
            policy_md: policy.into(),
            gate,
            enabled: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn policy_excerpt_truncates_long_policies() {
        let long = "x".repeat(150);
        let excerpt = policy_excerpt(&long);
        assert_eq!(excerpt.len(), 103);
        assert!(excerpt.ends_with("..."));
        assert_eq!(policy_excerpt("short"), "short");
        assert_eq!(policy_excerpt(&"y".repeat(100)), "y".repeat(100));
    }

    #[test]
    fn quality_report_groups_by_category() {
        let rules = vec![
            rule("No cycles", RuleCategory::Soc, RuleGate::Fail, "no cycles"),
            rule("Coverage", RuleCategory::Testing, RuleGate::Warn, "80%"),
            rule("Layering", RuleCategory::Soc, RuleGate::Warn, "layers"),
        ];
        let report = QualityReport::build(&project(None), &rules);

        assert_eq!(report.total_rules, 3);
        assert_eq!(report.rules_by_category[&RuleCategory::Soc].len(), 2);
        assert_eq!(report.rules_by_category[&RuleCategory::Testing].len(), 1);
        assert_eq!(report.quality_gates["ruff"].status, "not_run");

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["rules_by_category"]["SOC"].is_array());
    }

    #[test]
    fn soc_report_analysis_only_with_repo() {
        let without = SocReport::build(&project(None), &[]);
        assert!(without.analysis.is_none());

        let with = SocReport::build(&project(Some("https://github.com/acme/demo")), &[]);
        let analysis = with.analysis.unwrap();
        assert!(!analysis.analysis_available);
        assert_eq!(analysis.repo_url, "https://github.com/acme/demo");
    }

    #[test]
    fn violations_report_status() {
        let passed = ViolationsReport::build(&project(None), vec![]);
        assert_eq!(passed.status, "passed");
        assert!(passed.passed());

        let failing = rule("No cycles", RuleCategory::Soc, RuleGate::Fail, "");
        let failed =
            ViolationsReport::build(&project(None), vec![Violation::for_rule(&failing, "cycle")]);
        assert_eq!(failed.status, "failed");
        assert_eq!(failed.total_violations, 1);
    }
}
