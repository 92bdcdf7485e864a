//! Gate evaluation against a project's blocking rules.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use mcc_core::Violation;
use mcc_core::entities::Rule;
use mcc_core::enums::RuleCategory;
use mcc_db::error::DatabaseError;
use mcc_db::service::ControlService;
use serde_json::Value;

/// The change being evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub summary_md: String,
    pub patch_manifest_json: Value,
    pub linked_features: Vec<i64>,
}

impl Default for Candidate {
    fn default() -> Self {
        Self {
            summary_md: String::new(),
            patch_manifest_json: Value::Object(serde_json::Map::new()),
            linked_features: Vec::new(),
        }
    }
}

/// An automated check for one rule category.
///
/// Returns `Some(message)` when the candidate violates `rule`.
pub trait RuleCheck: Send + Sync {
    fn check(&self, rule: &Rule, candidate: &Candidate) -> Option<String>;
}

impl<F> RuleCheck for F
where
    F: Fn(&Rule, &Candidate) -> Option<String> + Send + Sync,
{
    fn check(&self, rule: &Rule, candidate: &Candidate) -> Option<String> {
        self(rule, candidate)
    }
}

/// Checkers keyed by rule category. Empty by default.
#[derive(Clone, Default)]
pub struct CheckRegistry {
    checks: HashMap<RuleCategory, Arc<dyn RuleCheck>>,
}

impl CheckRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `check` for `category`, replacing any previous checker.
    pub fn register(&mut self, category: RuleCategory, check: impl RuleCheck + 'static) {
        self.checks.insert(category, Arc::new(check));
    }

    #[must_use]
    pub fn get(&self, category: RuleCategory) -> Option<&dyn RuleCheck> {
        self.checks.get(&category).map(Arc::as_ref)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Registered categories, in category order.
    #[must_use]
    pub fn categories(&self) -> Vec<RuleCategory> {
        let mut categories: Vec<_> = self.checks.keys().copied().collect();
        categories.sort();
        categories
    }
}

impl fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("categories", &self.categories())
            .finish()
    }
}

/// Evaluates candidates against a project's enabled `FAIL` rules.
///
/// # Unknown checks never block
///
/// A blocking rule whose category has no registered [`RuleCheck`] is skipped.
/// With the default empty registry every candidate passes, so a rule only
/// starts blocking once a checker for its category is registered on purpose.
#[derive(Debug, Clone, Default)]
pub struct GateEvaluator {
    registry: CheckRegistry,
}

impl GateEvaluator {
    #[must_use]
    pub const fn new(registry: CheckRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub const fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    /// Evaluate `candidate` against the blocking rules of `project_id`.
    ///
    /// Returns at most one violation per rule, in rule creation order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the rules cannot be loaded.
    pub async fn evaluate(
        &self,
        service: &ControlService,
        project_id: i64,
        candidate: &Candidate,
    ) -> Result<Vec<Violation>, DatabaseError> {
        let rules = service.list_blocking_rules(project_id).await?;
        let violations = self.evaluate_rules(&rules, candidate);
        tracing::debug!(
            project_id,
            rules = rules.len(),
            violations = violations.len(),
            "gates evaluated"
        );
        Ok(violations)
    }

    /// Evaluate `candidate` against an already-loaded rule list.
    ///
    /// Rules that are disabled or only `WARN` are ignored.
    #[must_use]
    pub fn evaluate_rules(&self, rules: &[Rule], candidate: &Candidate) -> Vec<Violation> {
        let mut violations = Vec::new();
        for rule in rules.iter().filter(|r| r.is_blocking()) {
            let Some(check) = self.registry.get(rule.category) else {
                tracing::debug!(
                    rule_id = rule.id,
                    category = %rule.category,
                    "no checker registered, rule does not block"
                );
                continue;
            };
            if let Some(message) = check.check(rule, candidate) {
                violations.push(Violation::for_rule(rule, message));
            }
        }
        violations
    }
}
