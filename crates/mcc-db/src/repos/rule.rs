//! Rule repository, including the blocking-rule query used by gate evaluation.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use mcc_core::entities::Rule;
use mcc_core::enums::{RuleCategory, RuleGate};

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum, where_clause};
use crate::service::ControlService;
use crate::updates::SetClauses;
use crate::updates::rule::RuleUpdate;

const SELECT_COLS: &str =
    "id, project_id, name, category, policy_md, gate, enabled, created_at, updated_at";

const fn default_enabled() -> bool {
    true
}

/// Fields accepted when creating a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRule {
    pub project_id: i64,
    pub name: String,
    #[serde(default)]
    pub category: RuleCategory,
    #[serde(default)]
    pub policy_md: String,
    #[serde(default)]
    pub gate: RuleGate,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl NewRule {
    #[must_use]
    pub fn new(project_id: i64, name: impl Into<String>, category: RuleCategory, gate: RuleGate) -> Self {
        Self {
            project_id,
            name: name.into(),
            category,
            policy_md: String::new(),
            gate,
            enabled: default_enabled(),
        }
    }
}

/// Optional filters for [`ControlService::list_rules`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleFilter {
    pub project_id: Option<i64>,
    pub category: Option<RuleCategory>,
    pub enabled: Option<bool>,
    pub gate: Option<RuleGate>,
}

fn row_to_rule(row: &libsql::Row) -> Result<Rule, DatabaseError> {
    Ok(Rule {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        category: parse_enum(&row.get::<String>(3)?)?,
        policy_md: row.get(4)?,
        gate: parse_enum(&row.get::<String>(5)?)?,
        enabled: row.get::<i64>(6)? != 0,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl ControlService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the project does not exist.
    pub async fn create_rule(&self, new: NewRule) -> Result<Rule, DatabaseError> {
        self.get_project(new.project_id).await?;

        let now = Utc::now();
        let id = self
            .db()
            .insert_returning_id(
                "INSERT INTO rules (project_id, name, category, policy_md, gate, enabled, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id",
                libsql::params![
                    new.project_id,
                    new.name.as_str(),
                    new.category.as_str(),
                    new.policy_md.as_str(),
                    new.gate.as_str(),
                    i64::from(new.enabled),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(Rule {
            id,
            project_id: new.project_id,
            name: new.name,
            category: new.category,
            policy_md: new.policy_md,
            gate: new.gate,
            enabled: new.enabled,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no rule has this id.
    pub async fn get_rule(&self, id: i64) -> Result<Rule, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM rules WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_rule(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_rules(&self, filter: &RuleFilter) -> Result<Vec<Rule>, DatabaseError> {
        let mut conds = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(project_id) = filter.project_id {
            params.push(project_id.into());
            conds.push(format!("project_id = ?{}", params.len()));
        }
        if let Some(category) = filter.category {
            params.push(category.as_str().into());
            conds.push(format!("category = ?{}", params.len()));
        }
        if let Some(enabled) = filter.enabled {
            params.push(i64::from(enabled).into());
            conds.push(format!("enabled = ?{}", params.len()));
        }
        if let Some(gate) = filter.gate {
            params.push(gate.as_str().into());
            conds.push(format!("gate = ?{}", params.len()));
        }

        let sql = format!(
            "SELECT {SELECT_COLS} FROM rules{} ORDER BY id",
            where_clause(&conds)
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut rules = Vec::new();
        while let Some(row) = rows.next().await? {
            rules.push(row_to_rule(&row)?);
        }
        Ok(rules)
    }

    /// Enabled `FAIL` rules of a project, in creation order.
    ///
    /// These are the only rules that can block a proposal.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_blocking_rules(&self, project_id: i64) -> Result<Vec<Rule>, DatabaseError> {
        self.list_rules(&RuleFilter {
            project_id: Some(project_id),
            enabled: Some(true),
            gate: Some(RuleGate::Fail),
            category: None,
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no rule has this id.
    pub async fn update_rule(&self, id: i64, update: RuleUpdate) -> Result<Rule, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(name) = update.name {
            sets.push("name", name);
        }
        if let Some(category) = update.category {
            sets.push("category", category.as_str());
        }
        if let Some(policy_md) = update.policy_md {
            sets.push("policy_md", policy_md);
        }
        if let Some(gate) = update.gate {
            sets.push("gate", gate.as_str());
        }
        if let Some(enabled) = update.enabled {
            sets.push("enabled", i64::from(enabled));
        }

        if sets.is_empty() {
            return self.get_rule(id).await;
        }

        let (sql, params) = sets.into_sql("rules", id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_rule(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{create_test_project, test_service};
    use crate::updates::rule::RuleUpdateBuilder;
    use rstest::rstest;

    #[tokio::test]
    async fn blocking_rules_are_enabled_fail_in_order() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "p").await;
        let other = create_test_project(&svc, "other").await;

        let first = svc
            .create_rule(NewRule::new(project.id, "first", RuleCategory::Soc, RuleGate::Fail))
            .await
            .unwrap();
        svc.create_rule(NewRule::new(project.id, "warn", RuleCategory::Style, RuleGate::Warn))
            .await
            .unwrap();
        svc.create_rule(NewRule {
            enabled: false,
            ..NewRule::new(project.id, "disabled", RuleCategory::Perf, RuleGate::Fail)
        })
        .await
        .unwrap();
        let last = svc
            .create_rule(NewRule::new(project.id, "last", RuleCategory::Security, RuleGate::Fail))
            .await
            .unwrap();
        svc.create_rule(NewRule::new(other.id, "elsewhere", RuleCategory::Soc, RuleGate::Fail))
            .await
            .unwrap();

        let ids: Vec<_> = svc
            .list_blocking_rules(project.id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![first.id, last.id]);
    }

    #[rstest]
    #[case(RuleFilter { category: Some(RuleCategory::Soc), ..Default::default() }, 1)]
    #[case(RuleFilter { enabled: Some(false), ..Default::default() }, 1)]
    #[case(RuleFilter { enabled: Some(true), ..Default::default() }, 2)]
    #[case(RuleFilter { gate: Some(RuleGate::Warn), ..Default::default() }, 1)]
    #[case(RuleFilter::default(), 3)]
    #[tokio::test]
    async fn list_rules_filters(#[case] filter: RuleFilter, #[case] expected: usize) {
        let svc = test_service().await;
        let project = create_test_project(&svc, "p").await;
        svc.create_rule(NewRule::new(project.id, "soc", RuleCategory::Soc, RuleGate::Fail))
            .await
            .unwrap();
        svc.create_rule(NewRule::new(project.id, "style", RuleCategory::Style, RuleGate::Warn))
            .await
            .unwrap();
        svc.create_rule(NewRule {
            enabled: false,
            ..NewRule::new(project.id, "perf", RuleCategory::Perf, RuleGate::Fail)
        })
        .await
        .unwrap();

        let rules = svc.list_rules(&filter).await.unwrap();
        assert_eq!(rules.len(), expected);
    }

    #[tokio::test]
    async fn disabling_rule_removes_it_from_blocking_set() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "p").await;
        let rule = svc
            .create_rule(NewRule::new(project.id, "soc", RuleCategory::Soc, RuleGate::Fail))
            .await
            .unwrap();

        let updated = svc
            .update_rule(rule.id, RuleUpdateBuilder::new().enabled(false).build())
            .await
            .unwrap();
        assert!(!updated.enabled);
        assert!(!updated.is_blocking());
        assert!(svc.list_blocking_rules(project.id).await.unwrap().is_empty());
    }
}
