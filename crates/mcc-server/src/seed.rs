//! Demo data for a fresh database.

use std::collections::BTreeMap;

use mcc_core::enums::{AdrStatus, FeatureStatus, RuleCategory, RuleGate};
use mcc_db::error::DatabaseError;
use mcc_db::repos::adr::NewAdr;
use mcc_db::repos::feature::NewFeature;
use mcc_db::repos::project::NewProject;
use mcc_db::repos::rule::NewRule;
use mcc_db::service::ControlService;
use serde::Serialize;

/// Ids of the rows inserted by [`seed_demo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub project_id: i64,
    pub feature_ids: Vec<i64>,
    pub rule_ids: Vec<i64>,
    pub adr_ids: Vec<i64>,
}

/// Insert a demo project with three features, two rules and one accepted ADR.
///
/// # Errors
///
/// Returns `DatabaseError` if any insert fails.
pub async fn seed_demo(service: &ControlService) -> Result<SeedSummary, DatabaseError> {
    let project = service
        .create_project(NewProject {
            name: "Demo Project".to_string(),
            repo_url: Some("https://github.com/example/demo".to_string()),
            language_matrix: BTreeMap::from([
                ("python".to_string(), "3.12".to_string()),
                ("typescript".to_string(), "5.4".to_string()),
            ]),
            tags: vec!["demo".to_string(), "mcp".to_string()],
        })
        .await?;

    let features = [
        (
            "User Authentication",
            "Login, logout and session handling.",
            FeatureStatus::InProgress,
            1,
            vec!["auth", "security"],
        ),
        (
            "Dashboard",
            "Overview of project health and recent agent activity.",
            FeatureStatus::Planned,
            2,
            vec!["ui"],
        ),
        (
            "API Rate Limiting",
            "Throttle clients that exceed their quota.",
            FeatureStatus::Draft,
            3,
            vec!["api", "performance"],
        ),
    ];
    let mut feature_ids = Vec::with_capacity(features.len());
    for (title, description, status, priority, labels) in features {
        let feature = service
            .create_feature(NewFeature {
                description_md: description.to_string(),
                status,
                priority,
                labels: labels.into_iter().map(str::to_string).collect(),
                ..NewFeature::new(project.id, title)
            })
            .await?;
        feature_ids.push(feature.id);
    }

    let rules = [
        NewRule {
            policy_md: "Modules must not import each other in a cycle.".to_string(),
            ..NewRule::new(
                project.id,
                "No Circular Dependencies",
                RuleCategory::Soc,
                RuleGate::Fail,
            )
        },
        NewRule {
            policy_md: "Line coverage should stay above 80%.".to_string(),
            ..NewRule::new(
                project.id,
                "Test Coverage > 80%",
                RuleCategory::Testing,
                RuleGate::Warn,
            )
        },
    ];
    let mut rule_ids = Vec::with_capacity(rules.len());
    for rule in rules {
        rule_ids.push(service.create_rule(rule).await?.id);
    }

    let adr = service
        .create_adr(NewAdr {
            project_id: project.id,
            title: "Use libSQL for local storage".to_string(),
            context_md: "The control center needs an embedded store with no server process."
                .to_string(),
            decision_md: "Store all entities in a single libSQL database file.".to_string(),
            consequences_md: "Backups are a file copy; concurrent writers are limited."
                .to_string(),
            status: AdrStatus::Accepted,
        })
        .await?;

    tracing::info!(
        project_id = project.id,
        features = feature_ids.len(),
        rules = rule_ids.len(),
        "demo data seeded"
    );

    Ok(SeedSummary {
        project_id: project.id,
        feature_ids,
        rule_ids,
        adr_ids: vec![adr.id],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcc_db::repos::rule::RuleFilter;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn seeds_demo_rows() {
        let svc = ControlService::new_local(":memory:").await.unwrap();
        let summary = seed_demo(&svc).await.unwrap();

        assert_eq!(summary.feature_ids.len(), 3);
        assert_eq!(summary.adr_ids.len(), 1);

        let rules = svc
            .list_rules(&RuleFilter {
                project_id: Some(summary.project_id),
                ..RuleFilter::default()
            })
            .await
            .unwrap();
        let names: Vec<_> = rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["No Circular Dependencies", "Test Coverage > 80%"]);

        let blocking = svc.list_blocking_rules(summary.project_id).await.unwrap();
        assert_eq!(blocking.len(), 1);
        assert_eq!(blocking[0].category, RuleCategory::Soc);

        let adr = svc.get_adr(summary.adr_ids[0]).await.unwrap();
        assert_eq!(adr.status, AdrStatus::Accepted);
    }
}
