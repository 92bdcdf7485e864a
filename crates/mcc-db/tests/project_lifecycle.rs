//! Project lifecycle integration tests.
//!
//! Exercises the public repo surface end to end on a file-backed database:
//! - project with child records across every table
//! - PATCH-style updates deserialized from JSON
//! - data surviving a reopen

use tempfile::TempDir;

use mcc_core::enums::{AdrStatus, FeatureStatus, ProposalStatus, RuleCategory, RuleGate, UpdateSource};
use mcc_db::repos::adr::{AdrFilter, NewAdr};
use mcc_db::repos::feature::{FeatureFilter, NewFeature};
use mcc_db::repos::project::NewProject;
use mcc_db::repos::proposal::{NewProposal, ProposalFilter};
use mcc_db::repos::rule::{NewRule, RuleFilter};
use mcc_db::repos::specification::{NewSpecification, SpecificationFilter};
use mcc_db::service::ControlService;
use mcc_db::updates::feature::FeatureUpdate;
use mcc_db::updates::project::ProjectUpdate;

async fn file_service(dir: &TempDir) -> ControlService {
    let path = dir.path().join("mcc.db");
    ControlService::new_local(path.to_str().unwrap()).await.unwrap()
}

#[tokio::test]
async fn project_with_children_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let project_id = {
        let svc = file_service(&dir).await;
        let project = svc
            .create_project(NewProject {
                name: "Demo Project".into(),
                repo_url: Some("https://github.com/acme/demo".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        svc.create_feature(NewFeature::new(project.id, "User Authentication"))
            .await
            .unwrap();
        svc.create_specification(NewSpecification::new(project.id, "# API"))
            .await
            .unwrap();
        svc.create_rule(NewRule::new(
            project.id,
            "No Circular Dependencies",
            RuleCategory::Soc,
            RuleGate::Fail,
        ))
        .await
        .unwrap();
        svc.create_adr(NewAdr {
            project_id: project.id,
            title: "Use SQLite".into(),
            context_md: String::new(),
            decision_md: String::new(),
            consequences_md: String::new(),
            status: AdrStatus::Accepted,
        })
        .await
        .unwrap();
        svc.create_proposal(NewProposal {
            project_id: project.id,
            summary_md: "Add login".into(),
            patch_manifest_json: serde_json::json!({}),
            linked_features: vec![],
            status: ProposalStatus::Submitted,
        })
        .await
        .unwrap();
        svc.create_agent_update(project.id, UpdateSource::Agent, serde_json::json!({"ok": true}))
            .await
            .unwrap();
        project.id
    };

    let svc = file_service(&dir).await;
    let scoped = Some(project_id);
    assert_eq!(
        svc.list_features(&FeatureFilter {
            project_id: scoped,
            ..Default::default()
        })
        .await
        .unwrap()
        .len(),
        1
    );
    assert_eq!(
        svc.list_specifications(&SpecificationFilter {
            project_id: scoped,
            ..Default::default()
        })
        .await
        .unwrap()
        .len(),
        1
    );
    assert_eq!(
        svc.list_rules(&RuleFilter {
            project_id: scoped,
            ..Default::default()
        })
        .await
        .unwrap()
        .len(),
        1
    );
    assert_eq!(
        svc.list_adrs(&AdrFilter {
            project_id: scoped,
            status: Some(AdrStatus::Accepted),
        })
        .await
        .unwrap()
        .len(),
        1
    );
    assert_eq!(
        svc.list_proposals(&ProposalFilter {
            project_id: scoped,
            status: Some(ProposalStatus::Submitted),
        })
        .await
        .unwrap()
        .len(),
        1
    );
    assert_eq!(
        svc.list_recent_agent_updates(scoped, 10).await.unwrap().len(),
        1
    );
    assert_eq!(svc.list_blocking_rules(project_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn json_patch_bodies_drive_updates() {
    let svc = ControlService::new_local(":memory:").await.unwrap();
    let project = svc
        .create_project(NewProject {
            name: "Demo".into(),
            repo_url: Some("https://github.com/acme/demo".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let feature = svc
        .create_feature(NewFeature::new(project.id, "Login"))
        .await
        .unwrap();

    let patch: FeatureUpdate =
        serde_json::from_str(r#"{"status": "DONE", "priority": 1}"#).unwrap();
    let updated = svc.update_feature(feature.id, patch).await.unwrap();
    assert_eq!(updated.status, FeatureStatus::Done);
    assert_eq!(updated.priority, 1);

    let patch: ProjectUpdate = serde_json::from_str(r#"{"repo_url": null}"#).unwrap();
    let updated = svc.update_project(project.id, patch).await.unwrap();
    assert_eq!(updated.repo_url, None);
    assert_eq!(updated.name, "Demo");

    assert!(serde_json::from_str::<FeatureUpdate>(r#"{"colour": "red"}"#).is_err());
}
