use anyhow::Context;
use mcc_config::MccConfig;
use mcc_core::enums::RuleCategory;
use mcc_core::responses::SocReport;
use mcc_db::repos::rule::RuleFilter;
use mcc_db::service::ControlService;

use crate::cli::SocReportArgs;
use crate::output::output;

/// Handle `mcc generate-soc-report`.
pub async fn handle(args: &SocReportArgs, config: &MccConfig) -> anyhow::Result<()> {
    let service = ControlService::new_local(&config.database.path)
        .await
        .context("failed to open control center database")?;

    let reports = build_reports(&service, args.project_id).await?;
    tracing::info!(projects = reports.len(), "soc report generated");
    output(&reports)
}

/// One report per project, or for `project_id` alone.
async fn build_reports(
    service: &ControlService,
    project_id: Option<i64>,
) -> anyhow::Result<Vec<SocReport>> {
    let projects = match project_id {
        Some(id) => vec![
            service
                .get_project(id)
                .await
                .with_context(|| format!("project {id} not found"))?,
        ],
        None => service.list_projects().await?,
    };

    let mut reports = Vec::with_capacity(projects.len());
    for project in &projects {
        let soc_rules = service
            .list_rules(&RuleFilter {
                project_id: Some(project.id),
                category: Some(RuleCategory::Soc),
                enabled: Some(true),
                gate: None,
            })
            .await
            .with_context(|| format!("failed to load rules for project {}", project.id))?;
        reports.push(SocReport::build(project, &soc_rules));
    }
    Ok(reports)
}
