use anyhow::Context;
use mcc_config::MccConfig;
use mcc_core::responses::ViolationsReport;
use mcc_db::service::ControlService;
use mcc_gate::{Candidate, GateEvaluator};

use crate::cli::RunGatesArgs;
use crate::output::output;

/// Handle `mcc run-gates`. Fails when any project has violations.
pub async fn handle(args: &RunGatesArgs, config: &MccConfig) -> anyhow::Result<()> {
    let service = ControlService::new_local(&config.database.path)
        .await
        .context("failed to open control center database")?;

    let projects = match args.project_id {
        Some(id) => vec![
            service
                .get_project(id)
                .await
                .with_context(|| format!("project {id} not found"))?,
        ],
        None => service.list_projects().await?,
    };

    let evaluator = GateEvaluator::default();
    let candidate = Candidate::default();
    let mut reports = Vec::with_capacity(projects.len());
    for project in &projects {
        let violations = evaluator
            .evaluate(&service, project.id, &candidate)
            .await
            .with_context(|| format!("failed to evaluate rules for project {}", project.id))?;
        reports.push(ViolationsReport::build(project, violations));
    }

    output(&reports)?;

    let total: usize = reports.iter().map(|r| r.total_violations).sum();
    if total > 0 {
        anyhow::bail!("{total} gate violation(s) found");
    }
    Ok(())
}
