//! End-to-end workflow tests over an in-memory store and fake sinks.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mcc_core::entities::Rule;
use mcc_core::enums::{ProposalStatus, RuleCategory, RuleGate};
use mcc_db::repos::project::NewProject;
use mcc_db::repos::rule::NewRule;
use mcc_db::service::ControlService;
use mcc_gate::{
    Candidate, CheckRegistry, GateEvaluator, ProposalSink, ProposalWorkflow, SubmitOutcome,
    SubmitProposal, WorkflowError,
};
use mcc_remote::{McpClient, RemoteError};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

/// Sink that records every call and how many proposals were stored at the time.
struct RecordingSink {
    service: Arc<ControlService>,
    calls: AtomicUsize,
    stored_at_call: AtomicUsize,
    last_payload: Mutex<Option<Value>>,
    fail: bool,
}

impl RecordingSink {
    fn new(service: Arc<ControlService>, fail: bool) -> Arc<Self> {
        Arc::new(Self {
            service,
            calls: AtomicUsize::new(0),
            stored_at_call: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
            fail,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProposalSink for RecordingSink {
    async fn post_proposal(&self, project: &str, payload: &Value) -> Result<Value, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let stored = self.service.count_proposals(None).await.unwrap();
        self.stored_at_call
            .store(usize::try_from(stored).unwrap(), Ordering::SeqCst);
        *self.last_payload.lock().unwrap() = Some(payload.clone());
        if self.fail {
            return Err(RemoteError::Api {
                status: 503,
                message: "mcp unavailable".into(),
            });
        }
        Ok(json!({"accepted": true, "project": project, "summary": payload["summary_md"]}))
    }
}

async fn service() -> Arc<ControlService> {
    Arc::new(ControlService::new_local(":memory:").await.unwrap())
}

async fn project(service: &ControlService) -> i64 {
    service
        .create_project(NewProject {
            name: "Demo".into(),
            ..Default::default()
        })
        .await
        .unwrap()
        .id
}

fn soc_blocker() -> GateEvaluator {
    let mut registry = CheckRegistry::new();
    registry.register(RuleCategory::Soc, |rule: &Rule, c: &Candidate| {
        c.summary_md
            .contains("cycle")
            .then(|| format!("{} violated", rule.name))
    });
    GateEvaluator::new(registry)
}

fn workflow(
    service: &Arc<ControlService>,
    evaluator: GateEvaluator,
    sink: Arc<dyn ProposalSink>,
) -> ProposalWorkflow {
    ProposalWorkflow::new(Arc::clone(service), evaluator, sink)
}

async fn proposal_count(service: &ControlService) -> i64 {
    service.count_proposals(None).await.unwrap()
}

#[tokio::test]
async fn missing_project_id_has_no_side_effects() {
    let svc = service().await;
    let sink = RecordingSink::new(Arc::clone(&svc), false);
    let wf = workflow(&svc, GateEvaluator::default(), sink.clone());

    let request: SubmitProposal = serde_json::from_value(json!({
        "summary": "Add login",
        "patch_manifest": {},
        "linked_features": []
    }))
    .unwrap();

    let err = wf.submit(request).await.unwrap_err();
    assert!(matches!(err, WorkflowError::MissingField("project_id")));
    assert_eq!(proposal_count(&svc).await, 0);
    assert_eq!(sink.calls(), 0);
}

#[tokio::test]
async fn unknown_project_is_not_found() {
    let svc = service().await;
    let sink = RecordingSink::new(Arc::clone(&svc), false);
    let wf = workflow(&svc, GateEvaluator::default(), sink.clone());

    let err = wf.submit(SubmitProposal::new(999, "x")).await.unwrap_err();
    assert!(matches!(err, WorkflowError::ProjectNotFound(999)));
    assert_eq!(sink.calls(), 0);

    let err = wf.preview(&SubmitProposal::new(999, "x")).await.unwrap_err();
    assert!(matches!(err, WorkflowError::ProjectNotFound(999)));
}

#[tokio::test]
async fn valid_submission_is_stored_before_forwarding() {
    let svc = service().await;
    let pid = project(&svc).await;
    let sink = RecordingSink::new(Arc::clone(&svc), false);
    let wf = workflow(&svc, GateEvaluator::default(), sink.clone());

    let outcome = wf.submit(SubmitProposal::new(pid, "Add login")).await.unwrap();

    let (proposal_id, mcp_response) = match outcome {
        SubmitOutcome::Submitted {
            proposal_id,
            mcp_response,
        } => (proposal_id, mcp_response),
        other => panic!("expected submitted, got {other:?}"),
    };
    assert_eq!(mcp_response["project"], pid.to_string());
    assert_eq!(mcp_response["summary"], "Add login");

    assert_eq!(sink.calls(), 1);
    assert_eq!(sink.stored_at_call.load(Ordering::SeqCst), 1);

    let stored = svc.get_proposal(proposal_id).await.unwrap();
    assert_eq!(stored.status, ProposalStatus::Submitted);
    assert_eq!(stored.summary_md, "Add login");
    assert_eq!(stored.patch_manifest_json, json!({}));
}

#[tokio::test]
async fn sink_receives_caller_document_with_extra_keys() {
    let svc = service().await;
    let pid = project(&svc).await;
    let sink = RecordingSink::new(Arc::clone(&svc), false);
    let wf = workflow(&svc, GateEvaluator::default(), sink.clone());

    let request: SubmitProposal = serde_json::from_value(json!({
        "project_id": pid,
        "summary": "Add login",
        "patch_manifest": {"files": ["auth.rs"]},
        "linked_features": [3],
        "author": "ci-bot",
        "labels": ["auth"]
    }))
    .unwrap();
    wf.submit(request).await.unwrap();

    let payload = sink.last_payload.lock().unwrap().clone().unwrap();
    assert_eq!(
        payload,
        json!({
            "project_id": pid,
            "summary_md": "Add login",
            "patch_manifest_json": {"files": ["auth.rs"]},
            "linked_features": [3],
            "author": "ci-bot",
            "labels": ["auth"]
        })
    );
}

#[tokio::test]
async fn rejection_writes_nothing_and_sends_nothing() {
    let svc = service().await;
    let pid = project(&svc).await;
    svc.create_rule(NewRule::new(
        pid,
        "No Circular Dependencies",
        RuleCategory::Soc,
        RuleGate::Fail,
    ))
    .await
    .unwrap();
    let sink = RecordingSink::new(Arc::clone(&svc), false);
    let wf = workflow(&svc, soc_blocker(), sink.clone());

    let outcome = wf
        .submit(SubmitProposal::new(pid, "Introduce an import cycle"))
        .await
        .unwrap();

    match outcome {
        SubmitOutcome::Rejected {
            message,
            violations,
        } => {
            assert_eq!(message, "Proposal violates quality gates");
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].rule, "No Circular Dependencies");
            assert_eq!(violations[0].category, RuleCategory::Soc);
        }
        other => panic!("expected rejected, got {other:?}"),
    }
    assert_eq!(proposal_count(&svc).await, 0);
    assert_eq!(sink.calls(), 0);
}

#[tokio::test]
async fn failing_sink_keeps_local_proposal() {
    let svc = service().await;
    let pid = project(&svc).await;
    let sink = RecordingSink::new(Arc::clone(&svc), true);
    let wf = workflow(&svc, GateEvaluator::default(), sink.clone());

    let outcome = wf.submit(SubmitProposal::new(pid, "Add login")).await.unwrap();

    let (proposal_id, mcp_error) = match outcome {
        SubmitOutcome::SubmittedLocally {
            proposal_id,
            mcp_error,
        } => (proposal_id, mcp_error),
        other => panic!("expected submitted_locally, got {other:?}"),
    };
    assert!(mcp_error.contains("503"), "unexpected error: {mcp_error}");
    assert_eq!(sink.calls(), 1);
    assert_eq!(
        svc.get_proposal(proposal_id).await.unwrap().status,
        ProposalStatus::Submitted
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submits_each_store_one_proposal() {
    const SUBMITS: usize = 32;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mcc.db");
    let svc = Arc::new(ControlService::new_local(path.to_str().unwrap()).await.unwrap());
    let pid = project(&svc).await;
    let sink = RecordingSink::new(Arc::clone(&svc), true);
    let wf = Arc::new(workflow(&svc, GateEvaluator::default(), sink.clone()));

    let handles: Vec<_> = (0..SUBMITS)
        .map(|i| {
            let wf = Arc::clone(&wf);
            tokio::spawn(async move {
                wf.submit(SubmitProposal::new(pid, format!("change {i}")))
                    .await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        match handle.await.unwrap().unwrap() {
            SubmitOutcome::SubmittedLocally { proposal_id, .. } => ids.push(proposal_id),
            other => panic!("expected submitted_locally, got {other:?}"),
        }
    }
    ids.sort_unstable();
    ids.dedup();

    assert_eq!(ids.len(), SUBMITS);
    assert_eq!(sink.calls(), SUBMITS);
    assert_eq!(proposal_count(&svc).await, i64::try_from(SUBMITS).unwrap());
}

#[tokio::test]
async fn warn_and_disabled_rules_never_block() {
    let svc = service().await;
    let pid = project(&svc).await;
    svc.create_rule(NewRule::new(pid, "Layering", RuleCategory::Soc, RuleGate::Warn))
        .await
        .unwrap();
    svc.create_rule(NewRule {
        enabled: false,
        ..NewRule::new(pid, "No cycles", RuleCategory::Soc, RuleGate::Fail)
    })
    .await
    .unwrap();

    let evaluator = soc_blocker();
    let candidate = Candidate {
        summary_md: "cycle everywhere".into(),
        ..Candidate::default()
    };
    let violations = evaluator.evaluate(&svc, pid, &candidate).await.unwrap();
    assert!(violations.is_empty());
}

#[tokio::test]
async fn fail_rule_without_checker_does_not_block() {
    let svc = service().await;
    let pid = project(&svc).await;
    svc.create_rule(NewRule::new(
        pid,
        "No Circular Dependencies",
        RuleCategory::Soc,
        RuleGate::Fail,
    ))
    .await
    .unwrap();

    let violations = GateEvaluator::default()
        .evaluate(&svc, pid, &Candidate::default())
        .await
        .unwrap();
    assert!(violations.is_empty());
}

#[tokio::test]
async fn remote_timeout_is_submitted_locally() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        loop {
            let (socket, _) = listener.accept().await.unwrap();
            held.push(socket);
        }
    });

    let svc = service().await;
    let pid = project(&svc).await;
    let client = McpClient::new(format!("http://{addr}"), None, Duration::from_millis(300));
    let wf = workflow(&svc, GateEvaluator::default(), Arc::new(client));

    let request: SubmitProposal = serde_json::from_value(json!({
        "project_id": pid,
        "summary": "Add login",
        "patch_manifest": {},
        "linked_features": []
    }))
    .unwrap();
    let outcome = wf.submit(request).await.unwrap();

    assert!(
        matches!(outcome, SubmitOutcome::SubmittedLocally { .. }),
        "expected submitted_locally, got {outcome:?}"
    );
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"], "submitted_locally");
    assert!(json["mcp_error"].is_string());
    assert_eq!(proposal_count(&svc).await, 1);
}

#[tokio::test]
async fn preview_is_idempotent_and_writes_nothing() {
    let svc = service().await;
    let pid = project(&svc).await;
    let sink = RecordingSink::new(Arc::clone(&svc), false);
    let wf = workflow(&svc, GateEvaluator::default(), sink.clone());

    let request = SubmitProposal::new(pid, "Add login");
    let first = wf.preview(&request).await.unwrap();
    let second = wf.preview(&request).await.unwrap();

    assert_eq!(first, second);
    assert!(first.valid);
    assert!(first.violations.is_empty());
    assert_eq!(first.summary, "Add login");
    assert_eq!(proposal_count(&svc).await, 0);
    assert_eq!(sink.calls(), 0);
}

#[tokio::test]
async fn preview_reports_violations_without_writing() {
    let svc = service().await;
    let pid = project(&svc).await;
    svc.create_rule(NewRule::new(pid, "No cycles", RuleCategory::Soc, RuleGate::Fail))
        .await
        .unwrap();
    let sink = RecordingSink::new(Arc::clone(&svc), false);
    let wf = workflow(&svc, soc_blocker(), sink.clone());

    let preview = wf
        .preview(&SubmitProposal::new(pid, "adds a cycle"))
        .await
        .unwrap();
    assert!(!preview.valid);
    assert_eq!(preview.violations[0].message, "No cycles violated");
    assert_eq!(proposal_count(&svc).await, 0);
}
