//! Outbound seam for forwarding accepted proposals.

use async_trait::async_trait;
use mcc_remote::{McpClient, RemoteError};
use serde_json::Value;

/// Destination for proposals that passed the gates and were stored locally.
///
/// Implementations make a single attempt and signal any failure (transport,
/// timeout, non-success status) as an error. The workflow never retries.
#[async_trait]
pub trait ProposalSink: Send + Sync {
    /// Forward `payload` for `project` and return the remote acknowledgement.
    async fn post_proposal(&self, project: &str, payload: &Value) -> Result<Value, RemoteError>;
}

#[async_trait]
impl ProposalSink for McpClient {
    async fn post_proposal(&self, project: &str, payload: &Value) -> Result<Value, RemoteError> {
        Self::post_proposal(self, project, payload).await
    }
}
