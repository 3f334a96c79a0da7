//! Boundary to the optional server-side "edge function" implementations of
//! the inventory operations. When a client is configured, each orchestrator
//! tries the remote path first and falls back to its local sequence on
//! failure; both paths must land the same final state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeOperation {
    Receive,
    Issue,
    Return,
    Reject,
    Inspect,
    FieldInstall,
}

#[derive(Debug, Clone, Error)]
#[error("edge function call failed: {0}")]
pub struct EdgeError(pub String);

/// Remote per-operation RPC. Implementations are external collaborators; the
/// payload and returned value are the operation's params and report as JSON.
#[async_trait]
pub trait EdgeClient: Send + Sync {
    async fn invoke(
        &self,
        operation: EdgeOperation,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, EdgeError>;
}

/// Attempts the remote path for one operation. `None` means the caller must
/// run the local sequence (no client, call failure, or an unreadable reply).
pub async fn try_remote<P, R>(
    edge: Option<&dyn EdgeClient>,
    operation: EdgeOperation,
    params: &P,
) -> Option<R>
where
    P: Serialize,
    R: for<'de> Deserialize<'de>,
{
    let client = edge?;
    let payload = match serde_json::to_value(params) {
        Ok(payload) => payload,
        Err(err) => {
            log::warn!("could not encode {operation:?} payload for edge call: {err}");
            return None;
        }
    };
    match client.invoke(operation, payload).await {
        Ok(value) => match serde_json::from_value(value) {
            Ok(report) => Some(report),
            Err(err) => {
                log::warn!("unreadable {operation:?} edge reply, falling back to local path: {err}");
                None
            }
        },
        Err(err) => {
            log::warn!("{operation:?} edge call failed, falling back to local path: {err}");
            None
        }
    }
}
