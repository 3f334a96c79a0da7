//! The remote edge path and the local fallback must land identical final
//! state. These tests drive the same operation through both paths against
//! identically seeded stores and compare end states.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::*;
use fieldstock::inventory::edge::{EdgeClient, EdgeError, EdgeOperation};
use fieldstock::inventory::ops;
use fieldstock::inventory::ops::inspect::InspectParams;
use fieldstock::inventory::ops::issue::{IssueItem, IssueParams};
use fieldstock::inventory::reference::ReferenceData;
use fieldstock::models::InventoryRecord;
use fieldstock::store::MemoryStore;

/// Stands in for the server side: runs the same operation logic against the
/// shared database, the contract the real edge functions must honor.
struct ServerBackedEdge {
    store: Arc<MemoryStore>,
    refs: ReferenceData,
}

#[async_trait]
impl EdgeClient for ServerBackedEdge {
    async fn invoke(
        &self,
        operation: EdgeOperation,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, EdgeError> {
        let report = match operation {
            EdgeOperation::Issue => {
                let params: IssueParams =
                    serde_json::from_value(payload).map_err(|e| EdgeError(e.to_string()))?;
                ops::issue::execute(self.store.as_ref(), &self.refs, None, &params)
                    .await
                    .map_err(|e| EdgeError(e.to_string()))?
            }
            EdgeOperation::Inspect => {
                let params: InspectParams =
                    serde_json::from_value(payload).map_err(|e| EdgeError(e.to_string()))?;
                ops::inspect::execute(self.store.as_ref(), &self.refs, None, &params)
                    .await
                    .map_err(|e| EdgeError(e.to_string()))?
            }
            other => return Err(EdgeError(format!("{other:?} not deployed"))),
        };
        serde_json::to_value(report).map_err(|e| EdgeError(e.to_string()))
    }
}

/// An edge deployment that is down; every call fails and the orchestrator
/// must fall back to the local sequence.
struct UnreachableEdge;

#[async_trait]
impl EdgeClient for UnreachableEdge {
    async fn invoke(
        &self,
        _operation: EdgeOperation,
        _payload: serde_json::Value,
    ) -> Result<serde_json::Value, EdgeError> {
        Err(EdgeError("connection refused".to_string()))
    }
}

/// State comparison ignoring timestamps.
fn shape(records: &[InventoryRecord]) -> Vec<(i64, i64, i64, i64, Option<i64>, Option<i64>, i64)> {
    let mut shape: Vec<_> = records
        .iter()
        .map(|r| {
            (
                r.id,
                r.item_type_id,
                r.location_id,
                r.status_id,
                r.assigned_crew_id,
                r.area_id,
                r.quantity,
            )
        })
        .collect();
    shape.sort();
    shape
}

fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(configured_store());
    store.seed_record(bulk(15, LOC_WAREHOUSE, STATUS_AVAILABLE));
    store.seed_record(bulk(9, LOC_WAREHOUSE, STATUS_REJECTED));
    store
}

fn issue_params(inventory_id: i64, quantity: i64) -> IssueParams {
    IssueParams {
        sloc_id: SLOC,
        items: vec![IssueItem { inventory_id, quantity }],
        crew_id: CREW_NORTH,
        area_id: Some(AREA_THREE),
        notes: None,
        user_name: "pat".to_string(),
    }
}

#[tokio::test]
async fn issue_via_edge_matches_the_local_path() {
    let refs = reference_data();

    let local = seeded_store();
    let local_report = ops::issue::execute(local.as_ref(), &refs, None, &issue_params(1, 10))
        .await
        .unwrap();

    let remote = seeded_store();
    let edge = ServerBackedEdge { store: remote.clone(), refs: refs.clone() };
    let remote_report = ops::issue::execute(
        remote.as_ref(),
        &refs,
        Some(&edge as &dyn EdgeClient),
        &issue_params(1, 10),
    )
    .await
    .unwrap();

    assert_eq!(local_report.summary(), remote_report.summary());
    assert_eq!(shape(&local.records_snapshot()), shape(&remote.records_snapshot()));
}

#[tokio::test]
async fn inspect_via_edge_matches_the_local_path() {
    use fieldstock::inventory::ops::inspect::InspectItem;

    let refs = reference_data();
    let params = InspectParams {
        sloc_id: SLOC,
        items: vec![InspectItem { inventory_id: 2, passed: 6, rejected: 3 }],
        notes: None,
        user_name: "pat".to_string(),
    };

    let local = seeded_store();
    ops::inspect::execute(local.as_ref(), &refs, None, &params)
        .await
        .unwrap();

    let remote = seeded_store();
    let edge = ServerBackedEdge { store: remote.clone(), refs: refs.clone() };
    ops::inspect::execute(remote.as_ref(), &refs, Some(&edge as &dyn EdgeClient), &params)
        .await
        .unwrap();

    assert_eq!(shape(&local.records_snapshot()), shape(&remote.records_snapshot()));
}

#[tokio::test]
async fn unreachable_edge_falls_back_to_an_equivalent_local_run() {
    let refs = reference_data();

    let plain = seeded_store();
    ops::issue::execute(plain.as_ref(), &refs, None, &issue_params(1, 10))
        .await
        .unwrap();

    let degraded = seeded_store();
    let report = ops::issue::execute(
        degraded.as_ref(),
        &refs,
        Some(&UnreachableEdge as &dyn EdgeClient),
        &issue_params(1, 10),
    )
    .await
    .unwrap();

    assert_eq!(report.summary(), "1 succeeded, 0 failed");
    assert_eq!(shape(&plain.records_snapshot()), shape(&degraded.records_snapshot()));
}
