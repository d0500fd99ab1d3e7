//! Storage collaborator port

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, SessionId};
use crate::plan::PlanState;

/// Store of plan-benefit snapshots keyed by session
///
/// Implemented by the storage collaborator. The core never serializes plan
/// state itself; every field is serde-derived so any encoding the adapter
/// chooses round-trips decimal amounts losslessly.
#[async_trait]
pub trait PlanStateStore: DomainPort {
    /// Loads the plan snapshot for a session
    async fn load_plan(&self, session: SessionId) -> Result<PlanState, PortError>;

    /// Persists the plan snapshot for a session
    async fn save_plan(&self, session: SessionId, plan: &PlanState) -> Result<(), PortError>;
}
