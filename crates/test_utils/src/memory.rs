//! In-Memory Collaborator Adapters
//!
//! Mock implementations of the storage and extraction ports for
//! integration tests: a `HashMap` behind a lock instead of flat files or a
//! document pipeline. Useful for exercising the full
//! load-plan → accumulate → persist-plan session flow without real
//! collaborators.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use core_kernel::{DocId, DomainPort, PortError, SessionId};
use domain_benefits::{PlanState, PlanStateStore};
use domain_claims::{ClaimRecord, ClaimSource};

/// In-memory plan-state store keyed by session
#[derive(Debug, Default)]
pub struct InMemoryPlanStore {
    plans: RwLock<HashMap<SessionId, PlanState>>,
}

impl InMemoryPlanStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a plan for a session
    pub fn seed(&self, session: SessionId, plan: PlanState) {
        self.plans
            .write()
            .expect("plan store lock poisoned")
            .insert(session, plan);
    }
}

impl DomainPort for InMemoryPlanStore {}

#[async_trait]
impl PlanStateStore for InMemoryPlanStore {
    async fn load_plan(&self, session: SessionId) -> Result<PlanState, PortError> {
        self.plans
            .read()
            .expect("plan store lock poisoned")
            .get(&session)
            .cloned()
            .ok_or_else(|| PortError::not_found("PlanState", session))
    }

    async fn save_plan(&self, session: SessionId, plan: &PlanState) -> Result<(), PortError> {
        plan.validate()
            .map_err(|e| PortError::validation(e.to_string()))?;
        self.plans
            .write()
            .expect("plan store lock poisoned")
            .insert(session, plan.clone());
        Ok(())
    }
}

/// In-memory claim source keyed by session and document id
#[derive(Debug, Default)]
pub struct InMemoryClaimSource {
    claims: RwLock<HashMap<(SessionId, DocId), ClaimRecord>>,
}

impl InMemoryClaimSource {
    /// Creates an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a parsed claim for a session
    pub fn seed(&self, session: SessionId, claim: ClaimRecord) {
        self.claims
            .write()
            .expect("claim source lock poisoned")
            .insert((session, claim.doc_id.clone()), claim);
    }
}

impl DomainPort for InMemoryClaimSource {}

#[async_trait]
impl ClaimSource for InMemoryClaimSource {
    async fn fetch_claim(
        &self,
        session: SessionId,
        doc_id: &DocId,
    ) -> Result<ClaimRecord, PortError> {
        self.claims
            .read()
            .expect("claim source lock poisoned")
            .get(&(session, doc_id.clone()))
            .cloned()
            .ok_or_else(|| PortError::not_found("ClaimRecord", doc_id))
    }
}
