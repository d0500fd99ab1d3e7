//! Extraction collaborator port

use async_trait::async_trait;

use core_kernel::{DocId, DomainPort, PortError, SessionId};
use crate::claim::ClaimRecord;

/// Source of parsed claim records
///
/// Implemented by the extraction collaborator (OCR / table extraction).
/// Records returned here are expected to satisfy
/// [`ClaimRecord::validate`](crate::ClaimRecord::validate); the engine
/// re-checks at its own boundary regardless.
#[async_trait]
pub trait ClaimSource: DomainPort {
    /// Fetches a parsed claim by document id within a session
    async fn fetch_claim(
        &self,
        session: SessionId,
        doc_id: &DocId,
    ) -> Result<ClaimRecord, PortError>;
}
