//! Claim Document Domain
//!
//! This crate models a parsed Explanation-of-Benefits document: an ordered
//! sequence of adjudicated line items plus any denial codes the payer
//! attached. Records arrive pre-parsed from the extraction collaborator;
//! this crate owns their shape and the boundary validation that runs before
//! any benefit math.
//!
//! Line-item order is significant: accumulation is applied in document
//! order, matching how an adjudicator processes lines within one EOB.

pub mod claim;
pub mod denial;
pub mod ports;
pub mod error;

pub use claim::{ClaimLineItem, ClaimRecord, VisitType};
pub use denial::DenialCode;
pub use ports::ClaimSource;
pub use error::ClaimError;
