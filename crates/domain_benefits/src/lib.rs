//! Benefit Accumulation Domain
//!
//! This crate implements the deterministic arithmetic that turns a parsed
//! claim and a plan-benefit snapshot into the patient's actual financial
//! responsibility, plus the rationale for it:
//!
//! - [`PlanState`]: the patient's benefit-year accumulators
//! - [`BenefitEngine`]: deductible → coinsurance → OOP-cap accumulation,
//!   expressed as a left fold over ordered line items
//! - [`explain`]: per-line rationale statements from the accumulation result
//! - [`Simulator`]: the same engine against hypothetical, partially-specified
//!   plan states
//!
//! Every operation is a pure function of its arguments: no caching, no
//! global state, no I/O. The same claim can be simulated against any number
//! of hypothetical plan states concurrently.

pub mod plan;
pub mod accumulate;
pub mod explain;
pub mod simulate;
pub mod ports;
pub mod error;

pub use plan::{CopaySchedule, PlanState};
pub use accumulate::{
    AccumulationPolicy, AccumulationResult, BenefitEngine, ClaimTotals, CostShareOrder,
    DeniedLinePolicy, LineBreakdown, ReasonCode,
};
pub use explain::{explain, Statement};
pub use simulate::{PartialPlanState, Simulator};
pub use ports::PlanStateStore;
pub use error::BenefitError;
