//! What-if simulation against hypothetical plan states
//!
//! A thin pass-through to the [`BenefitEngine`] that first resolves a
//! partially-specified plan draft. Defaulting here is the only inference in
//! the system; the engine itself requires a fully-specified, validated
//! [`PlanState`].

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, Rate};
use domain_claims::ClaimRecord;

use crate::accumulate::{AccumulationResult, BenefitEngine};
use crate::error::BenefitError;
use crate::plan::{CopaySchedule, PlanState};

/// A partially-specified plan, as a user might enter it
///
/// Resolution rules:
/// - missing `coinsurance` defaults to 0.2
/// - missing `deductible_remaining` falls back to `deductible_individual`
///   (a fresh-year assumption); if neither is present, resolution fails
/// - missing `oop_remaining` falls back to `oop_max`, same failure rule
/// - a missing annual total with a present remaining resolves to that
///   remaining, so the resolved state always satisfies remaining ≤ total
/// - missing `copays` resolve to an empty schedule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialPlanState {
    pub deductible_individual: Option<Money>,
    pub deductible_remaining: Option<Money>,
    pub coinsurance: Option<Rate>,
    pub oop_max: Option<Money>,
    pub oop_remaining: Option<Money>,
    pub copays: Option<CopaySchedule>,
}

impl PartialPlanState {
    /// Resolves the draft into a fully-specified plan state
    ///
    /// # Errors
    ///
    /// `MissingRequiredField` when neither a remaining balance nor its
    /// annual total is given; any range violation surfaces through
    /// [`PlanState::validate`].
    pub fn resolve(self) -> Result<PlanState, BenefitError> {
        let deductible_remaining = self
            .deductible_remaining
            .or(self.deductible_individual)
            .ok_or(BenefitError::MissingRequiredField {
                field: "deductible_remaining",
            })?;
        let deductible_individual = self.deductible_individual.unwrap_or(deductible_remaining);

        let oop_remaining =
            self.oop_remaining
                .or(self.oop_max)
                .ok_or(BenefitError::MissingRequiredField {
                    field: "oop_remaining",
                })?;
        let oop_max = self.oop_max.unwrap_or(oop_remaining);

        let coinsurance = self.coinsurance.unwrap_or_else(|| Rate::new(dec!(0.2)));

        let plan = PlanState {
            deductible_individual,
            deductible_remaining,
            coinsurance,
            oop_max,
            oop_remaining,
            copays: self.copays.unwrap_or_default(),
        };
        plan.validate()?;
        Ok(plan)
    }
}

/// Runs claims against hypothetical plan states
///
/// Stateless apart from engine configuration; does not read or write any
/// stored profile, so simulations never leak into real accumulators.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    engine: BenefitEngine,
}

impl Simulator {
    /// Creates a simulator over a default-policy engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator over an explicitly configured engine
    pub fn with_engine(engine: BenefitEngine) -> Self {
        Self { engine }
    }

    /// Simulates a claim under a hypothetical plan
    ///
    /// Resolves the draft, then delegates to [`BenefitEngine::apply`].
    /// Pure: no stored state is consulted or changed.
    pub fn simulate(
        &self,
        claim: &ClaimRecord,
        draft: PartialPlanState,
    ) -> Result<AccumulationResult, BenefitError> {
        let plan = draft.resolve()?;
        tracing::debug!(doc_id = %claim.doc_id, "simulating claim against hypothetical plan");
        self.engine.apply(claim, &plan)
    }
}
