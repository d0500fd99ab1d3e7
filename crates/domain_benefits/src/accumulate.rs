//! Claim accumulation against plan state
//!
//! The engine is a left fold over a claim's ordered line items: each line is
//! adjudicated against the plan state the previous line left behind, in the
//! fixed precedence copay → deductible → coinsurance → OOP cap. Order
//! matters and is never changed; the per-line function is pure so it can be
//! tested in isolation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{DocId, Money};
use domain_claims::{ClaimLineItem, ClaimRecord, DenialCode, VisitType};

use crate::error::BenefitError;
use crate::plan::PlanState;

/// Order in which copay and deductible are taken from a line
///
/// Plan-design dependent: most copay-then-coinsurance plans take the copay
/// off the top without deductible credit, but some apply the deductible
/// first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostShareOrder {
    #[default]
    CopayFirst,
    DeductibleFirst,
}

/// What a denied line means for the patient's bill
///
/// Real adjudication practice varies; the safe default leaves the disputed
/// amount out of the math entirely until an appeal resolves it. Under every
/// policy the line bypasses the deductible and OOP accumulators: denied
/// amounts never earn benefit credit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeniedLinePolicy {
    /// $0 patient / $0 plan, flagged for appeal
    #[default]
    PendingAppeal,
    /// The full allowed amount is billed to the patient
    BillPatient,
    /// The provider writes the line off
    WriteOff,
}

/// Engine configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulationPolicy {
    pub cost_share_order: CostShareOrder,
    pub denied_lines: DeniedLinePolicy,
}

/// Why a line's patient share is what it is
///
/// One code per line, by the dominant accumulation path. A line that pays
/// both deductible and coinsurance reads `Deductible`: the first-applied
/// stage names the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    Copay,
    Deductible,
    Coinsurance,
    OopCapReached,
    Denied,
    FullyCovered,
}

/// Per-line accumulation outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineBreakdown {
    pub service_code: String,
    pub visit_type: VisitType,
    pub denial_code: Option<DenialCode>,
    pub allowed: Money,
    pub copay_owed: Money,
    pub applied_to_deductible: Money,
    pub coinsurance_owed: Money,
    pub patient_owed: Money,
    pub plan_paid: Money,
    pub reason: ReasonCode,
}

/// Claim-level totals across all lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimTotals {
    pub allowed: Money,
    pub copay_owed: Money,
    pub applied_to_deductible: Money,
    pub coinsurance_owed: Money,
    pub patient_owed: Money,
    pub plan_paid: Money,
}

/// Result of applying one claim to one plan state
///
/// Constructed fresh per call and never mutated afterwards. `plan_after`
/// is the post-claim snapshot; the input state is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulationResult {
    pub doc_id: DocId,
    pub claim_date: NaiveDate,
    pub lines: Vec<LineBreakdown>,
    pub totals: ClaimTotals,
    pub plan_after: PlanState,
}

/// The benefit accumulation engine
///
/// `apply` is a pure function: it reads its arguments, returns a fresh
/// result, and holds no state of its own beyond configuration. Safe to
/// share across threads and to call concurrently.
#[derive(Debug, Clone, Default)]
pub struct BenefitEngine {
    policy: AccumulationPolicy,
}

impl BenefitEngine {
    /// Creates an engine with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with an explicit policy
    pub fn with_policy(policy: AccumulationPolicy) -> Self {
        Self { policy }
    }

    /// Returns the engine's policy
    pub fn policy(&self) -> &AccumulationPolicy {
        &self.policy
    }

    /// Applies a claim to a plan state
    ///
    /// Validates both inputs first, then folds the lines in document order.
    /// Neither argument is mutated; the returned result carries the
    /// post-claim plan state.
    ///
    /// # Errors
    ///
    /// Returns the claim's or plan's validation error before any math runs;
    /// partial results are never produced.
    pub fn apply(
        &self,
        claim: &ClaimRecord,
        plan: &PlanState,
    ) -> Result<AccumulationResult, BenefitError> {
        claim.validate()?;
        plan.validate()?;

        let currency = plan.currency();
        if claim.currency() != Some(currency) {
            return Err(BenefitError::validation(
                "currency",
                claim
                    .currency()
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
                "claim currency differs from plan currency",
            ));
        }

        let mut state = plan.clone();
        let mut lines = Vec::with_capacity(claim.lines.len());
        for line in &claim.lines {
            let (breakdown, next) = self.adjudicate_line(line, state)?;
            lines.push(breakdown);
            state = next;
        }

        let totals = Self::sum_lines(&lines, currency)?;
        tracing::debug!(
            doc_id = %claim.doc_id,
            patient_owed = %totals.patient_owed,
            plan_paid = %totals.plan_paid,
            "claim accumulated"
        );

        Ok(AccumulationResult {
            doc_id: claim.doc_id.clone(),
            claim_date: claim.claim_date,
            lines,
            totals,
            plan_after: state,
        })
    }

    /// Adjudicates a single line against the running plan state
    ///
    /// Pure: consumes the pre-line state and returns the post-line state
    /// alongside the breakdown.
    fn adjudicate_line(
        &self,
        line: &ClaimLineItem,
        state: PlanState,
    ) -> Result<(LineBreakdown, PlanState), BenefitError> {
        let currency = state.currency();
        let zero = Money::zero(currency);

        // Denied lines bypass the accumulators under every policy.
        if let Some(code) = &line.denial_code {
            let patient_owed = match self.policy.denied_lines {
                DeniedLinePolicy::BillPatient => line.allowed,
                DeniedLinePolicy::PendingAppeal | DeniedLinePolicy::WriteOff => zero,
            };
            let breakdown = LineBreakdown {
                service_code: line.service_code.clone(),
                visit_type: line.visit_type,
                denial_code: Some(code.clone()),
                allowed: line.allowed,
                copay_owed: zero,
                applied_to_deductible: zero,
                coinsurance_owed: zero,
                patient_owed,
                plan_paid: zero,
                reason: ReasonCode::Denied,
            };
            return Ok((breakdown, state));
        }

        let scheduled_copay = state.copays.copay_for(line.visit_type).unwrap_or(zero);

        // Copay and deductible per the configured order; coinsurance splits
        // whatever is left. The copay never earns deductible credit and is
        // capped at the allowed amount so cost shares cannot exceed the line.
        let (copay_owed, deductible_applied, leftover) = match self.policy.cost_share_order {
            CostShareOrder::CopayFirst => {
                let copay = scheduled_copay.min_with(&line.allowed)?;
                let remaining = line.allowed.checked_sub(&copay)?;
                let deductible = remaining.min_with(&state.deductible_remaining)?;
                let leftover = remaining.checked_sub(&deductible)?;
                (copay, deductible, leftover)
            }
            CostShareOrder::DeductibleFirst => {
                let deductible = line.allowed.min_with(&state.deductible_remaining)?;
                let remaining = line.allowed.checked_sub(&deductible)?;
                let copay = scheduled_copay.min_with(&remaining)?;
                let leftover = remaining.checked_sub(&copay)?;
                (copay, deductible, leftover)
            }
        };

        // Rounded to cents, clamped at the leftover so sub-cent inputs
        // cannot round the patient share above the balance being split.
        let coinsurance_owed = state
            .coinsurance
            .apply(&leftover)
            .round_bankers(2)
            .min_with(&leftover)?;
        // Plan share by subtraction, so patient + plan == allowed exactly.
        let plan_share = leftover.checked_sub(&coinsurance_owed)?;

        // The OOP cap clamps what is owed; the clamped-off remainder shifts
        // to the plan. The reduced amount is what decrements oop_remaining.
        let uncapped = copay_owed
            .checked_add(&deductible_applied)?
            .checked_add(&coinsurance_owed)?;
        let patient_owed = uncapped.min_with(&state.oop_remaining)?;
        let cap_relief = uncapped.checked_sub(&patient_owed)?;
        let plan_paid = plan_share.checked_add(&cap_relief)?;

        let reason = if cap_relief.is_positive() {
            ReasonCode::OopCapReached
        } else if patient_owed.is_zero() {
            ReasonCode::FullyCovered
        } else if deductible_applied.is_positive() {
            ReasonCode::Deductible
        } else if coinsurance_owed.is_positive() {
            ReasonCode::Coinsurance
        } else {
            ReasonCode::Copay
        };

        // Deductible credit is recorded in full even when the cap reduced
        // the owed amount; only oop_remaining reflects the clamp.
        let next = PlanState {
            deductible_remaining: state.deductible_remaining.checked_sub(&deductible_applied)?,
            oop_remaining: state.oop_remaining.saturating_sub(&patient_owed)?,
            ..state
        };

        let breakdown = LineBreakdown {
            service_code: line.service_code.clone(),
            visit_type: line.visit_type,
            denial_code: None,
            allowed: line.allowed,
            copay_owed,
            applied_to_deductible: deductible_applied,
            coinsurance_owed,
            patient_owed,
            plan_paid,
            reason,
        };
        Ok((breakdown, next))
    }

    fn sum_lines(
        lines: &[LineBreakdown],
        currency: core_kernel::Currency,
    ) -> Result<ClaimTotals, BenefitError> {
        let zero = Money::zero(currency);
        let mut totals = ClaimTotals {
            allowed: zero,
            copay_owed: zero,
            applied_to_deductible: zero,
            coinsurance_owed: zero,
            patient_owed: zero,
            plan_paid: zero,
        };
        for line in lines {
            totals.allowed = totals.allowed.checked_add(&line.allowed)?;
            totals.copay_owed = totals.copay_owed.checked_add(&line.copay_owed)?;
            totals.applied_to_deductible = totals
                .applied_to_deductible
                .checked_add(&line.applied_to_deductible)?;
            totals.coinsurance_owed = totals.coinsurance_owed.checked_add(&line.coinsurance_owed)?;
            totals.patient_owed = totals.patient_owed.checked_add(&line.patient_owed)?;
            totals.plan_paid = totals.plan_paid.checked_add(&line.plan_paid)?;
        }
        Ok(totals)
    }
}
