//! Plan-benefit state

use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, Rate};
use domain_claims::VisitType;
use crate::error::BenefitError;

/// Flat copays by visit type
///
/// A missing entry means the plan has no copay for that visit type and the
/// line goes straight to deductible/coinsurance math. `Other` lines (labs,
/// imaging, facility fees) never carry a copay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopaySchedule {
    pub primary: Option<Money>,
    pub specialist: Option<Money>,
    pub er: Option<Money>,
}

impl CopaySchedule {
    /// A schedule with no copays at all
    pub fn none() -> Self {
        Self::default()
    }

    /// Sets the primary-care copay
    pub fn with_primary(mut self, copay: Money) -> Self {
        self.primary = Some(copay);
        self
    }

    /// Sets the specialist copay
    pub fn with_specialist(mut self, copay: Money) -> Self {
        self.specialist = Some(copay);
        self
    }

    /// Sets the emergency-room copay
    pub fn with_er(mut self, copay: Money) -> Self {
        self.er = Some(copay);
        self
    }

    /// Returns the copay for a visit type, if the plan defines one
    pub fn copay_for(&self, visit_type: VisitType) -> Option<Money> {
        match visit_type {
            VisitType::Primary => self.primary,
            VisitType::Specialist => self.specialist,
            VisitType::Er => self.er,
            VisitType::Other => None,
        }
    }

    fn entries(&self) -> impl Iterator<Item = (&'static str, Money)> {
        [
            ("copays.primary", self.primary),
            ("copays.specialist", self.specialist),
            ("copays.er", self.er),
        ]
        .into_iter()
        .filter_map(|(field, copay)| copay.map(|c| (field, c)))
    }
}

/// Snapshot of a patient's benefit-year accumulators
///
/// Immutable by convention: the engine never mutates a supplied state, it
/// returns a fresh post-claim snapshot. Over the life of a plan year the
/// remaining balances only decrease as claims apply; [`reset`](Self::reset)
/// is the one explicit operation that restores them. The deductible and
/// out-of-pocket accumulators are independent, but OOP spend includes
/// deductible and coinsurance paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanState {
    /// Annual individual deductible
    pub deductible_individual: Money,
    /// Deductible still to be met this plan year
    pub deductible_remaining: Money,
    /// Patient's share of allowed amounts once the deductible is met
    pub coinsurance: Rate,
    /// Annual out-of-pocket maximum
    pub oop_max: Money,
    /// Out-of-pocket headroom left this plan year
    pub oop_remaining: Money,
    /// Flat copays by visit type
    pub copays: CopaySchedule,
}

impl PlanState {
    /// Returns the currency the plan is denominated in
    pub fn currency(&self) -> Currency {
        self.deductible_individual.currency()
    }

    /// Returns cumulative out-of-pocket spend so far this plan year
    pub fn oop_spent(&self) -> Money {
        // validate() guarantees remaining <= max in one currency
        self.oop_max - self.oop_remaining
    }

    /// Restores both accumulators to their annual totals
    ///
    /// The plan-year rollover is the only event that may increase a
    /// remaining balance.
    pub fn reset(&self) -> PlanState {
        PlanState {
            deductible_remaining: self.deductible_individual,
            oop_remaining: self.oop_max,
            ..self.clone()
        }
    }

    /// Validates range invariants and currency consistency
    ///
    /// Runs at the boundary of every public operation; a state that fails
    /// here never reaches the accumulator math.
    pub fn validate(&self) -> Result<(), BenefitError> {
        let currency = self.currency();

        let amounts = [
            ("deductible_individual", &self.deductible_individual),
            ("deductible_remaining", &self.deductible_remaining),
            ("oop_max", &self.oop_max),
            ("oop_remaining", &self.oop_remaining),
        ];
        for (field, amount) in amounts {
            if amount.is_negative() {
                return Err(BenefitError::validation(
                    field,
                    amount.amount(),
                    "must be non-negative",
                ));
            }
            if amount.currency() != currency {
                return Err(BenefitError::validation(
                    field,
                    amount.currency(),
                    "currency differs from the rest of the plan",
                ));
            }
        }

        if self.deductible_remaining.amount() > self.deductible_individual.amount() {
            return Err(BenefitError::validation(
                "deductible_remaining",
                self.deductible_remaining.amount(),
                "exceeds the annual deductible",
            ));
        }
        if self.oop_remaining.amount() > self.oop_max.amount() {
            return Err(BenefitError::validation(
                "oop_remaining",
                self.oop_remaining.amount(),
                "exceeds the out-of-pocket maximum",
            ));
        }
        if !self.coinsurance.is_unit_interval() {
            return Err(BenefitError::validation(
                "coinsurance",
                self.coinsurance.as_decimal(),
                "must lie between 0 and 1",
            ));
        }

        for (field, copay) in self.copays.entries() {
            if copay.is_negative() {
                return Err(BenefitError::validation(
                    field,
                    copay.amount(),
                    "must be non-negative",
                ));
            }
            if copay.currency() != currency {
                return Err(BenefitError::validation(
                    field,
                    copay.currency(),
                    "currency differs from the rest of the plan",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    fn base_plan() -> PlanState {
        PlanState {
            deductible_individual: usd(dec!(1500)),
            deductible_remaining: usd(dec!(500)),
            coinsurance: Rate::new(dec!(0.2)),
            oop_max: usd(dec!(5000)),
            oop_remaining: usd(dec!(2000)),
            copays: CopaySchedule::none()
                .with_primary(usd(dec!(25)))
                .with_er(usd(dec!(250))),
        }
    }

    #[test]
    fn test_valid_plan_passes() {
        assert!(base_plan().validate().is_ok());
    }

    #[test]
    fn test_remaining_cannot_exceed_total() {
        let mut plan = base_plan();
        plan.deductible_remaining = usd(dec!(2000));

        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("deductible_remaining"));
    }

    #[test]
    fn test_coinsurance_out_of_range() {
        let mut plan = base_plan();
        plan.coinsurance = Rate::new(dec!(1.5));

        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("coinsurance"));
    }

    #[test]
    fn test_negative_copay_rejected() {
        let mut plan = base_plan();
        plan.copays.specialist = Some(usd(dec!(-50)));

        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("copays.specialist"));
    }

    #[test]
    fn test_copay_lookup() {
        let plan = base_plan();

        assert_eq!(plan.copays.copay_for(VisitType::Primary), Some(usd(dec!(25))));
        assert_eq!(plan.copays.copay_for(VisitType::Specialist), None);
        assert_eq!(plan.copays.copay_for(VisitType::Other), None);
    }

    #[test]
    fn test_oop_spent() {
        assert_eq!(base_plan().oop_spent(), usd(dec!(3000)));
    }

    #[test]
    fn test_reset_restores_annual_totals() {
        let plan = base_plan().reset();

        assert_eq!(plan.deductible_remaining, usd(dec!(1500)));
        assert_eq!(plan.oop_remaining, usd(dec!(5000)));
        // Everything else is untouched
        assert_eq!(plan.coinsurance, Rate::new(dec!(0.2)));
    }
}
