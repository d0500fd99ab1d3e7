//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::NaiveDate;
use core_kernel::{Currency, Money, Rate};
use domain_benefits::{CopaySchedule, PlanState};
use domain_claims::{ClaimLineItem, ClaimRecord, VisitType};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::builders::ClaimRecordBuilder;

/// Strategy for generating valid positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    0i64..1_000_000_00i64
}

/// Strategy for generating valid USD Money values
pub fn usd_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|amount| Money::from_minor(amount, Currency::USD))
}

/// Strategy for generating coinsurance rates in [0, 1]
pub fn coinsurance_strategy() -> impl Strategy<Value = Rate> {
    (0u32..=10_000u32).prop_map(|bp| Rate::new(Decimal::new(bp as i64, 4)))
}

/// Strategy for generating visit types
pub fn visit_type_strategy() -> impl Strategy<Value = VisitType> {
    prop_oneof![
        Just(VisitType::Primary),
        Just(VisitType::Specialist),
        Just(VisitType::Er),
        Just(VisitType::Other),
    ]
}

/// Strategy for generating valid plan states
///
/// Remaining balances never exceed their annual totals, and the coinsurance
/// rate stays in the unit interval, so every generated state passes
/// `PlanState::validate`.
pub fn plan_state_strategy() -> impl Strategy<Value = PlanState> {
    (
        0i64..500_000i64,
        0i64..1_000_000i64,
        coinsurance_strategy(),
        proptest::option::of(0i64..10_000i64),
    )
        .prop_flat_map(|(deductible, oop_max, coinsurance, primary_copay)| {
            (
                Just(deductible),
                0i64..=deductible,
                Just(oop_max),
                0i64..=oop_max,
                Just(coinsurance),
                Just(primary_copay),
            )
        })
        .prop_map(
            |(deductible, ded_remaining, oop_max, oop_remaining, coinsurance, primary_copay)| {
                let mut copays = CopaySchedule::none();
                if let Some(copay) = primary_copay {
                    copays = copays.with_primary(Money::from_minor(copay, Currency::USD));
                }
                PlanState {
                    deductible_individual: Money::from_minor(deductible, Currency::USD),
                    deductible_remaining: Money::from_minor(ded_remaining, Currency::USD),
                    coinsurance,
                    oop_max: Money::from_minor(oop_max, Currency::USD),
                    oop_remaining: Money::from_minor(oop_remaining, Currency::USD),
                    copays,
                }
            },
        )
}

/// Strategy for generating a valid claim line (allowed never exceeds billed)
pub fn claim_line_strategy() -> impl Strategy<Value = ClaimLineItem> {
    (
        "[0-9]{5}",
        positive_amount_minor_strategy(),
        visit_type_strategy(),
    )
        .prop_flat_map(|(code, billed, visit_type)| {
            (Just(code), Just(billed), 0i64..=billed, Just(visit_type))
        })
        .prop_map(|(code, billed, allowed, visit_type)| {
            ClaimLineItem::new(
                code,
                Money::from_minor(billed, Currency::USD),
                Money::from_minor(allowed, Currency::USD),
                visit_type,
            )
        })
}

/// Strategy for generating valid claim records (1 to 8 lines)
pub fn claim_record_strategy() -> impl Strategy<Value = ClaimRecord> {
    (
        proptest::collection::vec(claim_line_strategy(), 1..8),
        0u32..364u32,
    )
        .prop_map(|(lines, day_offset)| {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                + chrono::Duration::days(day_offset as i64);
            let mut builder = ClaimRecordBuilder::new().with_claim_date(date);
            for line in lines {
                builder = builder.with_line(line);
            }
            builder.build()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_plan_states_are_valid(plan in plan_state_strategy()) {
            prop_assert!(plan.validate().is_ok());
        }

        #[test]
        fn generated_claims_are_valid(claim in claim_record_strategy()) {
            prop_assert!(claim.validate().is_ok());
        }
    }
}
