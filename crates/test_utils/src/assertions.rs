//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_benefits::AccumulationResult;
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than
/// the tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {money}",
    );
}

/// Asserts the conservation law over an accumulation result
///
/// For every non-denied line, patient_owed + plan_paid must equal the
/// allowed amount, both per line and in total.
pub fn assert_conservation(result: &AccumulationResult) {
    for (index, line) in result
        .lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.denial_code.is_none())
    {
        let shared = line.patient_owed + line.plan_paid;
        assert_eq!(
            shared, line.allowed,
            "Line {index} ({}) violates conservation: patient {} + plan {} != allowed {}",
            line.service_code, line.patient_owed, line.plan_paid, line.allowed
        );
    }
}

/// Asserts that accumulators only moved downward across an apply
pub fn assert_accumulators_monotonic(before: &domain_benefits::PlanState, result: &AccumulationResult) {
    let after = &result.plan_after;
    assert!(
        after.deductible_remaining.amount() <= before.deductible_remaining.amount(),
        "deductible_remaining increased: {} -> {}",
        before.deductible_remaining,
        after.deductible_remaining
    );
    assert!(
        after.oop_remaining.amount() <= before.oop_remaining.amount(),
        "oop_remaining increased: {} -> {}",
        before.oop_remaining,
        after.oop_remaining
    );
    assert!(
        !after.oop_remaining.is_negative(),
        "oop_remaining went negative: {}",
        after.oop_remaining
    );
}
