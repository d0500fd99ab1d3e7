//! Integration tests for kernel error types

use core_kernel::{CoreError, Currency, Money, MoneyError, PeriodError, PlanYear};
use rust_decimal_macros::dec;

#[test]
fn test_money_error_converts_to_core_error() {
    let usd = Money::new(dec!(100), Currency::USD);
    let eur = Money::new(dec!(100), Currency::EUR);

    let error: CoreError = usd.checked_add(&eur).unwrap_err().into();
    assert!(matches!(error, CoreError::Money(MoneyError::CurrencyMismatch(_, _))));
    assert!(error.to_string().contains("USD"));
}

#[test]
fn test_period_error_converts_to_core_error() {
    let error: CoreError = PlanYear::calendar(i32::MAX).unwrap_err().into();
    assert!(matches!(error, CoreError::Period(PeriodError::InvalidYear(_))));
}

#[test]
fn test_validation_helper() {
    let error = CoreError::validation("allowed exceeds billed");
    assert_eq!(error.to_string(), "Validation error: allowed exceeds billed");
}
