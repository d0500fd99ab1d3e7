//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the benefit
//! engine. These fixtures are designed to be consistent and predictable
//! for unit tests.

use chrono::NaiveDate;
use core_kernel::{Currency, DocId, Money, Rate};
use domain_benefits::{CopaySchedule, PlanState};
use domain_claims::{ClaimLineItem, ClaimRecord, DenialCode, VisitType};
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Creates a standard USD amount for testing
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    /// Creates a zero amount
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// Creates a EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for plan-state test data
pub struct PlanFixtures;

impl PlanFixtures {
    /// A mid-year plan: 500 of 1500 deductible left, 20% coinsurance,
    /// 2000 of 5000 OOP headroom, office and ER copays
    pub fn mid_year() -> PlanState {
        PlanState {
            deductible_individual: Money::new(dec!(1500), Currency::USD),
            deductible_remaining: Money::new(dec!(500), Currency::USD),
            coinsurance: Rate::new(dec!(0.2)),
            oop_max: Money::new(dec!(5000), Currency::USD),
            oop_remaining: Money::new(dec!(2000), Currency::USD),
            copays: CopaySchedule::none()
                .with_primary(Money::new(dec!(25), Currency::USD))
                .with_specialist(Money::new(dec!(50), Currency::USD))
                .with_er(Money::new(dec!(250), Currency::USD)),
        }
    }

    /// A fresh-year plan: nothing met yet, no copays
    pub fn fresh_year() -> PlanState {
        PlanState {
            deductible_individual: Money::new(dec!(1500), Currency::USD),
            deductible_remaining: Money::new(dec!(1500), Currency::USD),
            coinsurance: Rate::new(dec!(0.2)),
            oop_max: Money::new(dec!(5000), Currency::USD),
            oop_remaining: Money::new(dec!(5000), Currency::USD),
            copays: CopaySchedule::none(),
        }
    }

    /// A plan with the out-of-pocket maximum already met
    pub fn oop_met() -> PlanState {
        PlanState {
            deductible_individual: Money::new(dec!(1500), Currency::USD),
            deductible_remaining: Money::new(dec!(0), Currency::USD),
            coinsurance: Rate::new(dec!(0.2)),
            oop_max: Money::new(dec!(5000), Currency::USD),
            oop_remaining: Money::new(dec!(0), Currency::USD),
            copays: CopaySchedule::none(),
        }
    }
}

/// Fixture for claim test data
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Standard service date used by claim fixtures (April 8, 2024)
    pub fn service_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 8).unwrap()
    }

    /// A single specialist visit with a $1,000 allowed amount
    pub fn specialist_visit() -> ClaimRecord {
        ClaimRecord::new(
            DocId::new("eob-specialist").unwrap(),
            Self::service_date(),
            vec![ClaimLineItem::new(
                "99214",
                Money::new(dec!(1200), Currency::USD),
                Money::new(dec!(1000), Currency::USD),
                VisitType::Specialist,
            )],
        )
    }

    /// An ER visit with imaging and labs, three lines
    pub fn er_visit() -> ClaimRecord {
        ClaimRecord::new(
            DocId::new("eob-er").unwrap(),
            Self::service_date(),
            vec![
                ClaimLineItem::new(
                    "99285",
                    Money::new(dec!(2500), Currency::USD),
                    Money::new(dec!(1800), Currency::USD),
                    VisitType::Er,
                ),
                ClaimLineItem::new(
                    "71046",
                    Money::new(dec!(310), Currency::USD),
                    Money::new(dec!(98), Currency::USD),
                    VisitType::Other,
                ),
                ClaimLineItem::new(
                    "80053",
                    Money::new(dec!(120), Currency::USD),
                    Money::new(dec!(45), Currency::USD),
                    VisitType::Other,
                ),
            ],
        )
    }

    /// A physical-therapy claim with two bundled-denial lines
    pub fn partially_denied() -> ClaimRecord {
        ClaimRecord::new(
            DocId::new("eob-denied").unwrap(),
            Self::service_date(),
            vec![
                ClaimLineItem::new(
                    "99214",
                    Money::new(dec!(280), Currency::USD),
                    Money::new(dec!(165), Currency::USD),
                    VisitType::Specialist,
                ),
                ClaimLineItem::new(
                    "97110",
                    Money::new(dec!(300), Currency::USD),
                    Money::new(dec!(180), Currency::USD),
                    VisitType::Other,
                )
                .with_denial(DenialCode::new("CO-97")),
            ],
        )
    }
}
