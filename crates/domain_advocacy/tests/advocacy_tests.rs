//! Comprehensive tests for domain_advocacy

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, DocId, Money, Rate};
use domain_benefits::{
    explain, AccumulationResult, BenefitEngine, CopaySchedule, PlanState, ReasonCode, Statement,
};
use domain_claims::{ClaimLineItem, ClaimRecord, DenialCode, VisitType};

use domain_advocacy::{compare, AdvocacyError, AppealDrafter, Audience, Tone};

fn usd(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

fn plan(
    deductible_remaining: rust_decimal::Decimal,
    oop_remaining: rust_decimal::Decimal,
) -> PlanState {
    PlanState {
        deductible_individual: usd(dec!(1500)),
        deductible_remaining: usd(deductible_remaining),
        coinsurance: Rate::new(dec!(0.2)),
        oop_max: usd(dec!(5000)),
        oop_remaining: usd(oop_remaining),
        copays: CopaySchedule::none(),
    }
}

fn claim(doc_id: &str, date: (i32, u32, u32), lines: Vec<ClaimLineItem>) -> ClaimRecord {
    ClaimRecord::new(
        DocId::new(doc_id).unwrap(),
        NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        lines,
    )
}

fn explained(
    record: &ClaimRecord,
    state: &PlanState,
) -> (AccumulationResult, Vec<Statement>) {
    let result = BenefitEngine::new().apply(record, state).unwrap();
    let statements = explain(&result);
    (result, statements)
}

// ============================================================================
// Comparator Tests
// ============================================================================

mod compare_tests {
    use super::*;

    #[test]
    fn test_aligned_delta_and_path_change() {
        // Same service, different accumulator positions: deductible on one
        // side, pure coinsurance on the other.
        let claim_a = claim(
            "eob-a",
            (2024, 2, 1),
            vec![ClaimLineItem::new("99214", usd(dec!(1200)), usd(dec!(1000)), VisitType::Specialist)],
        );
        let claim_b = claim(
            "eob-b",
            (2024, 9, 12),
            vec![ClaimLineItem::new("99214", usd(dec!(1200)), usd(dec!(1000)), VisitType::Specialist)],
        );

        let (result_a, _) = explained(&claim_a, &plan(dec!(500), dec!(2000)));
        let (result_b, _) = explained(&claim_b, &plan(dec!(0), dec!(2000)));

        let report = compare(&claim_a, &result_a, &claim_b, &result_b).unwrap();

        assert_eq!(report.aligned.len(), 1);
        let aligned = &report.aligned[0];
        assert_eq!(aligned.service_code, "99214");
        assert_eq!(aligned.patient_owed_a, usd(dec!(600)));
        assert_eq!(aligned.patient_owed_b, usd(dec!(200)));
        assert_eq!(aligned.delta, usd(dec!(-400)));
        assert_eq!(aligned.reason_a, ReasonCode::Deductible);
        assert_eq!(aligned.reason_b, ReasonCode::Coinsurance);
        assert!(aligned.path_changed());
        assert!(report.unique_to_a.is_empty());
        assert!(report.unique_to_b.is_empty());
        assert!(report.caveats.is_empty());
    }

    #[test]
    fn test_symmetry() {
        let claim_a = claim(
            "eob-a",
            (2024, 2, 1),
            vec![
                ClaimLineItem::new("99214", usd(dec!(1200)), usd(dec!(1000)), VisitType::Specialist),
                ClaimLineItem::new("80053", usd(dec!(120)), usd(dec!(45)), VisitType::Other),
            ],
        );
        let claim_b = claim(
            "eob-b",
            (2024, 9, 12),
            vec![
                ClaimLineItem::new("99214", usd(dec!(1100)), usd(dec!(900)), VisitType::Specialist),
                ClaimLineItem::new("71046", usd(dec!(310)), usd(dec!(98)), VisitType::Other),
            ],
        );

        let (result_a, _) = explained(&claim_a, &plan(dec!(500), dec!(2000)));
        let (result_b, _) = explained(&claim_b, &plan(dec!(0), dec!(2000)));

        let forward = compare(&claim_a, &result_a, &claim_b, &result_b).unwrap();
        let backward = compare(&claim_b, &result_b, &claim_a, &result_a).unwrap();

        let codes_forward: Vec<_> = forward.aligned.iter().map(|a| &a.service_code).collect();
        let codes_backward: Vec<_> = backward.aligned.iter().map(|a| &a.service_code).collect();
        assert_eq!(codes_forward, codes_backward);

        for (f, b) in forward.aligned.iter().zip(backward.aligned.iter()) {
            assert_eq!(f.delta, -b.delta);
        }
        assert_eq!(forward.total_delta, -backward.total_delta);
        assert_eq!(forward.unique_to_a, backward.unique_to_b);
        assert_eq!(forward.unique_to_b, backward.unique_to_a);
    }

    #[test]
    fn test_zero_overlap_is_not_an_error() {
        let claim_a = claim(
            "eob-a",
            (2024, 2, 1),
            vec![ClaimLineItem::new("99213", usd(dec!(220)), usd(dec!(140)), VisitType::Primary)],
        );
        let claim_b = claim(
            "eob-b",
            (2024, 3, 1),
            vec![ClaimLineItem::new("80053", usd(dec!(120)), usd(dec!(45)), VisitType::Other)],
        );

        let (result_a, _) = explained(&claim_a, &plan(dec!(500), dec!(2000)));
        let (result_b, _) = explained(&claim_b, &plan(dec!(500), dec!(2000)));

        let report = compare(&claim_a, &result_a, &claim_b, &result_b).unwrap();

        assert!(report.aligned.is_empty());
        assert_eq!(report.unique_to_a.len(), 1);
        assert_eq!(report.unique_to_b.len(), 1);
    }

    #[test]
    fn test_cross_plan_year_caveat() {
        let claim_a = claim(
            "eob-a",
            (2023, 11, 20),
            vec![ClaimLineItem::new("99214", usd(dec!(1200)), usd(dec!(1000)), VisitType::Specialist)],
        );
        let claim_b = claim(
            "eob-b",
            (2024, 1, 15),
            vec![ClaimLineItem::new("99214", usd(dec!(1200)), usd(dec!(1000)), VisitType::Specialist)],
        );

        let (result_a, _) = explained(&claim_a, &plan(dec!(500), dec!(2000)));
        let (result_b, _) = explained(&claim_b, &plan(dec!(500), dec!(2000)));

        let report = compare(&claim_a, &result_a, &claim_b, &result_b).unwrap();

        assert_eq!(report.caveats.len(), 1);
        assert!(report.caveats[0].contains("different plan years"));
        // Still a full report
        assert_eq!(report.aligned.len(), 1);
    }

    #[test]
    fn test_currency_mismatch_is_incompatible() {
        let claim_a = claim(
            "eob-a",
            (2024, 2, 1),
            vec![ClaimLineItem::new("99213", usd(dec!(220)), usd(dec!(140)), VisitType::Primary)],
        );
        let claim_b = claim(
            "eob-b",
            (2024, 3, 1),
            vec![ClaimLineItem::new(
                "99213",
                Money::new(dec!(220), Currency::EUR),
                Money::new(dec!(140), Currency::EUR),
                VisitType::Primary,
            )],
        );

        let eur_plan = PlanState {
            deductible_individual: Money::new(dec!(1500), Currency::EUR),
            deductible_remaining: Money::new(dec!(500), Currency::EUR),
            coinsurance: Rate::new(dec!(0.2)),
            oop_max: Money::new(dec!(5000), Currency::EUR),
            oop_remaining: Money::new(dec!(2000), Currency::EUR),
            copays: CopaySchedule::none(),
        };

        let (result_a, _) = explained(&claim_a, &plan(dec!(500), dec!(2000)));
        let (result_b, _) = explained(&claim_b, &eur_plan);

        let err = compare(&claim_a, &result_a, &claim_b, &result_b).unwrap_err();
        assert!(matches!(err, AdvocacyError::IncompatibleComparison { .. }));
    }

    #[test]
    fn test_duplicate_codes_aggregate() {
        let claim_a = claim(
            "eob-a",
            (2024, 2, 1),
            vec![
                ClaimLineItem::new("97110", usd(dec!(150)), usd(dec!(100)), VisitType::Other),
                ClaimLineItem::new("97110", usd(dec!(150)), usd(dec!(100)), VisitType::Other),
            ],
        );
        let claim_b = claim(
            "eob-b",
            (2024, 3, 1),
            vec![ClaimLineItem::new("97110", usd(dec!(150)), usd(dec!(100)), VisitType::Other)],
        );

        // Deductible swallows everything on both sides
        let (result_a, _) = explained(&claim_a, &plan(dec!(1500), dec!(5000)));
        let (result_b, _) = explained(&claim_b, &plan(dec!(1500), dec!(5000)));

        let report = compare(&claim_a, &result_a, &claim_b, &result_b).unwrap();

        assert_eq!(report.aligned.len(), 1);
        assert_eq!(report.aligned[0].patient_owed_a, usd(dec!(200)));
        assert_eq!(report.aligned[0].patient_owed_b, usd(dec!(100)));
        assert_eq!(report.aligned[0].delta, usd(dec!(-100)));
    }
}

// ============================================================================
// Appeal Drafter Tests
// ============================================================================

mod appeal_tests {
    use super::*;

    fn denied_claim() -> ClaimRecord {
        claim(
            "eob-d",
            (2024, 4, 8),
            vec![
                ClaimLineItem::new("99214", usd(dec!(1200)), usd(dec!(1000)), VisitType::Specialist),
                ClaimLineItem::new("97110", usd(dec!(300)), usd(dec!(180)), VisitType::Other)
                    .with_denial(DenialCode::new("CO-97")),
                ClaimLineItem::new("97112", usd(dec!(250)), usd(dec!(150)), VisitType::Other)
                    .with_denial(DenialCode::new("CO-97")),
                ClaimLineItem::new("J3301", usd(dec!(90)), usd(dec!(60)), VisitType::Other)
                    .with_denial(DenialCode::new("XY-999")),
            ],
        )
    }

    #[test]
    fn test_clean_claim_fails_with_no_denial_found() {
        let clean = claim(
            "eob-clean",
            (2024, 4, 8),
            vec![ClaimLineItem::new("99213", usd(dec!(220)), usd(dec!(140)), VisitType::Primary)],
        );
        let (_, statements) = explained(&clean, &plan(dec!(500), dec!(2000)));

        let err = AppealDrafter::new().draft(&clean, &statements).unwrap_err();
        assert_eq!(
            err,
            AdvocacyError::NoDenialFound {
                doc_id: "eob-clean".to_string()
            }
        );
    }

    #[test]
    fn test_packet_facts_and_distinct_arguments() {
        let record = denied_claim();
        let (_, statements) = explained(&record, &plan(dec!(500), dec!(2000)));

        let packet = AppealDrafter::new().draft(&record, &statements).unwrap();

        // 180 + 150 + 60 across the three denied lines
        assert_eq!(packet.total_disputed, usd(dec!(390)));
        // CO-97 appears twice but argues once; XY-999 falls back to generic
        assert_eq!(packet.arguments.len(), 2);
        assert_eq!(packet.arguments[0].denial_code, DenialCode::new("CO-97"));
        assert_eq!(packet.arguments[1].denial_code, DenialCode::new("XY-999"));
        assert_eq!(
            packet.arguments[1].title,
            "Request for itemized justification"
        );
        // Denied-line statements carried as supporting analysis
        assert_eq!(packet.evidence.len(), 3);
        assert!(packet
            .evidence
            .iter()
            .all(|s| s.reason == ReasonCode::Denied));
    }

    #[test]
    fn test_render_is_byte_identical_across_calls() {
        let record = denied_claim();
        let (_, statements) = explained(&record, &plan(dec!(500), dec!(2000)));
        let drafter = AppealDrafter::new();

        let first = drafter.draft(&record, &statements).unwrap();
        let second = drafter.draft(&record, &statements).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.render().into_bytes(), second.render().into_bytes());
    }

    #[test]
    fn test_render_contains_header_facts() {
        let record = denied_claim();
        let (_, statements) = explained(&record, &plan(dec!(500), dec!(2000)));

        let letter = AppealDrafter::new().draft(&record, &statements).unwrap().render();

        assert!(letter.contains("Subject: Appeal for claim eob-d"));
        assert!(letter.contains("Date of service: 2024-04-08"));
        assert!(letter.contains("Amount in dispute: $390.00"));
        assert!(letter.contains("To the Appeals Team,"));
        assert!(letter.ends_with("Sincerely,\nPatient Advocate"));
    }

    #[test]
    fn test_tone_and_audience_select_templates() {
        let record = denied_claim();
        let (_, statements) = explained(&record, &plan(dec!(500), dec!(2000)));

        let firm = AppealDrafter::new()
            .with_tone(Tone::Firm)
            .with_audience(Audience::Provider)
            .draft(&record, &statements)
            .unwrap();

        assert!(firm.opening.contains("formal dispute"));
        assert!(firm.greeting.contains("Provider Billing Office"));
        assert!(firm.closing.contains("corrective action plan"));
    }
}
