//! Rationale statements for accumulation results
//!
//! Turns an [`AccumulationResult`] into the ordered, human-readable
//! statements a presentation layer shows next to the dollar amounts. One
//! statement per line item, in line order, plus a claim-level summary; the
//! text for each reason code comes from a fixed template, so identical
//! results always produce byte-identical statement sequences.

use serde::{Deserialize, Serialize};

use core_kernel::Money;
use domain_claims::VisitType;

use crate::accumulate::{AccumulationResult, LineBreakdown, ReasonCode};

/// One rationale statement
///
/// `service_code` is `None` for the final claim-level summary. Statement
/// order follows line order exactly; consumers (notably the comparator)
/// may rely on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub service_code: Option<String>,
    pub reason: ReasonCode,
    pub copay_owed: Money,
    pub applied_to_deductible: Money,
    pub coinsurance_owed: Money,
    pub patient_owed: Money,
    pub plan_paid: Money,
    pub text: String,
}

/// Explains an accumulation result, line by line
pub fn explain(result: &AccumulationResult) -> Vec<Statement> {
    let mut statements: Vec<Statement> = result.lines.iter().map(line_statement).collect();
    statements.push(summary_statement(result));
    statements
}

fn line_statement(line: &LineBreakdown) -> Statement {
    let text = match line.reason {
        ReasonCode::Copay => format!(
            "A flat {} copay applies to this {} visit; your plan paid {}.",
            line.copay_owed.round_to_currency(),
            visit_label(line.visit_type),
            line.plan_paid.round_to_currency(),
        ),
        ReasonCode::Deductible => format!(
            "You owe {} because this service applied to your remaining deductible; your plan paid {}.",
            line.patient_owed.round_to_currency(),
            line.plan_paid.round_to_currency(),
        ),
        ReasonCode::Coinsurance => format!(
            "Your deductible is met, so you owe {} in coinsurance; your plan paid {}.",
            line.patient_owed.round_to_currency(),
            line.plan_paid.round_to_currency(),
        ),
        ReasonCode::OopCapReached => format!(
            "Your out-of-pocket maximum was reached, so your share was capped at {}; your plan paid {}.",
            line.patient_owed.round_to_currency(),
            line.plan_paid.round_to_currency(),
        ),
        ReasonCode::Denied => {
            // denial_code is always present on Denied lines
            let code = line
                .denial_code
                .as_ref()
                .map(|c| c.to_string())
                .unwrap_or_default();
            format!(
                "The payer denied this line (code {code}); its {} allowed amount was excluded from deductible and coinsurance math pending review.",
                line.allowed.round_to_currency(),
            )
        }
        ReasonCode::FullyCovered => "This service was fully covered; you owe nothing.".to_string(),
    };

    Statement {
        service_code: Some(line.service_code.clone()),
        reason: line.reason,
        copay_owed: line.copay_owed,
        applied_to_deductible: line.applied_to_deductible,
        coinsurance_owed: line.coinsurance_owed,
        patient_owed: line.patient_owed,
        plan_paid: line.plan_paid,
        text,
    }
}

fn summary_statement(result: &AccumulationResult) -> Statement {
    let totals = &result.totals;
    let text = format!(
        "Across {} line(s), you owe {} of the {} allowed; your plan paid {}.",
        result.lines.len(),
        totals.patient_owed.round_to_currency(),
        totals.allowed.round_to_currency(),
        totals.plan_paid.round_to_currency(),
    );

    Statement {
        service_code: None,
        reason: dominant_reason(result),
        copay_owed: totals.copay_owed,
        applied_to_deductible: totals.applied_to_deductible,
        coinsurance_owed: totals.coinsurance_owed,
        patient_owed: totals.patient_owed,
        plan_paid: totals.plan_paid,
        text,
    }
}

/// Picks the claim-level reason: the line reason carrying the most patient
/// dollars, ties to the earlier line. A claim where nothing is owed reads
/// `OopCapReached` if the cap did the work, otherwise `FullyCovered`.
fn dominant_reason(result: &AccumulationResult) -> ReasonCode {
    if result.totals.patient_owed.is_zero() {
        if result
            .lines
            .iter()
            .any(|l| l.reason == ReasonCode::OopCapReached)
        {
            return ReasonCode::OopCapReached;
        }
        return ReasonCode::FullyCovered;
    }

    let mut best = ReasonCode::FullyCovered;
    let mut best_amount = None;
    for line in &result.lines {
        let owed = line.patient_owed.amount();
        if best_amount.map_or(true, |current| owed > current) {
            best = line.reason;
            best_amount = Some(owed);
        }
    }
    best
}

fn visit_label(visit_type: VisitType) -> &'static str {
    match visit_type {
        VisitType::Primary => "primary care",
        VisitType::Specialist => "specialist",
        VisitType::Er => "emergency room",
        VisitType::Other => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{Currency, DocId, Rate};
    use domain_claims::{ClaimLineItem, ClaimRecord};
    use rust_decimal_macros::dec;

    use crate::accumulate::BenefitEngine;
    use crate::plan::{CopaySchedule, PlanState};

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    fn result_for(lines: Vec<ClaimLineItem>) -> AccumulationResult {
        let plan = PlanState {
            deductible_individual: usd(dec!(1500)),
            deductible_remaining: usd(dec!(500)),
            coinsurance: Rate::new(dec!(0.2)),
            oop_max: usd(dec!(5000)),
            oop_remaining: usd(dec!(2000)),
            copays: CopaySchedule::none().with_primary(usd(dec!(25))),
        };
        let claim = ClaimRecord::new(
            DocId::new("eob-ex").unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 8).unwrap(),
            lines,
        );
        BenefitEngine::new().apply(&claim, &plan).unwrap()
    }

    #[test]
    fn test_one_statement_per_line_plus_summary() {
        let result = result_for(vec![
            ClaimLineItem::new("99214", usd(dec!(1200)), usd(dec!(1000)), VisitType::Specialist),
            ClaimLineItem::new("80053", usd(dec!(120)), usd(dec!(0)), VisitType::Other),
        ]);

        let statements = explain(&result);
        assert_eq!(statements.len(), 3);
        assert_eq!(statements[0].service_code.as_deref(), Some("99214"));
        assert_eq!(statements[1].service_code.as_deref(), Some("80053"));
        assert_eq!(statements[1].reason, ReasonCode::FullyCovered);
        assert!(statements[2].service_code.is_none());
    }

    #[test]
    fn test_statement_text_carries_amounts() {
        let result = result_for(vec![ClaimLineItem::new(
            "99214",
            usd(dec!(1200)),
            usd(dec!(1000)),
            VisitType::Specialist,
        )]);

        let statements = explain(&result);
        assert_eq!(statements[0].reason, ReasonCode::Deductible);
        assert!(statements[0].text.contains("$600.00"));
        assert!(statements[0].text.contains("$400.00"));
    }

    #[test]
    fn test_explain_is_deterministic() {
        let result = result_for(vec![
            ClaimLineItem::new("99213", usd(dec!(200)), usd(dec!(125)), VisitType::Primary),
            ClaimLineItem::new("99214", usd(dec!(1200)), usd(dec!(1000)), VisitType::Specialist),
        ]);

        let first = explain(&result);
        let second = explain(&result);

        assert_eq!(first, second);
        let json_a = serde_json::to_vec(&first).unwrap();
        let json_b = serde_json::to_vec(&second).unwrap();
        assert_eq!(json_a, json_b);
    }

    #[test]
    fn test_summary_reason_follows_dollars() {
        let result = result_for(vec![
            ClaimLineItem::new("99213", usd(dec!(200)), usd(dec!(125)), VisitType::Primary),
            ClaimLineItem::new("99214", usd(dec!(1200)), usd(dec!(1000)), VisitType::Specialist),
        ]);

        let statements = explain(&result);
        // The specialist line's 600 dominates the office visit's 125
        assert_eq!(statements.last().unwrap().reason, ReasonCode::Deductible);
    }
}
