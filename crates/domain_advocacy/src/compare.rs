//! Structural and financial claim comparison
//!
//! Aligns two explained claims by service code and reports, per shared
//! code, how the patient's share moved and whether the accumulation path
//! changed (e.g., a line that hit the deductible on one claim and plain
//! coinsurance on the other). Codes present on only one side are listed
//! separately; two claims with no shared codes still produce a valid
//! report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use core_kernel::{DocId, Money, PlanYear};
use domain_benefits::{AccumulationResult, LineBreakdown, ReasonCode};
use domain_claims::ClaimRecord;

use crate::error::AdvocacyError;

/// A service code present on both claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedService {
    pub service_code: String,
    /// Patient share on the first claim (summed across lines with this code)
    pub patient_owed_a: Money,
    /// Patient share on the second claim
    pub patient_owed_b: Money,
    /// Signed change, second minus first
    pub delta: Money,
    /// Dominant reason on the first claim
    pub reason_a: ReasonCode,
    /// Dominant reason on the second claim
    pub reason_b: ReasonCode,
}

impl AlignedService {
    /// Returns true if the accumulation path differed between the claims
    pub fn path_changed(&self) -> bool {
        self.reason_a != self.reason_b
    }
}

/// A service code present on only one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub service_code: String,
    pub patient_owed: Money,
}

/// The full diff between two explained claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub doc_id_a: DocId,
    pub doc_id_b: DocId,
    /// Shared service codes, sorted by code
    pub aligned: Vec<AlignedService>,
    /// Codes only on the first claim, sorted by code
    pub unique_to_a: Vec<ServiceSummary>,
    /// Codes only on the second claim, sorted by code
    pub unique_to_b: Vec<ServiceSummary>,
    /// Total patient-share change, second minus first
    pub total_delta: Money,
    /// Non-fatal observations (e.g., claims from different plan years)
    pub caveats: Vec<String>,
}

/// Compares two claims and their accumulation results
///
/// Both results are expected to come from running the engine (and, for
/// reason codes, the accumulation that feeds the explainer) over the
/// respective claims, possibly against different plan states.
///
/// # Errors
///
/// `IncompatibleComparison` when the claims are denominated in different
/// currencies. A plan-year mismatch is a caveat in the report, not an
/// error.
pub fn compare(
    claim_a: &ClaimRecord,
    result_a: &AccumulationResult,
    claim_b: &ClaimRecord,
    result_b: &AccumulationResult,
) -> Result<ComparisonReport, AdvocacyError> {
    claim_a.validate()?;
    claim_b.validate()?;

    let currency_a = result_a.totals.patient_owed.currency();
    let currency_b = result_b.totals.patient_owed.currency();
    if currency_a != currency_b {
        return Err(AdvocacyError::IncompatibleComparison {
            left: currency_a.to_string(),
            right: currency_b.to_string(),
        });
    }

    let by_code_a = group_by_code(result_a);
    let by_code_b = group_by_code(result_b);

    let mut aligned = Vec::new();
    let mut unique_to_a = Vec::new();
    for (code, lines_a) in &by_code_a {
        match by_code_b.get(code) {
            Some(lines_b) => aligned.push(AlignedService {
                service_code: code.clone(),
                patient_owed_a: summed_owed(lines_a, currency_a)?,
                patient_owed_b: summed_owed(lines_b, currency_a)?,
                delta: summed_owed(lines_b, currency_a)?
                    .checked_sub(&summed_owed(lines_a, currency_a)?)?,
                reason_a: dominant_reason(lines_a),
                reason_b: dominant_reason(lines_b),
            }),
            None => unique_to_a.push(ServiceSummary {
                service_code: code.clone(),
                patient_owed: summed_owed(lines_a, currency_a)?,
            }),
        }
    }
    let unique_to_b = by_code_b
        .iter()
        .filter(|(code, _)| !by_code_a.contains_key(*code))
        .map(|(code, lines)| {
            Ok(ServiceSummary {
                service_code: code.clone(),
                patient_owed: summed_owed(lines, currency_a)?,
            })
        })
        .collect::<Result<Vec<_>, AdvocacyError>>()?;

    let mut caveats = Vec::new();
    if !PlanYear::same_year(claim_a.claim_date, claim_b.claim_date) {
        caveats.push(format!(
            "Claims fall in different plan years ({} vs {}); accumulator positions are not directly comparable.",
            claim_a.claim_date, claim_b.claim_date,
        ));
    }

    let total_delta = result_b
        .totals
        .patient_owed
        .checked_sub(&result_a.totals.patient_owed)?;

    tracing::debug!(
        doc_a = %claim_a.doc_id,
        doc_b = %claim_b.doc_id,
        aligned = aligned.len(),
        "claims compared"
    );

    Ok(ComparisonReport {
        doc_id_a: claim_a.doc_id.clone(),
        doc_id_b: claim_b.doc_id.clone(),
        aligned,
        unique_to_a,
        unique_to_b,
        total_delta,
        caveats,
    })
}

/// Groups breakdown lines by service code, sorted by code
fn group_by_code(result: &AccumulationResult) -> BTreeMap<String, Vec<&LineBreakdown>> {
    let mut map: BTreeMap<String, Vec<&LineBreakdown>> = BTreeMap::new();
    for line in &result.lines {
        map.entry(line.service_code.clone()).or_default().push(line);
    }
    map
}

fn summed_owed(
    lines: &[&LineBreakdown],
    currency: core_kernel::Currency,
) -> Result<Money, AdvocacyError> {
    let mut total = Money::zero(currency);
    for line in lines {
        total = total.checked_add(&line.patient_owed)?;
    }
    Ok(total)
}

/// Dominant reason across lines sharing a code: most patient dollars wins,
/// ties go to the earliest line
fn dominant_reason(lines: &[&LineBreakdown]) -> ReasonCode {
    let mut best = lines[0].reason;
    let mut best_amount = lines[0].patient_owed.amount();
    for line in &lines[1..] {
        if line.patient_owed.amount() > best_amount {
            best = line.reason;
            best_amount = line.patient_owed.amount();
        }
    }
    best
}
