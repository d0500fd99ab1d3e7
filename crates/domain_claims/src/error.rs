//! Claim domain errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by claim-shape validation
///
/// Every variant names the offending line and field so callers can surface
/// exactly what the extraction collaborator got wrong.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("Claim {doc_id} has no line items")]
    EmptyClaim { doc_id: String },

    #[error("Line {line}: service code is missing")]
    MissingServiceCode { line: usize },

    #[error("Line {line}: {field} is negative ({value})")]
    NegativeAmount {
        line: usize,
        field: &'static str,
        value: Decimal,
    },

    #[error("Line {line}: allowed amount {allowed} exceeds billed amount {billed}")]
    AllowedExceedsBilled {
        line: usize,
        allowed: Decimal,
        billed: Decimal,
    },

    #[error("Line {line}: currency differs from the rest of the claim")]
    CurrencyDrift { line: usize },
}
