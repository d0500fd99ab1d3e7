//! Claim record aggregate

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, DocId, Money};
use crate::denial::DenialCode;
use crate::error::ClaimError;

/// Visit type for a claim line
///
/// Drives copay lookup: plans define flat copays for office and emergency
/// visits. `Other` covers labs, imaging, facility fees, and anything else a
/// copay schedule does not address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitType {
    Primary,
    Specialist,
    Er,
    Other,
}

/// A single adjudicated service line from an EOB
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimLineItem {
    /// Procedure / service code as printed on the EOB (e.g., a CPT code)
    pub service_code: String,
    /// Amount the provider billed
    pub billed: Money,
    /// Contracted amount the plan recognizes; never exceeds billed
    pub allowed: Money,
    /// Visit type, used for copay lookup
    pub visit_type: VisitType,
    /// Denial code, when the payer refused the line
    pub denial_code: Option<DenialCode>,
}

impl ClaimLineItem {
    /// Creates a paid (non-denied) line item
    pub fn new(
        service_code: impl Into<String>,
        billed: Money,
        allowed: Money,
        visit_type: VisitType,
    ) -> Self {
        Self {
            service_code: service_code.into(),
            billed,
            allowed,
            visit_type,
            denial_code: None,
        }
    }

    /// Attaches a denial code
    pub fn with_denial(mut self, code: DenialCode) -> Self {
        self.denial_code = Some(code);
        self
    }

    /// Returns true if the payer denied this line
    pub fn is_denied(&self) -> bool {
        self.denial_code.is_some()
    }

    fn validate(&self, index: usize, currency: Currency) -> Result<(), ClaimError> {
        if self.service_code.trim().is_empty() {
            return Err(ClaimError::MissingServiceCode { line: index });
        }
        if self.billed.is_negative() {
            return Err(ClaimError::NegativeAmount {
                line: index,
                field: "billed",
                value: self.billed.amount(),
            });
        }
        if self.allowed.is_negative() {
            return Err(ClaimError::NegativeAmount {
                line: index,
                field: "allowed",
                value: self.allowed.amount(),
            });
        }
        if self.billed.currency() != currency || self.allowed.currency() != currency {
            return Err(ClaimError::CurrencyDrift { line: index });
        }
        if self.allowed.amount() > self.billed.amount() {
            return Err(ClaimError::AllowedExceedsBilled {
                line: index,
                allowed: self.allowed.amount(),
                billed: self.billed.amount(),
            });
        }
        Ok(())
    }
}

/// A parsed EOB document: ordered line items plus claim-level facts
///
/// Supplied per request by the extraction collaborator; the engine never
/// caches or owns records across calls. Line order is preserved exactly as
/// extracted and is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Unique document identifier
    pub doc_id: DocId,
    /// Date of service for the claim
    pub claim_date: NaiveDate,
    /// Line items in document order
    pub lines: Vec<ClaimLineItem>,
}

impl ClaimRecord {
    /// Creates a claim record
    pub fn new(doc_id: DocId, claim_date: NaiveDate, lines: Vec<ClaimLineItem>) -> Self {
        Self {
            doc_id,
            claim_date,
            lines,
        }
    }

    /// Returns the currency the claim is denominated in
    ///
    /// Taken from the first line; [`validate`](Self::validate) enforces
    /// that every line agrees.
    pub fn currency(&self) -> Option<Currency> {
        self.lines.first().map(|line| line.billed.currency())
    }

    /// Returns the line items the payer denied, with their positions
    pub fn denied_lines(&self) -> impl Iterator<Item = (usize, &ClaimLineItem)> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_denied())
    }

    /// Returns true if any line carries a denial code
    pub fn has_denials(&self) -> bool {
        self.lines.iter().any(ClaimLineItem::is_denied)
    }

    /// Validates the record's shape before any benefit math runs
    ///
    /// Checks every line for negative amounts, allowed exceeding billed,
    /// missing service codes, and currency drift across lines. Runs at the
    /// boundary of each public operation; a record that fails here never
    /// reaches the accumulator.
    pub fn validate(&self) -> Result<(), ClaimError> {
        if self.lines.is_empty() {
            return Err(ClaimError::EmptyClaim {
                doc_id: self.doc_id.to_string(),
            });
        }
        // currency() is Some: lines is non-empty past the guard above
        let currency = self.currency().unwrap();
        for (index, line) in self.lines.iter().enumerate() {
            line.validate(index, currency)?;
        }
        tracing::debug!(doc_id = %self.doc_id, lines = self.lines.len(), "claim validated");
        Ok(())
    }
}
