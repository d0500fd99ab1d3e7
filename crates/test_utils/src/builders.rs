//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant
//! fields while using defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{Currency, DocId, Money, Rate};
use domain_benefits::{CopaySchedule, PlanState};
use domain_claims::{ClaimLineItem, ClaimRecord, DenialCode, VisitType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builder for constructing plan states
pub struct PlanStateBuilder {
    deductible_individual: Money,
    deductible_remaining: Money,
    coinsurance: Rate,
    oop_max: Money,
    oop_remaining: Money,
    copays: CopaySchedule,
}

impl Default for PlanStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanStateBuilder {
    /// Creates a builder with a fresh-year default plan
    pub fn new() -> Self {
        Self {
            deductible_individual: Money::new(dec!(1500), Currency::USD),
            deductible_remaining: Money::new(dec!(1500), Currency::USD),
            coinsurance: Rate::new(dec!(0.2)),
            oop_max: Money::new(dec!(5000), Currency::USD),
            oop_remaining: Money::new(dec!(5000), Currency::USD),
            copays: CopaySchedule::none(),
        }
    }

    /// Sets the annual deductible, resetting the remaining balance to match
    pub fn with_deductible(mut self, amount: Decimal) -> Self {
        self.deductible_individual = Money::new(amount, Currency::USD);
        self.deductible_remaining = self.deductible_individual;
        self
    }

    /// Sets the remaining deductible
    pub fn with_deductible_remaining(mut self, amount: Decimal) -> Self {
        self.deductible_remaining = Money::new(amount, Currency::USD);
        self
    }

    /// Sets the coinsurance rate
    pub fn with_coinsurance(mut self, rate: Decimal) -> Self {
        self.coinsurance = Rate::new(rate);
        self
    }

    /// Sets the out-of-pocket maximum, resetting the remaining balance to match
    pub fn with_oop_max(mut self, amount: Decimal) -> Self {
        self.oop_max = Money::new(amount, Currency::USD);
        self.oop_remaining = self.oop_max;
        self
    }

    /// Sets the remaining out-of-pocket headroom
    pub fn with_oop_remaining(mut self, amount: Decimal) -> Self {
        self.oop_remaining = Money::new(amount, Currency::USD);
        self
    }

    /// Sets the copay schedule
    pub fn with_copays(mut self, copays: CopaySchedule) -> Self {
        self.copays = copays;
        self
    }

    /// Builds the plan state
    pub fn build(self) -> PlanState {
        PlanState {
            deductible_individual: self.deductible_individual,
            deductible_remaining: self.deductible_remaining,
            coinsurance: self.coinsurance,
            oop_max: self.oop_max,
            oop_remaining: self.oop_remaining,
            copays: self.copays,
        }
    }
}

/// Builder for constructing claim records
pub struct ClaimRecordBuilder {
    doc_id: DocId,
    claim_date: NaiveDate,
    lines: Vec<ClaimLineItem>,
}

impl Default for ClaimRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimRecordBuilder {
    /// Creates a builder with a default doc id and date and no lines
    pub fn new() -> Self {
        Self {
            doc_id: DocId::new("eob-test").unwrap(),
            claim_date: NaiveDate::from_ymd_opt(2024, 4, 8).unwrap(),
            lines: Vec::new(),
        }
    }

    /// Sets the document id
    pub fn with_doc_id(mut self, doc_id: &str) -> Self {
        self.doc_id = DocId::new(doc_id).expect("doc id must be non-empty");
        self
    }

    /// Sets the claim date
    pub fn with_claim_date(mut self, date: NaiveDate) -> Self {
        self.claim_date = date;
        self
    }

    /// Appends a line item
    pub fn with_line(mut self, line: ClaimLineItem) -> Self {
        self.lines.push(line);
        self
    }

    /// Appends a simple non-denied line
    pub fn with_service(
        mut self,
        service_code: &str,
        billed: Decimal,
        allowed: Decimal,
        visit_type: VisitType,
    ) -> Self {
        self.lines.push(ClaimLineItem::new(
            service_code,
            Money::new(billed, Currency::USD),
            Money::new(allowed, Currency::USD),
            visit_type,
        ));
        self
    }

    /// Appends a denied line
    pub fn with_denied_service(
        mut self,
        service_code: &str,
        billed: Decimal,
        allowed: Decimal,
        code: &str,
    ) -> Self {
        self.lines.push(
            ClaimLineItem::new(
                service_code,
                Money::new(billed, Currency::USD),
                Money::new(allowed, Currency::USD),
                VisitType::Other,
            )
            .with_denial(DenialCode::new(code)),
        );
        self
    }

    /// Builds the claim record
    pub fn build(self) -> ClaimRecord {
        ClaimRecord::new(self.doc_id, self.claim_date, self.lines)
    }
}
