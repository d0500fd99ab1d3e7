//! Plan-year (benefit period) handling
//!
//! Benefit accumulators live and die with a plan year: deductible and
//! out-of-pocket balances only decrease while the year is open and reset
//! when a new one starts. This module provides the calendar value object
//! the comparator and plan-state reset logic share.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to benefit-period operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid plan year: {0}")]
    InvalidYear(i32),
}

/// A calendar plan year for benefit accumulation
///
/// Most individual plans run on the calendar year; the start date is kept
/// explicit so off-cycle employer plans can be represented by their first
/// covered day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanYear {
    start: NaiveDate,
}

impl PlanYear {
    /// Creates a plan year starting January 1 of the given calendar year
    pub fn calendar(year: i32) -> Result<Self, PeriodError> {
        NaiveDate::from_ymd_opt(year, 1, 1)
            .map(|start| Self { start })
            .ok_or(PeriodError::InvalidYear(year))
    }

    /// Creates a plan year starting on the given date
    pub fn starting(start: NaiveDate) -> Self {
        Self { start }
    }

    /// Returns the plan year containing the given service date
    pub fn containing(date: NaiveDate) -> Self {
        // Safe: January 1 exists for every chrono-representable year.
        Self {
            start: NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap(),
        }
    }

    /// Returns the first covered day
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the first day of the following plan year
    pub fn end_exclusive(&self) -> NaiveDate {
        self.start
            .with_year(self.start.year() + 1)
            .unwrap_or(NaiveDate::MAX)
    }

    /// Returns true if the given service date falls inside this plan year
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end_exclusive()
    }

    /// Returns true if two service dates fall in the same plan year
    pub fn same_year(a: NaiveDate, b: NaiveDate) -> bool {
        PlanYear::containing(a) == PlanYear::containing(b)
    }
}
