//! Benefit domain errors

use std::fmt;
use thiserror::Error;

use core_kernel::MoneyError;
use domain_claims::ClaimError;

/// Errors that can occur in the benefit domain
///
/// All variants are terminal for the call that raised them: validation runs
/// before any accumulation math, so a failed call never returns partial
/// results, and the engine performs no local recovery or retries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BenefitError {
    #[error("Claim error: {0}")]
    Claim(#[from] ClaimError),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Invalid {field} ({value}): {message}")]
    Validation {
        field: &'static str,
        value: String,
        message: &'static str,
    },

    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },
}

impl BenefitError {
    /// Creates a validation error carrying the offending field and value
    pub fn validation(
        field: &'static str,
        value: impl fmt::Display,
        message: &'static str,
    ) -> Self {
        BenefitError::Validation {
            field,
            value: value.to_string(),
            message,
        }
    }
}
