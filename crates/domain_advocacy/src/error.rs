//! Advocacy domain errors

use thiserror::Error;

use core_kernel::MoneyError;
use domain_claims::ClaimError;

/// Errors that can occur in the advocacy domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdvocacyError {
    #[error("Claim error: {0}")]
    Claim(#[from] ClaimError),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// An appeal was requested for a claim with no denial codes
    #[error("No denial codes found on claim {doc_id}; there is nothing to appeal")]
    NoDenialFound { doc_id: String },

    /// The two claims cannot be compared (currency or unit mismatch)
    ///
    /// Claims from different plan years are still comparable; they produce
    /// a caveat in the report, never this error.
    #[error("Claims are not comparable: {left} vs {right}")]
    IncompatibleComparison { left: String, right: String },
}
