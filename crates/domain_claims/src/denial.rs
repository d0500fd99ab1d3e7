//! Denial codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// A payer denial code attached to a claim line
///
/// Codes follow the CARC convention (group prefix plus number, e.g.
/// `CO-97`, `PR-204`) but arrive as free text from extraction, so they are
/// normalized to uppercase and otherwise kept verbatim. The appeal
/// drafter's template table matches on the normalized form and falls back
/// to a generic argument for codes it does not recognize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DenialCode(String);

impl DenialCode {
    /// Creates a denial code, trimming whitespace and normalizing case
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    /// Returns the normalized code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DenialCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(DenialCode::new(" co-97 ").as_str(), "CO-97");
        assert_eq!(DenialCode::new("PR-204"), DenialCode::new("pr-204"));
    }
}
