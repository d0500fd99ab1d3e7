//! Appeal packet drafting
//!
//! Maps the denial codes present on a claim to argument templates and
//! assembles an appeal packet: header facts, one argument block per
//! distinct code, supporting rationale from the explainer, and closing
//! boilerplate. The template table is typed and total — codes it does not
//! recognize get a generic "request itemized justification" argument
//! instead of failing — and assembly is idempotent: drafting the same
//! claim twice yields byte-identical text.

use serde::{Deserialize, Serialize};

use chrono::NaiveDate;
use core_kernel::{DocId, Money};
use domain_benefits::{ReasonCode, Statement};
use domain_claims::{ClaimRecord, DenialCode};

use crate::error::AdvocacyError;

/// Letter tone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Polite,
    Firm,
}

impl Tone {
    fn opening(&self) -> &'static str {
        match self {
            Tone::Polite => {
                "I am writing to request a careful review of the enclosed claim determination."
            }
            Tone::Firm => {
                "This letter lodges a formal dispute of the enclosed claim determination based on the evidence below."
            }
        }
    }

    fn closing(&self) -> &'static str {
        match self {
            Tone::Polite => "Thank you for your time and prompt attention to this matter.",
            Tone::Firm => {
                "Please respond with a corrective action plan within the timeframe required by regulation."
            }
        }
    }
}

/// Letter recipient
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    #[default]
    Payer,
    Provider,
}

impl Audience {
    fn greeting(&self) -> &'static str {
        match self {
            Audience::Payer => "To the Appeals Team",
            Audience::Provider => "To the Provider Billing Office",
        }
    }
}

struct DenialTemplate {
    title: &'static str,
    argument: &'static str,
    evidence: &'static [&'static str],
}

/// Fallback for codes the table does not recognize
static GENERIC: DenialTemplate = DenialTemplate {
    title: "Request for itemized justification",
    argument: "The cited denial code is not accompanied by an itemized rationale. Please provide the specific policy provision, the adjudication rule applied, and the calculation supporting this determination so the denial can be evaluated on its merits.",
    evidence: &["Itemized bill", "Full adjudication detail for the denied lines"],
};

/// Returns the argument template for a denial code
///
/// Keyed on CARC codes. The table is intentionally open: unknown codes get
/// the generic template, so drafting is total over any claim.
fn template_for(code: &DenialCode) -> &'static DenialTemplate {
    match code.as_str() {
        "CO-16" => &DenialTemplate {
            title: "Denial for missing information",
            argument: "The claim was denied for lacking information rather than on its merits. The requested information is identified and enclosed; please reprocess the claim with the complete record.",
            evidence: &["Completed claim form", "Referral or order from the treating provider"],
        },
        "CO-18" => &DenialTemplate {
            title: "Duplicate-claim denial in error",
            argument: "This service was denied as a duplicate, but the enclosed documentation shows a distinct service encounter. Please reprocess the line as an original, payable service.",
            evidence: &["Visit notes distinguishing the encounters", "Prior EOB showing the separately paid service"],
        },
        "CO-29" => &DenialTemplate {
            title: "Timely-filing denial with proof of submission",
            argument: "The claim was denied for untimely filing. The enclosed submission records show the claim was filed within the contractual window; the denial should be reversed and the claim adjudicated on its merits.",
            evidence: &["Clearinghouse acceptance report", "Original submission confirmation with date"],
        },
        "CO-50" => &DenialTemplate {
            title: "Medical necessity established by the treating provider",
            argument: "The service was denied as not medically necessary. The treating provider's records document the clinical indication and the failure of conservative alternatives; under the plan's own medical policy this service meets the necessity standard.",
            evidence: &["Letter of medical necessity", "Clinical notes and test results", "Applicable plan medical policy"],
        },
        "CO-97" => &DenialTemplate {
            title: "Service incorrectly bundled into another payment",
            argument: "The denied service was treated as included in the payment for another service. The enclosed coding references show the service is separately identifiable and separately payable under correct coding conventions; please reprocess with the appropriate modifier recognized.",
            evidence: &["Operative or procedure notes", "NCCI edit reference for the code pair"],
        },
        "PR-204" => &DenialTemplate {
            title: "Service is within the plan's covered benefits",
            argument: "The service was denied as not covered under the plan. The enclosed benefit documents list this category of service as covered; the denial appears to rest on a benefit-mapping error rather than a plan exclusion.",
            evidence: &["Summary of benefits and coverage", "Plan document pages for the relevant benefit category"],
        },
        _ => &GENERIC,
    }
}

/// One argument block in the packet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealArgument {
    pub denial_code: DenialCode,
    pub title: String,
    pub argument: String,
    pub suggested_evidence: Vec<String>,
}

/// An assembled appeal packet
///
/// Plain structured data for the presentation layer; [`render`](Self::render)
/// produces the letter body. Contains no clocks and no generated ids, so
/// repeated drafts of the same claim are byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealPacket {
    pub doc_id: DocId,
    pub claim_date: NaiveDate,
    /// Sum of the denied lines' allowed amounts
    pub total_disputed: Money,
    pub greeting: String,
    pub opening: String,
    pub arguments: Vec<AppealArgument>,
    /// Explainer statements for the denied lines, as supporting analysis
    pub evidence: Vec<Statement>,
    pub closing: String,
}

impl AppealPacket {
    /// Renders the packet as a letter body
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        lines.push(format!("Subject: Appeal for claim {}", self.doc_id));
        lines.push(String::new());
        lines.push(format!("{},", self.greeting));
        lines.push(String::new());
        lines.push(self.opening.clone());
        lines.push(String::new());
        lines.push("Claim facts:".to_string());
        lines.push(format!("- Document: {}", self.doc_id));
        lines.push(format!("- Date of service: {}", self.claim_date));
        lines.push(format!(
            "- Amount in dispute: {}",
            self.total_disputed.round_to_currency()
        ));

        for argument in &self.arguments {
            lines.push(String::new());
            lines.push(format!("{} (code {})", argument.title, argument.denial_code));
            lines.push(argument.argument.clone());
            lines.push("Suggested evidence:".to_string());
            for item in &argument.suggested_evidence {
                lines.push(format!("- {item}"));
            }
        }

        if !self.evidence.is_empty() {
            lines.push(String::new());
            lines.push("Supporting analysis:".to_string());
            for statement in &self.evidence {
                lines.push(format!("- {}", statement.text));
            }
        }

        lines.push(String::new());
        lines.push(self.closing.clone());
        lines.push(String::new());
        lines.push("Sincerely,".to_string());
        lines.push("Patient Advocate".to_string());

        lines.join("\n")
    }
}

/// Drafts appeal packets from denied claims
#[derive(Debug, Clone, Copy, Default)]
pub struct AppealDrafter {
    tone: Tone,
    audience: Audience,
}

impl AppealDrafter {
    /// Creates a drafter with the default polite/payer templates
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the letter tone
    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    /// Sets the letter audience
    pub fn with_audience(mut self, audience: Audience) -> Self {
        self.audience = audience;
        self
    }

    /// Drafts an appeal packet for a claim
    ///
    /// `statements` is the explainer output for the claim; the denied-line
    /// statements are carried into the packet as supporting analysis.
    ///
    /// # Errors
    ///
    /// `NoDenialFound` when no line carries a denial code: an appeal cannot
    /// be drafted for a fully-paid claim.
    pub fn draft(
        &self,
        claim: &ClaimRecord,
        statements: &[Statement],
    ) -> Result<AppealPacket, AdvocacyError> {
        claim.validate()?;

        if !claim.has_denials() {
            return Err(AdvocacyError::NoDenialFound {
                doc_id: claim.doc_id.to_string(),
            });
        }

        // currency() is Some after validation
        let currency = claim.currency().unwrap();
        let mut total_disputed = Money::zero(currency);
        let mut codes: Vec<DenialCode> = Vec::new();
        for (_, line) in claim.denied_lines() {
            total_disputed = total_disputed.checked_add(&line.allowed)?;
            // denial_code is Some for every denied line
            let code = line.denial_code.clone().unwrap();
            if !codes.contains(&code) {
                codes.push(code);
            }
        }

        let arguments = codes
            .into_iter()
            .map(|code| {
                let template = template_for(&code);
                AppealArgument {
                    denial_code: code,
                    title: template.title.to_string(),
                    argument: template.argument.to_string(),
                    suggested_evidence: template
                        .evidence
                        .iter()
                        .map(|e| e.to_string())
                        .collect(),
                }
            })
            .collect();

        let evidence = statements
            .iter()
            .filter(|s| s.reason == ReasonCode::Denied && s.service_code.is_some())
            .cloned()
            .collect();

        tracing::debug!(doc_id = %claim.doc_id, disputed = %total_disputed, "appeal drafted");

        Ok(AppealPacket {
            doc_id: claim.doc_id.clone(),
            claim_date: claim.claim_date,
            total_disputed,
            greeting: self.audience.greeting().to_string(),
            opening: self.tone.opening().to_string(),
            arguments,
            evidence,
            closing: self.tone.closing().to_string(),
        })
    }
}
