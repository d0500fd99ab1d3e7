//! Patient Advocacy Domain
//!
//! Built on top of the accumulation engine's output, this crate answers two
//! questions a patient asks after reading an explained claim:
//!
//! - "How does this claim differ from that one?" — [`compare`]
//! - "The payer denied part of this; how do I push back?" — [`AppealDrafter`]
//!
//! Both operations are pure and deterministic: comparing the same inputs or
//! drafting the same appeal twice yields identical output, byte for byte.

pub mod compare;
pub mod appeal;
pub mod error;

pub use compare::{compare, AlignedService, ComparisonReport, ServiceSummary};
pub use appeal::{AppealArgument, AppealDrafter, AppealPacket, Audience, Tone};
pub use error::AdvocacyError;
