//! Core Kernel - Foundational types for the benefit engine
//!
//! This crate provides the building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Plan-year (benefit period) handling
//! - Strongly-typed identifiers for documents and sessions
//! - Port traits for the storage and extraction collaborators

pub mod money;
pub mod plan_year;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Currency, MoneyError, Rate};
pub use plan_year::{PlanYear, PeriodError};
pub use identifiers::{SessionId, DocId};
pub use ports::{DomainPort, PortError};
pub use error::CoreError;
