//! Use cases - everything request-side code does with the rules engine.
//!
//! All of them reach the engine through [`Mechanics`] or the
//! [`RulesEngine`](chronicler_domain::RulesEngine) contract, never through a
//! concrete system.

pub mod bench;
pub mod contract;
pub mod mechanics;
pub mod narration;

pub use bench::BenchReport;
pub use contract::{ContractReport, ContractViolation};
pub use mechanics::{CheckOutcome, Mechanics};
pub use narration::{ProcessedNarration, ResolvedRoll, RollRequest};
