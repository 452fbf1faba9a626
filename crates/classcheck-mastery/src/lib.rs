//! Mastery evaluator
//!
//! Computes per-student compliance verdicts and per-class mastery ratios
//! against a threshold. Every operation is a pure function of the framework
//! snapshot and roster snapshot it receives: nothing here mutates shared
//! state or caches results, so distinct evaluations can run in parallel
//! without coordination.
//!
//! Compliance checking is split across the external dispatch boundary:
//! [`evaluate_compliance`] builds the structured request (or short-circuits
//! with an `Unresolved` verdict), the caller dispatches it, and
//! [`verdict_from_response`] turns the raw answer into a
//! [`ComplianceVerdict`].

mod evaluator;
mod verdict;

pub use evaluator::{
    ComplianceEvaluation, ComplianceRequest, DEFAULT_MASTERY_THRESHOLD, collective_mastery_ratio,
    evaluate_compliance, verdict_from_response,
};
pub use verdict::{ComplianceLabel, ComplianceVerdict, MasteryReport};
