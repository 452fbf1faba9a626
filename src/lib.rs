//! classcheck — competency mastery orchestration engine
//!
//! Checks pedagogical content against a structured competency framework,
//! tracks whether a class has collectively mastered a competency, and
//! decides the next pedagogical action: remediate, enrich, or collectively
//! validate.
//!
//! The engine is deliberately narrow. It loads a framework once, evaluates
//! mastery from roster snapshots, and emits *structured requests* — prompt
//! payloads for a content-generation service, or platform action payloads —
//! for the hosting application to dispatch. It never generates text itself,
//! never talks to a platform directly, and persists nothing across calls.
//!
//! # Workspace
//!
//! | crate | concern |
//! |-------|---------|
//! | [`classcheck_framework`] | framework loading, validation, indexed lookup |
//! | [`classcheck_mastery`] | compliance verdicts and mastery ratios |
//! | [`classcheck_plan`] | remediation/enrichment selection |
//! | [`classcheck_gate`] | collective validation gate |
//! | [`classcheck_workflow`] | deterministic stage sequencing |
//! | [`classcheck_llm`] | content-generation service boundary |
//! | [`classcheck_connectors`] | platform connector payloads |
//!
//! # Example
//!
//! ```
//! use classcheck::{Orchestrator, ClassRoster, StudentRecord, MasteryState};
//! use classcheck_framework::CompetencyFramework;
//!
//! let framework = CompetencyFramework::load(r#"
//! referentiels:
//!   - competences:
//!       - id: "D1.3"
//!         name: "Résolution de problèmes géométriques"
//!         description: "Appliquer les théorèmes de géométrie plane"
//!         indicateurs: ["Applique le théorème de Pythagore"]
//! "#).unwrap();
//!
//! let orchestrator = Orchestrator::with_default_threshold(framework);
//! let roster = ClassRoster::new(vec![
//!     StudentRecord::new("s-001", "Alice").with_state("D1.3", MasteryState::Mastered),
//! ]);
//!
//! let outcome = orchestrator.review_class(&roster, "D1.3", "moyen");
//! assert!(outcome.is_validated());
//! ```

mod orchestrator;

pub use orchestrator::Orchestrator;

/// Platform connector payloads and dispatch interfaces, re-exported for
/// hosting applications. The engine itself never calls these.
pub use classcheck_connectors as connectors;

pub use classcheck_framework::{Competency, CompetencyFramework, Domain};
pub use classcheck_gate::{CollectiveAssessmentRequest, GateOutcome};
pub use classcheck_llm::{ContentBackend, GenerationRequest, GenerationResult};
pub use classcheck_mastery::{
    ComplianceEvaluation, ComplianceLabel, ComplianceRequest, ComplianceVerdict,
    DEFAULT_MASTERY_THRESHOLD, MasteryReport,
};
pub use classcheck_plan::{EnrichmentRequest, PlanDecision, ProgressSignal, RemediationRequest};
pub use classcheck_types::error::{
    ClasscheckError, CompetencyNotFound, ConfigError, ConnectorError, FrameworkError, LlmError,
    MasteryError, WorkflowError,
};
pub use classcheck_types::{ClassRoster, EngineConfig, MasteryState, StudentRecord};
pub use classcheck_workflow::{StageTransition, WorkflowState};
