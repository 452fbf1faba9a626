//! Workflow orchestrator.
//!
//! Sequences framework lookup → compliance/mastery evaluation → plan/gate
//! decision → next-stage naming for one orchestration request. Every method
//! is a pure function of the loaded framework snapshot and its explicit
//! arguments: the orchestrator holds no mutable state, issues no network
//! calls, and can serve distinct classes fully in parallel.
//!
//! Emitted request payloads ([`ComplianceEvaluation`], [`PlanDecision`],
//! [`GateOutcome`]) are handed to the caller for dispatch through a
//! [`classcheck_llm::ContentBackend`] or a platform connector; the
//! orchestrator itself never executes a stage.

use tracing::info;

use classcheck_framework::CompetencyFramework;
use classcheck_gate::{GateOutcome, check_and_prepare};
use classcheck_mastery::{
    ComplianceEvaluation, ComplianceVerdict, DEFAULT_MASTERY_THRESHOLD, MasteryReport,
    collective_mastery_ratio, evaluate_compliance, verdict_from_response,
};
use classcheck_plan::{PlanDecision, ProgressSignal, select_plan};
use classcheck_types::error::{ClasscheckError, CompetencyNotFound, ConfigError, WorkflowError};
use classcheck_types::{ClassRoster, EngineConfig, StudentRecord};
use classcheck_workflow::{StageTransition, WorkflowState};

/// The competency mastery orchestration engine.
///
/// Owns the framework snapshot loaded at construction and the collective
/// mastery threshold; everything else arrives per call.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    framework: CompetencyFramework,
    threshold: f64,
}

impl Orchestrator {
    /// Create an orchestrator over an already-loaded framework.
    #[must_use]
    pub fn new(framework: CompetencyFramework, threshold: f64) -> Self {
        Self {
            framework,
            threshold,
        }
    }

    /// Create an orchestrator with the default 90% threshold.
    #[must_use]
    pub fn with_default_threshold(framework: CompetencyFramework) -> Self {
        Self::new(framework, DEFAULT_MASTERY_THRESHOLD)
    }

    /// Build an orchestrator from configuration, loading the framework from
    /// the configured path.
    ///
    /// # Errors
    ///
    /// Fails when no framework path is configured, or when the framework
    /// source is unreadable or structurally invalid. No partial framework
    /// is ever used.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ClasscheckError> {
        let path = config
            .framework
            .path
            .as_deref()
            .ok_or_else(|| ConfigError::Invalid {
                field: "framework.path".to_string(),
                reason: "a framework source path is required".to_string(),
            })?;

        let framework = CompetencyFramework::load_path(path)?;
        info!(
            path,
            competencies = framework.competency_count(),
            threshold = config.mastery.threshold,
            "orchestrator ready"
        );

        Ok(Self::new(framework, config.mastery.threshold))
    }

    /// The loaded framework snapshot.
    #[must_use]
    pub fn framework(&self) -> &CompetencyFramework {
        &self.framework
    }

    /// The collective mastery threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start a compliance check of content against one competency.
    ///
    /// An unknown id yields the final `Unresolved` verdict immediately; no
    /// request is built and nothing is dispatched.
    #[must_use]
    pub fn evaluate_compliance(&self, content: &str, competency_id: &str) -> ComplianceEvaluation {
        evaluate_compliance(&self.framework, content, competency_id)
    }

    /// Turn the service's raw compliance answer into a verdict.
    #[must_use]
    pub fn compliance_verdict(&self, competency_id: &str, raw: &str) -> ComplianceVerdict {
        verdict_from_response(competency_id, raw)
    }

    /// Compute the collective mastery report for one competency.
    #[must_use]
    pub fn mastery_report(&self, roster: &ClassRoster, competency_id: &str) -> MasteryReport {
        collective_mastery_ratio(roster, competency_id, self.threshold)
    }

    /// Select the next pedagogical action for one student.
    ///
    /// # Errors
    ///
    /// [`CompetencyNotFound`] when the id does not resolve; no partial
    /// request is emitted.
    pub fn plan_for_student(
        &self,
        student: &StudentRecord,
        competency_id: &str,
        signal: &ProgressSignal,
    ) -> Result<PlanDecision, CompetencyNotFound> {
        select_plan(&self.framework, student, competency_id, signal)
    }

    /// Run the collective validation gate for one competency.
    #[must_use]
    pub fn review_class(
        &self,
        roster: &ClassRoster,
        competency_id: &str,
        class_level: &str,
    ) -> GateOutcome {
        check_and_prepare(roster, competency_id, self.threshold, class_level)
    }

    /// Name the next workflow stage from the declared sequence and the
    /// completed-stage description.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::UnrecognizedStage`] when the description matches no
    /// declared stage unambiguously; orchestration halts rather than
    /// guessing a successor.
    pub fn next_stage<S: Into<String>>(
        &self,
        stages: impl IntoIterator<Item = S>,
        completed: impl Into<String>,
    ) -> Result<StageTransition, WorkflowError> {
        WorkflowState::new(stages, completed).next_stage()
    }
}
