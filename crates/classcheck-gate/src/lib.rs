//! Collective validation gate
//!
//! Aggregates class-wide mastery for one competency and decides whether a
//! collective validation assessment is warranted. The gate only certifies
//! the decision and supplies the leveling context; the assessment's concrete
//! form (QCM, short problem, case study) is left to the content-generation
//! service, and the dispatch itself to the caller.
//!
//! The mastery report is recomputed from the roster at every call — no
//! ratio is ever cached across evaluations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use classcheck_llm::GenerationRequest;
use classcheck_mastery::{MasteryReport, collective_mastery_ratio};
use classcheck_types::ClassRoster;

const ASSESSMENT_ROLE: &str =
    "Vous êtes un ingénieur pédagogique spécialisé dans la création d'évaluations collectives.";

/// Request for a collective validation assessment, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectiveAssessmentRequest {
    /// The competency to validate collectively.
    pub competency_id: String,
    /// General class level used to calibrate the assessment (e.g. "moyen").
    pub class_level: String,
    /// The structured prompt.
    pub generation: GenerationRequest,
}

/// Decision of the collective validation gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateOutcome {
    /// The mastery threshold is met; collective validation is warranted.
    Validate {
        request: CollectiveAssessmentRequest,
        report: MasteryReport,
    },
    /// The threshold is not met. Carries the current report so the caller
    /// can decide on further remediation cycles instead.
    BelowThreshold { report: MasteryReport },
}

impl GateOutcome {
    /// Whether the gate decided in favour of collective validation.
    #[must_use]
    pub fn is_validated(&self) -> bool {
        matches!(self, Self::Validate { .. })
    }

    /// The mastery report behind the decision, whichever way it went.
    #[must_use]
    pub fn report(&self) -> &MasteryReport {
        match self {
            Self::Validate { report, .. } | Self::BelowThreshold { report } => report,
        }
    }
}

/// Evaluate the gate for one competency.
///
/// Computes the collective mastery report and, when the threshold is met
/// (closed lower bound), prepares the assessment request with the given
/// class level.
#[must_use]
pub fn check_and_prepare(
    roster: &ClassRoster,
    competency_id: &str,
    threshold: f64,
    class_level: &str,
) -> GateOutcome {
    let report = collective_mastery_ratio(roster, competency_id, threshold);

    debug!(
        competency_id,
        ratio = report.ratio,
        threshold,
        validated = report.threshold_met,
        "collective validation gate evaluated"
    );

    if !report.threshold_met {
        return GateOutcome::BelowThreshold { report };
    }

    let user_prompt = format!(
        "En tant qu'ingénieur pédagogique, créez un devoir de validation collective pour la \
         compétence avec l'ID '{competency_id}'.\n\
         Le niveau général de la classe est '{class_level}'.\n\
         Le devoir doit être concis, pertinent et permettre de valider rapidement la maîtrise \
         de la compétence par l'ensemble de la classe.\n\
         Il peut prendre la forme d'un QCM, d'un problème court ou d'une étude de cas simple."
    );

    GateOutcome::Validate {
        request: CollectiveAssessmentRequest {
            competency_id: competency_id.to_string(),
            class_level: class_level.to_string(),
            generation: GenerationRequest::new(ASSESSMENT_ROLE, user_prompt),
        },
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classcheck_mastery::DEFAULT_MASTERY_THRESHOLD;
    use classcheck_types::{MasteryState, StudentRecord};

    fn roster_with_mastered(mastered: usize, total: usize) -> ClassRoster {
        ClassRoster::new(
            (0..total)
                .map(|i| {
                    let state = if i < mastered {
                        MasteryState::Mastered
                    } else {
                        MasteryState::InProgress
                    };
                    StudentRecord::new(format!("s-{i:03}"), format!("Élève {i}"))
                        .with_state("D1.3", state)
                })
                .collect(),
        )
    }

    #[test]
    fn threshold_met_prepares_an_assessment() {
        let roster = roster_with_mastered(9, 10);
        let outcome = check_and_prepare(&roster, "D1.3", DEFAULT_MASTERY_THRESHOLD, "moyen");

        assert!(outcome.is_validated());
        let GateOutcome::Validate { request, report } = outcome else {
            unreachable!();
        };
        assert_eq!(request.competency_id, "D1.3");
        assert_eq!(request.class_level, "moyen");
        assert!(request.generation.user_prompt.contains("'D1.3'"));
        assert!(request.generation.user_prompt.contains("'moyen'"));
        assert!((report.ratio - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn below_threshold_carries_the_current_ratio() {
        let roster = roster_with_mastered(8, 10);
        let outcome = check_and_prepare(&roster, "D1.3", DEFAULT_MASTERY_THRESHOLD, "moyen");

        assert!(!outcome.is_validated());
        let GateOutcome::BelowThreshold { report } = outcome else {
            unreachable!();
        };
        assert!((report.ratio - 0.8).abs() < f64::EPSILON);
        assert_eq!(report.mastered, 8);
        assert_eq!(report.total, 10);
    }

    #[test]
    fn empty_roster_never_validates() {
        let outcome = check_and_prepare(&ClassRoster::empty(), "D1.3", 0.0, "moyen");
        assert!(!outcome.is_validated());
        assert_eq!(outcome.report().ratio, 0.0);
    }
}
