//! Plan selector
//!
//! Given one student, one competency and a progress signal, decides whether
//! the next pedagogical action is a remediation plan or an enrichment plan,
//! and assembles the structured prompt payload for it. Exactly one request
//! kind comes out of a call — never both — and an unresolved competency id
//! produces an error with no partial request.
//!
//! The selector has no side effects: generation and delivery of the actual
//! plan text happen outside the engine.

use serde::{Deserialize, Serialize};
use tracing::debug;

use classcheck_framework::CompetencyFramework;
use classcheck_llm::GenerationRequest;
use classcheck_types::error::CompetencyNotFound;
use classcheck_types::{MasteryState, StudentRecord};

const REMEDIATION_ROLE: &str = "Vous êtes un tuteur IA expert en pédagogie.";
const ENRICHMENT_ROLE: &str =
    "Vous êtes un tuteur IA expert en pédagogie et en développement de talents.";

/// Placeholder used when the student record carries no display name.
const STUDENT_FALLBACK: &str = "cet élève";

/// What the caller knows about the student's progress on the competency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressSignal {
    /// A teacher or upstream analysis identified concrete gaps.
    IdentifiedGaps(String),
    /// Only the tracked mastery state is known.
    State(MasteryState),
}

/// Request for corrective material targeting identified gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationRequest {
    /// Student display name, or the fallback placeholder.
    pub student_name: String,
    /// The competency the plan targets.
    pub competency_id: String,
    /// Competency display name.
    pub competency_name: String,
    /// Competency description.
    pub competency_description: String,
    /// Description of the gaps the plan should close.
    pub gap_description: String,
    /// The structured prompt, ready for dispatch.
    pub generation: GenerationRequest,
}

/// Request for advanced/challenge material after full mastery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentRequest {
    /// Student display name, or the fallback placeholder.
    pub student_name: String,
    /// The competency the plan extends.
    pub competency_id: String,
    /// Competency display name.
    pub competency_name: String,
    /// Competency description.
    pub competency_description: String,
    /// The structured prompt, ready for dispatch.
    pub generation: GenerationRequest,
}

/// The selected pedagogical action.
///
/// A closed enum: one call yields one action, so a remediation request and
/// an enrichment request can never be emitted together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanDecision {
    /// Mastery is below expectation; request corrective material.
    Remediate(RemediationRequest),
    /// The competency is fully mastered; request challenge material.
    Enrich(EnrichmentRequest),
}

/// Select the next pedagogical action for one (student, competency) pair.
///
/// Identified gaps always lead to remediation; a bare mastery state leads to
/// enrichment only when it is `Mastered`, and to remediation with a stock
/// gap description otherwise.
///
/// # Errors
///
/// [`CompetencyNotFound`] when the id does not resolve. No request of
/// either kind is built in that case.
pub fn select_plan(
    framework: &CompetencyFramework,
    student: &StudentRecord,
    competency_id: &str,
    signal: &ProgressSignal,
) -> Result<PlanDecision, CompetencyNotFound> {
    let competency = framework.find(competency_id)?;
    let student_name = display_name(student);

    let decision = match signal {
        ProgressSignal::IdentifiedGaps(gaps) => PlanDecision::Remediate(remediation_request(
            &student_name,
            competency_id,
            &competency.name,
            &competency.description,
            gaps,
        )),
        ProgressSignal::State(MasteryState::Mastered) => {
            PlanDecision::Enrich(enrichment_request(
                &student_name,
                competency_id,
                &competency.name,
                &competency.description,
            ))
        }
        ProgressSignal::State(state) => {
            let gaps = stock_gap_description(*state);
            PlanDecision::Remediate(remediation_request(
                &student_name,
                competency_id,
                &competency.name,
                &competency.description,
                &gaps,
            ))
        }
    };

    debug!(
        student = %student.id,
        competency_id,
        action = match &decision {
            PlanDecision::Remediate(_) => "remediate",
            PlanDecision::Enrich(_) => "enrich",
        },
        "plan selected"
    );

    Ok(decision)
}

fn display_name(student: &StudentRecord) -> String {
    let name = student.display_name.trim();
    if name.is_empty() {
        STUDENT_FALLBACK.to_string()
    } else {
        name.to_string()
    }
}

fn stock_gap_description(state: MasteryState) -> String {
    match state {
        MasteryState::NotStarted => {
            "Le travail sur cette compétence n'a pas encore commencé.".to_string()
        }
        MasteryState::InProgress => {
            "La compétence est encore en cours d'acquisition.".to_string()
        }
        // select_plan routes Mastered to enrichment before reaching here.
        MasteryState::Mastered => String::new(),
    }
}

fn remediation_request(
    student_name: &str,
    competency_id: &str,
    competency_name: &str,
    competency_description: &str,
    gap_description: &str,
) -> RemediationRequest {
    let user_prompt = format!(
        "Générez un plan de remédiation personnalisé pour l'élève {student_name}, qui a des \
         lacunes identifiées suivantes pour la compétence '{competency_name}' \
         ({competency_description}) :\n\
         Lacunes: {gap_description}\n\n\
         Le plan doit inclure des exercices spécifiques, des ressources et des étapes claires \
         pour améliorer la maîtrise de cette compétence."
    );

    RemediationRequest {
        student_name: student_name.to_string(),
        competency_id: competency_id.to_string(),
        competency_name: competency_name.to_string(),
        competency_description: competency_description.to_string(),
        gap_description: gap_description.to_string(),
        generation: GenerationRequest::new(REMEDIATION_ROLE, user_prompt),
    }
}

fn enrichment_request(
    student_name: &str,
    competency_id: &str,
    competency_name: &str,
    competency_description: &str,
) -> EnrichmentRequest {
    let user_prompt = format!(
        "Générez un plan d'approfondissement pour l'élève {student_name}, qui a démontré une \
         excellente maîtrise de la compétence '{competency_name}' ({competency_description}).\n\
         Le plan doit inclure des projets avancés, des lectures complémentaires ou des défis \
         créatifs pour stimuler son intérêt et étendre ses connaissances."
    );

    EnrichmentRequest {
        student_name: student_name.to_string(),
        competency_id: competency_id.to_string(),
        competency_name: competency_name.to_string(),
        competency_description: competency_description.to_string(),
        generation: GenerationRequest::new(ENRICHMENT_ROLE, user_prompt),
    }
}
