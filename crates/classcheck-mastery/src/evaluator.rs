//! Compliance evaluation and collective mastery computation.

use tracing::debug;

use classcheck_framework::CompetencyFramework;
use classcheck_llm::GenerationRequest;
use classcheck_types::ClassRoster;

use crate::verdict::{ComplianceLabel, ComplianceVerdict, MasteryReport};

pub use classcheck_types::config::DEFAULT_MASTERY_THRESHOLD;

const COMPLIANCE_ROLE: &str = "Vous êtes un assistant expert en conformité académique.";

/// Outcome of starting a compliance evaluation.
///
/// Resolving the competency happens before any external contact: an unknown
/// id yields the final `Unresolved` verdict immediately, with no request
/// built and nothing dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplianceEvaluation {
    /// The competency resolved; dispatch this request to the
    /// content-generation service, then feed the raw answer to
    /// [`verdict_from_response`].
    Pending(ComplianceRequest),
    /// The competency id is absent from the framework.
    Unresolved(ComplianceVerdict),
}

/// A compliance-check prompt ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceRequest {
    /// The competency under review.
    pub competency_id: String,
    /// The structured prompt.
    pub generation: GenerationRequest,
}

/// Start a compliance evaluation of `content` against one competency.
///
/// When the id resolves, the returned request carries the competency name,
/// description, the full ordered indicator list and the content under
/// review. When it does not, the `Unresolved` verdict comes back directly.
#[must_use]
pub fn evaluate_compliance(
    framework: &CompetencyFramework,
    content: &str,
    competency_id: &str,
) -> ComplianceEvaluation {
    let Ok(competency) = framework.find(competency_id) else {
        debug!(competency_id, "compliance check on unknown competency");
        return ComplianceEvaluation::Unresolved(ComplianceVerdict::unresolved(competency_id));
    };

    let indicator_list = competency
        .indicators
        .iter()
        .map(|indicator| format!("- {indicator}"))
        .collect::<Vec<_>>()
        .join("\n");

    let user_prompt = format!(
        "En tant qu'expert en conformité académique, analysez le contenu pédagogique suivant \
         et déterminez s'il est conforme aux indicateurs de la compétence '{name}' \
         ({description}).\n\
         Indicateurs de la compétence:\n\
         {indicator_list}\n\n\
         Contenu pédagogique à vérifier:\n\
         {content}\n\n\
         Fournissez une évaluation claire (Conforme, Partiellement Conforme, Non Conforme) \
         et des suggestions spécifiques pour améliorer la conformité si nécessaire.",
        name = competency.name,
        description = competency.description,
    );

    ComplianceEvaluation::Pending(ComplianceRequest {
        competency_id: competency.id.clone(),
        generation: GenerationRequest::new(COMPLIANCE_ROLE, user_prompt),
    })
}

/// Turn the service's raw evaluation text into a verdict.
///
/// Label extraction is advisory: the full raw text always lands in
/// `rationale`, and a definite label is set only when exactly one of the
/// known evaluation labels appears in the response. Ambiguous or label-free
/// responses report `PartiallyConforming`, which never certifies compliance
/// and never blocks a remediation cycle.
#[must_use]
pub fn verdict_from_response(competency_id: &str, raw: &str) -> ComplianceVerdict {
    let lower = raw.to_lowercase();
    let partially = count_occurrences(&lower, "partiellement conforme");
    let non = count_occurrences(&lower, "non conforme");
    // "conforme" is a substring of both longer labels; subtract them to get
    // standalone occurrences.
    let conforming = count_occurrences(&lower, "conforme") - partially - non;

    let mut candidates = Vec::new();
    if conforming > 0 {
        candidates.push(ComplianceLabel::Conforming);
    }
    if partially > 0 {
        candidates.push(ComplianceLabel::PartiallyConforming);
    }
    if non > 0 {
        candidates.push(ComplianceLabel::NonConforming);
    }

    let label = match candidates.as_slice() {
        [single] => *single,
        _ => ComplianceLabel::PartiallyConforming,
    };

    ComplianceVerdict {
        competency_id: competency_id.to_string(),
        label,
        rationale: raw.trim().to_string(),
        suggestions: None,
    }
}

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.match_indices(needle).count()
}

/// Compute the collective mastery report for one competency.
///
/// `ratio` is `mastered / roster size` using the roster size at call time.
/// An empty roster is a defined boundary: ratio 0, threshold never met, no
/// division-by-zero error. The threshold comparison uses a closed lower
/// bound, so a ratio exactly equal to the threshold qualifies.
#[must_use]
pub fn collective_mastery_ratio(
    roster: &ClassRoster,
    competency_id: &str,
    threshold: f64,
) -> MasteryReport {
    let total = roster.len();
    let mastered = roster.mastered_count(competency_id);
    let ratio = if total == 0 {
        0.0
    } else {
        mastered as f64 / total as f64
    };
    let threshold_met = total > 0 && ratio >= threshold;

    debug!(
        competency_id,
        mastered, total, ratio, threshold, threshold_met, "collective mastery computed"
    );

    MasteryReport {
        competency_id: competency_id.to_string(),
        mastered,
        total,
        ratio,
        threshold,
        threshold_met,
    }
}
