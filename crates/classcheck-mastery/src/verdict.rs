//! Compliance verdicts and mastery reports.

use serde::{Deserialize, Serialize};

/// Qualitative compliance label for a piece of pedagogical content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceLabel {
    /// The content matches the competency's indicators.
    Conforming,
    /// The content covers the competency only partially.
    PartiallyConforming,
    /// The content does not match the competency.
    NonConforming,
    /// The competency id did not resolve in the framework; no evaluation
    /// took place.
    Unresolved,
}

impl std::fmt::Display for ComplianceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Conforming => "conforming",
            Self::PartiallyConforming => "partially-conforming",
            Self::NonConforming => "non-conforming",
            Self::Unresolved => "unresolved",
        };
        f.write_str(label)
    }
}

/// Outcome of a compliance check for one competency.
///
/// `rationale` is the raw evaluation text from the content-generation
/// service (or an explanatory message for `Unresolved`); the label mapping
/// is advisory, the rationale is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    /// The competency the verdict refers to. Either resolves in the
    /// framework or the label is `Unresolved` — never silently substituted.
    pub competency_id: String,
    /// Qualitative label.
    pub label: ComplianceLabel,
    /// Free-text rationale.
    pub rationale: String,
    /// Improvement suggestions, when the evaluation separated them out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<String>,
}

impl ComplianceVerdict {
    /// Build the verdict for a competency id absent from the framework.
    #[must_use]
    pub fn unresolved(competency_id: impl Into<String>) -> Self {
        let competency_id = competency_id.into();
        let rationale = format!("Compétence {competency_id} non trouvée dans les référentiels.");
        Self {
            competency_id,
            label: ComplianceLabel::Unresolved,
            rationale,
            suggestions: None,
        }
    }
}

/// Collective mastery measurement for one competency.
///
/// Always computed from the roster size at evaluation time; reports are
/// never cached across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasteryReport {
    /// The competency measured.
    pub competency_id: String,
    /// Students whose state equals `Mastered`.
    pub mastered: usize,
    /// Roster size at evaluation time.
    pub total: usize,
    /// `mastered / total`, or 0 when the roster is empty.
    pub ratio: f64,
    /// The threshold the ratio was compared against.
    pub threshold: f64,
    /// `ratio >= threshold` (closed lower bound: equality qualifies).
    pub threshold_met: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_verdict_names_the_id() {
        let verdict = ComplianceVerdict::unresolved("X9.9");
        assert_eq!(verdict.label, ComplianceLabel::Unresolved);
        assert!(verdict.rationale.contains("X9.9"));
        assert!(verdict.suggestions.is_none());
    }

    #[test]
    fn label_display_is_kebab_case() {
        assert_eq!(ComplianceLabel::Conforming.to_string(), "conforming");
        assert_eq!(
            ComplianceLabel::PartiallyConforming.to_string(),
            "partially-conforming"
        );
        assert_eq!(ComplianceLabel::NonConforming.to_string(), "non-conforming");
        assert_eq!(ComplianceLabel::Unresolved.to_string(), "unresolved");
    }
}
