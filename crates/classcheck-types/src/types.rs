//! Core mastery-tracking types shared across the workspace.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::MasteryError;

/// A student's standing on a single competency.
///
/// `MasteryState` is a closed enumeration: upstream systems report progress
/// with the referential's French labels, and anything outside the three known
/// labels is rejected at the boundary rather than silently counted as
/// not-mastered.
///
/// # Serialization
///
/// The wire labels match the referential source documents:
///
/// | Variant | Label |
/// |---------|-------|
/// | `NotStarted` | `"non commencé"` |
/// | `InProgress` | `"en cours"` |
/// | `Mastered` | `"maîtrisé"` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MasteryState {
    /// The student has not yet started work on the competency.
    #[serde(rename = "non commencé")]
    NotStarted,
    /// The student is actively working toward the competency.
    #[serde(rename = "en cours")]
    InProgress,
    /// The student has demonstrated mastery of the competency.
    #[serde(rename = "maîtrisé")]
    Mastered,
}

impl MasteryState {
    /// Returns the canonical wire label for this state.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::NotStarted => "non commencé",
            Self::InProgress => "en cours",
            Self::Mastered => "maîtrisé",
        }
    }

    /// Parse an upstream progress label into a state.
    ///
    /// Matching is exact after trimming surrounding whitespace. Unknown
    /// labels fail with [`MasteryError::UnknownStateLabel`] instead of
    /// defaulting to [`MasteryState::NotStarted`].
    ///
    /// # Errors
    ///
    /// Returns `MasteryError::UnknownStateLabel` for any label outside the
    /// three known ones.
    pub fn parse_label(label: &str) -> Result<Self, MasteryError> {
        match label.trim() {
            "non commencé" => Ok(Self::NotStarted),
            "en cours" => Ok(Self::InProgress),
            "maîtrisé" => Ok(Self::Mastered),
            other => Err(MasteryError::UnknownStateLabel {
                label: other.to_string(),
            }),
        }
    }

    /// Whether this state counts toward the collective mastery ratio.
    #[must_use]
    pub const fn is_mastered(&self) -> bool {
        matches!(self, Self::Mastered)
    }
}

impl std::fmt::Display for MasteryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

/// One student and their per-competency progress snapshot.
///
/// The engine only ever reads this record; transitions between mastery
/// states are driven by the teacher or the upstream tracking system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Stable identifier from the upstream roster system.
    pub id: String,
    /// Display name used when personalising generated content.
    pub display_name: String,
    /// Optional level/grade tag (e.g. "débutant", "moyen", "avancé").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Progress keyed by competency id (e.g. "D1.3").
    #[serde(default)]
    pub progress: HashMap<String, MasteryState>,
}

impl StudentRecord {
    /// Create a record with no progress entries.
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            level: None,
            progress: HashMap::new(),
        }
    }

    /// Set the level tag.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Record the state for one competency.
    #[must_use]
    pub fn with_state(mut self, competency_id: impl Into<String>, state: MasteryState) -> Self {
        self.progress.insert(competency_id.into(), state);
        self
    }

    /// The recorded state for a competency, if any.
    ///
    /// A missing entry is distinct from `NotStarted`: it means the upstream
    /// system has reported nothing for this competency yet. Ratio
    /// computations treat both the same way (not mastered).
    #[must_use]
    pub fn state_for(&self, competency_id: &str) -> Option<MasteryState> {
        self.progress.get(competency_id).copied()
    }

    /// Whether this student has mastered the given competency.
    #[must_use]
    pub fn has_mastered(&self, competency_id: &str) -> bool {
        self.state_for(competency_id)
            .is_some_and(|state| state.is_mastered())
    }
}

/// Ordered collection of students evaluated together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassRoster {
    students: Vec<StudentRecord>,
}

impl ClassRoster {
    /// Create a roster from an ordered list of students.
    #[must_use]
    pub fn new(students: Vec<StudentRecord>) -> Self {
        Self { students }
    }

    /// Create an empty roster.
    ///
    /// Empty rosters are a defined edge case for ratio computation, not an
    /// error: the ratio is 0 and no threshold is ever met.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of students on the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the roster has no students.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Iterate over the students in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.students.iter()
    }

    /// Count students whose state for the competency is `Mastered`.
    #[must_use]
    pub fn mastered_count(&self, competency_id: &str) -> usize {
        self.students
            .iter()
            .filter(|student| student.has_mastered(competency_id))
            .count()
    }
}

impl From<Vec<StudentRecord>> for ClassRoster {
    fn from(students: Vec<StudentRecord>) -> Self {
        Self::new(students)
    }
}

impl<'a> IntoIterator for &'a ClassRoster {
    type Item = &'a StudentRecord;
    type IntoIter = std::slice::Iter<'a, StudentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.students.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_label_accepts_known_labels() {
        assert_eq!(
            MasteryState::parse_label("maîtrisé").unwrap(),
            MasteryState::Mastered
        );
        assert_eq!(
            MasteryState::parse_label("en cours").unwrap(),
            MasteryState::InProgress
        );
        assert_eq!(
            MasteryState::parse_label("non commencé").unwrap(),
            MasteryState::NotStarted
        );
        assert_eq!(
            MasteryState::parse_label("  maîtrisé  ").unwrap(),
            MasteryState::Mastered
        );
    }

    #[test]
    fn parse_label_rejects_unknown_labels() {
        let err = MasteryState::parse_label("presque maîtrisé").unwrap_err();
        assert!(matches!(
            err,
            MasteryError::UnknownStateLabel { ref label } if label == "presque maîtrisé"
        ));

        // Case-sensitive: the wire format is exact.
        assert!(MasteryState::parse_label("Maîtrisé").is_err());
        assert!(MasteryState::parse_label("").is_err());
    }

    #[test]
    fn mastery_state_serde_round_trip_uses_wire_labels() {
        let json = serde_json::to_string(&MasteryState::Mastered).unwrap();
        assert_eq!(json, "\"maîtrisé\"");

        let state: MasteryState = serde_json::from_str("\"en cours\"").unwrap();
        assert_eq!(state, MasteryState::InProgress);

        // Unknown wire labels fail fast during deserialization too.
        assert!(serde_json::from_str::<MasteryState>("\"validé\"").is_err());
    }

    #[test]
    fn student_record_state_lookup() {
        let student = StudentRecord::new("s-001", "Alice")
            .with_level("débutant")
            .with_state("D1.3", MasteryState::Mastered)
            .with_state("D2.1", MasteryState::InProgress);

        assert!(student.has_mastered("D1.3"));
        assert!(!student.has_mastered("D2.1"));
        assert_eq!(student.state_for("D9.9"), None);
        assert!(!student.has_mastered("D9.9"));
    }

    #[test]
    fn roster_counts_mastered_students() {
        let roster = ClassRoster::new(vec![
            StudentRecord::new("s-001", "Alice").with_state("D1.3", MasteryState::Mastered),
            StudentRecord::new("s-002", "Bob").with_state("D1.3", MasteryState::InProgress),
            StudentRecord::new("s-003", "Chloé").with_state("D1.3", MasteryState::Mastered),
        ]);

        assert_eq!(roster.len(), 3);
        assert_eq!(roster.mastered_count("D1.3"), 2);
        assert_eq!(roster.mastered_count("D2.1"), 0);
    }

    #[test]
    fn empty_roster_is_a_defined_state() {
        let roster = ClassRoster::empty();
        assert!(roster.is_empty());
        assert_eq!(roster.mastered_count("D1.3"), 0);
    }
}
