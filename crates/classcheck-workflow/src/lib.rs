//! Workflow stage sequencing
//!
//! A small state machine over an externally supplied ordered list of stage
//! names plus a free-text description of the most recently completed stage.
//! The machine only *names* the next stage; executing it, and generating any
//! content it needs, is external.
//!
//! Matching the completed-stage text against declared names is exact: either
//! the trimmed text equals a declared name, or exactly one declared name
//! appears verbatim inside the text. Anything else — no match, or more than
//! one candidate — surfaces [`WorkflowError::UnrecognizedStage`] instead of
//! guessing a successor.
//!
//! Workflow state is constructed per orchestration request and discarded
//! after producing the decision; nothing persists across calls.

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use classcheck_types::error::WorkflowError;

/// The next step decided by the sequencer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageTransition {
    /// Proceed to this declared stage.
    Stage(String),
    /// The completed stage was the last declared one; the workflow is done.
    Complete,
}

impl StageTransition {
    /// The next stage name, if the workflow is not complete.
    #[must_use]
    pub fn stage_name(&self) -> Option<&str> {
        match self {
            Self::Stage(name) => Some(name),
            Self::Complete => None,
        }
    }
}

/// One orchestration request's view of a declared workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    stages: Vec<String>,
    completed: String,
}

impl WorkflowState {
    /// Build the state from the declared stage sequence and the description
    /// of the last-completed stage.
    #[must_use]
    pub fn new<S: Into<String>>(
        stages: impl IntoIterator<Item = S>,
        completed: impl Into<String>,
    ) -> Self {
        Self {
            stages: stages.into_iter().map(Into::into).collect(),
            completed: completed.into(),
        }
    }

    /// Declared stage names, in order.
    #[must_use]
    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    /// The completed-stage description this state was built from.
    #[must_use]
    pub fn completed(&self) -> &str {
        &self.completed
    }

    /// Decide the next stage.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::UnrecognizedStage`] when the completed-stage text
    /// matches no declared stage, or matches more than one.
    pub fn next_stage(&self) -> Result<StageTransition, WorkflowError> {
        let index = self.completed_index()?;

        let transition = match self.stages.get(index + 1) {
            Some(next) => StageTransition::Stage(next.clone()),
            None => StageTransition::Complete,
        };

        debug!(
            completed = %self.stages[index],
            next = transition.stage_name().unwrap_or("<complete>"),
            "stage transition resolved"
        );

        Ok(transition)
    }

    /// Resolve the completed-stage description to a declared stage index.
    fn completed_index(&self) -> Result<usize, WorkflowError> {
        let completed = self.completed.trim();

        // Whole-match first: the description is exactly a declared name.
        let exact: Vec<usize> = self
            .stages
            .iter()
            .enumerate()
            .filter(|(_, stage)| stage.as_str() == completed)
            .map(|(index, _)| index)
            .collect();
        if let [index] = exact.as_slice() {
            return Ok(*index);
        }

        // Otherwise the declared name must appear verbatim in the free text,
        // and only one may.
        let contained: Vec<usize> = self
            .stages
            .iter()
            .enumerate()
            .filter(|(_, stage)| !stage.is_empty() && completed.contains(stage.as_str()))
            .map(|(index, _)| index)
            .collect();
        if let [index] = contained.as_slice() {
            return Ok(*index);
        }

        Err(WorkflowError::UnrecognizedStage {
            completed: self.completed.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_stage_advances_to_its_successor() {
        let state = WorkflowState::new(["A", "B", "C"], "A");
        assert_eq!(
            state.next_stage().unwrap(),
            StageTransition::Stage("B".to_string())
        );

        let state = WorkflowState::new(["A", "B", "C"], "B");
        assert_eq!(
            state.next_stage().unwrap(),
            StageTransition::Stage("C".to_string())
        );
    }

    #[test]
    fn last_stage_reaches_the_terminal_state() {
        let state = WorkflowState::new(["A", "B", "C"], "C");
        assert_eq!(state.next_stage().unwrap(), StageTransition::Complete);
    }

    #[test]
    fn unknown_stage_is_unrecognized() {
        let state = WorkflowState::new(["A", "B", "C"], "Z");
        let err = state.next_stage().unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::UnrecognizedStage { ref completed } if completed == "Z"
        ));
    }

    #[test]
    fn declared_name_inside_free_text_matches() {
        let state = WorkflowState::new(
            ["Lecture planning", "Analyse profils élèves", "Génération contenu"],
            "Étape 1 (Lecture planning) terminée avec succès.",
        );
        assert_eq!(
            state.next_stage().unwrap(),
            StageTransition::Stage("Analyse profils élèves".to_string())
        );
    }

    #[test]
    fn ambiguous_substring_is_unrecognized() {
        // Both declared names appear in the description; no guessing.
        let state = WorkflowState::new(
            ["Lecture planning", "Analyse profils"],
            "Lecture planning puis Analyse profils faites ensemble",
        );
        assert!(state.next_stage().is_err());
    }

    #[test]
    fn duplicate_declared_names_are_ambiguous() {
        let state = WorkflowState::new(["A", "B", "A"], "A");
        assert!(state.next_stage().is_err());
    }

    #[test]
    fn matching_is_case_sensitive() {
        let state = WorkflowState::new(["Lecture planning"], "lecture planning");
        assert!(state.next_stage().is_err());
    }

    #[test]
    fn empty_declaration_recognizes_nothing() {
        let state = WorkflowState::new(Vec::<String>::new(), "A");
        assert!(state.next_stage().is_err());
    }

    #[test]
    fn surrounding_whitespace_in_description_is_ignored() {
        let state = WorkflowState::new(["A", "B"], "  A  ");
        assert_eq!(
            state.next_stage().unwrap(),
            StageTransition::Stage("B".to_string())
        );
    }
}
