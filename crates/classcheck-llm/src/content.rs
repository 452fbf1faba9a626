//! Request constructors for standalone pedagogical content.
//!
//! Worksheets, quizzes and lesson summaries are generated outside any
//! mastery decision, typically during weekly preparation. These builders
//! only assemble the structured prompt; dispatch happens elsewhere.

use crate::types::GenerationRequest;

const WORKSHEET_ROLE: &str = "Vous êtes un générateur de contenu pédagogique expert.";
const QUIZ_ROLE: &str = "Vous êtes un créateur de quiz pédagogiques.";
const SUMMARY_ROLE: &str = "Vous êtes un rédacteur de résumés pédagogiques.";

/// Build a worksheet request for a subject and topic.
///
/// `student_level` calibrates difficulty (e.g. "débutant", "moyen",
/// "avancé"); solutions are always requested at the end of the sheet.
#[must_use]
pub fn worksheet_request(
    subject: &str,
    topic: &str,
    student_level: &str,
    num_questions: u32,
) -> GenerationRequest {
    let user_prompt = format!(
        "Créez une feuille d'exercices de {num_questions} questions sur le sujet suivant : \
         {topic} en {subject}.\n\
         Le niveau de difficulté doit être adapté à un élève de niveau {student_level}.\n\
         Incluez les solutions à la fin de la feuille."
    );
    GenerationRequest::new(WORKSHEET_ROLE, user_prompt)
}

/// Build a quiz request.
///
/// `quiz_type` names the format (e.g. "QCM", "Vrai/Faux"); correct answers
/// are always requested.
#[must_use]
pub fn quiz_request(
    subject: &str,
    topic: &str,
    num_questions: u32,
    quiz_type: &str,
) -> GenerationRequest {
    let user_prompt = format!(
        "Créez un {quiz_type} de {num_questions} questions sur le sujet suivant : \
         {topic} en {subject}.\n\
         Incluez les bonnes réponses."
    );
    GenerationRequest::new(QUIZ_ROLE, user_prompt)
}

/// Build a lesson-summary request.
///
/// `length` is free text (e.g. "court", "détaillé").
#[must_use]
pub fn lesson_summary_request(subject: &str, topic: &str, length: &str) -> GenerationRequest {
    let user_prompt = format!(
        "Générez un résumé {length} de la leçon sur le sujet suivant : {topic} en {subject}."
    );
    GenerationRequest::new(SUMMARY_ROLE, user_prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worksheet_request_carries_all_parameters() {
        let request = worksheet_request("Mathématiques", "Théorème de Pythagore", "moyen", 5);
        assert_eq!(request.system_role, WORKSHEET_ROLE);
        assert!(request.user_prompt.contains("5 questions"));
        assert!(request.user_prompt.contains("Théorème de Pythagore"));
        assert!(request.user_prompt.contains("Mathématiques"));
        assert!(request.user_prompt.contains("niveau moyen"));
        assert!(request.user_prompt.contains("solutions"));
    }

    #[test]
    fn quiz_request_names_format_and_answer_key() {
        let request = quiz_request("Français", "Accord du participe passé", 3, "QCM");
        assert!(request.user_prompt.contains("QCM"));
        assert!(request.user_prompt.contains("3 questions"));
        assert!(request.user_prompt.contains("bonnes réponses"));
    }

    #[test]
    fn summary_request_carries_length() {
        let request = lesson_summary_request("Histoire", "La Révolution française", "détaillé");
        assert!(request.user_prompt.contains("résumé détaillé"));
        assert!(request.user_prompt.contains("La Révolution française"));
    }
}
