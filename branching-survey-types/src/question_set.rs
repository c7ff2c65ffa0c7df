use std::collections::HashSet;

use crate::{Condition, QuestionSetError, QuestionSpec};

/// The ordered questions presented to one respondent class.
///
/// Order is the display order and the direction in which the engine searches
/// for the next eligible question. A set is never empty, its ids are unique
/// and never the reserved `mode` key, and its conditions only read ids of the
/// set or `mode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<QuestionSpec>,
}

impl QuestionSet {
    /// Create a question set, validating ids and options.
    pub fn new(questions: Vec<QuestionSpec>) -> Result<Self, QuestionSetError> {
        if questions.is_empty() {
            return Err(QuestionSetError::Empty);
        }
        let mut seen = HashSet::new();
        for question in &questions {
            let id = question.id();
            if id.is_empty() {
                return Err(QuestionSetError::EmptyId);
            }
            if id.is_reserved() {
                return Err(QuestionSetError::ReservedId(id.clone()));
            }
            if !seen.insert(id.as_str()) {
                return Err(QuestionSetError::DuplicateId(id.clone()));
            }
            if question.options().is_some_and(<[String]>::is_empty) {
                return Err(QuestionSetError::NoOptions(id.clone()));
            }
        }

        for question in &questions {
            let references = question
                .condition()
                .map(Condition::referenced_questions)
                .unwrap_or_default();
            if let Some(unknown) = references
                .into_iter()
                .find(|r| !r.is_reserved() && !seen.contains(r.as_str()))
            {
                return Err(QuestionSetError::UnknownReference {
                    question: question.id().clone(),
                    reference: unknown.clone(),
                });
            }
        }
        Ok(Self { questions })
    }

    /// Shared questions first, then the class-specific ones.
    pub fn assemble(
        shared: &[QuestionSpec],
        specific: &[QuestionSpec],
    ) -> Result<Self, QuestionSetError> {
        Self::new(shared.iter().chain(specific).cloned().collect())
    }

    /// Get the questions.
    pub fn questions(&self) -> &[QuestionSpec] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&QuestionSpec> {
        self.questions.get(index)
    }

    /// Position of the question with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id() == id)
    }

    /// Check if the set has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_keeps_order() {
        let shared = [QuestionSpec::text("city", "City?")];
        let specific = [QuestionSpec::yes_no("relax_app", "Relax?")];
        let set = QuestionSet::assemble(&shared, &specific).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).unwrap().id(), "city");
        assert_eq!(set.position("relax_app"), Some(1));
        assert_eq!(set.position("age"), None);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = QuestionSet::new(vec![
            QuestionSpec::text("city", "City?"),
            QuestionSpec::text("city", "City again?"),
        ]);
        assert!(matches!(result, Err(QuestionSetError::DuplicateId(id)) if id == "city"));
    }

    #[test]
    fn rejects_condition_on_unknown_question() {
        let result = QuestionSet::new(vec![
            QuestionSpec::yes_no("use_social", "Social media?"),
            QuestionSpec::text("favourite", "Favourite platform?")
                .with_condition(Condition::equals("use_socials", "Yes")),
        ]);
        assert_eq!(
            result,
            Err(QuestionSetError::UnknownReference {
                question: "favourite".into(),
                reference: "use_socials".into(),
            })
        );
    }

    #[test]
    fn accepts_conditions_on_mode_and_later_questions() {
        let set = QuestionSet::new(vec![
            QuestionSpec::text("school", "Which school?")
                .with_condition(Condition::equals("mode", "Parent")),
            QuestionSpec::text("early", "Early?").with_condition(Condition::answered("late")),
            QuestionSpec::yes_no("late", "Late?"),
        ]);
        assert!(set.is_ok());
    }

    #[test]
    fn rejects_empty_set() {
        assert_eq!(QuestionSet::new(Vec::new()), Err(QuestionSetError::Empty));
    }

    #[test]
    fn rejects_reserved_id() {
        let result = QuestionSet::new(vec![QuestionSpec::text("mode", "Mode?")]);
        assert!(matches!(result, Err(QuestionSetError::ReservedId(_))));
    }

    #[test]
    fn rejects_choice_without_options() {
        let result = QuestionSet::new(vec![QuestionSpec::dropdown(
            "age",
            "Age?",
            Vec::<String>::new(),
        )]);
        assert!(matches!(result, Err(QuestionSetError::NoOptions(_))));
    }
}
