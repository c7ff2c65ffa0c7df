//! Scripted respondent for running surveys without user interaction.
//!
//! `ScriptedRespondent` answers whatever question the engine presents from a
//! pre-defined table of answers. This is useful for testing question sets and
//! the branching between them.
//!
//! # Example
//!
//! ```rust,ignore
//! use branching_survey::{Catalogue, Kiosk, MemoryStore, Questionnaire, RespondentClass, ScriptedRespondent, YesNo};
//!
//! let questionnaire = Questionnaire::new(&Catalogue::builtin())?;
//! let mut kiosk = Kiosk::new(questionnaire, Arc::new(MemoryStore::new()));
//!
//! let presented = ScriptedRespondent::new()
//!     .with_text("age", "17")
//!     .with_text("city", "Pune")
//!     .with_text("state", "Maharashtra")
//!     .with_yes_no("relax_app", YesNo::No)
//!     .run(&mut kiosk, RespondentClass::Student)?;
//!
//! assert_eq!(kiosk.completed_count(), 1);
//! ```

use std::collections::HashMap;

use crate::engine::{Advance, EngineError, Questionnaire};
use crate::{Kiosk, QuestionId, RespondentClass, ResponseRecord, ResponseValue, YesNo};

/// Answers questions from a fixed table, keyed by question id.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRespondent {
    answers: HashMap<String, ResponseValue>,
}

/// Error type for ScriptedRespondent.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Missing scripted answer for question: {0}")]
    MissingAnswer(QuestionId),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ScriptedRespondent {
    /// Create a respondent with no answers.
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
        }
    }

    /// Add an answer for a question id.
    pub fn with_response(mut self, id: impl Into<String>, value: impl Into<ResponseValue>) -> Self {
        self.answers.insert(id.into(), value.into());
        self
    }

    /// Add a dropdown or free-text answer.
    pub fn with_text(self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_response(id, ResponseValue::Text(value.into()))
    }

    /// Add a yes/no answer.
    pub fn with_yes_no(self, id: impl Into<String>, answer: YesNo) -> Self {
        self.with_response(id, answer)
    }

    /// Add a multi-select answer.
    pub fn with_selections<I, S>(self, id: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_response(id, ResponseValue::selections(items))
    }

    /// Take one full survey at the kiosk, returning the ids of the questions
    /// that were presented, in order.
    pub fn run(
        &self,
        kiosk: &mut Kiosk,
        mode: RespondentClass,
    ) -> Result<Vec<QuestionId>, ScriptError> {
        kiosk.select_mode(mode);

        let mut presented = Vec::new();
        while let Some(question) = kiosk.current_question() {
            let id = question.id().clone();
            let value = self.answer_for(&id)?;
            presented.push(id.clone());
            kiosk.submit_answer(id.as_str(), value)?;
        }
        Ok(presented)
    }

    /// Take one full survey directly against the engine, returning the
    /// presented ids and the finished record.
    pub fn run_questionnaire(
        &self,
        questionnaire: &mut Questionnaire,
        mode: RespondentClass,
    ) -> Result<(Vec<QuestionId>, ResponseRecord), ScriptError> {
        questionnaire.select_mode(mode);

        let mut presented = Vec::new();
        loop {
            let Some(question) = questionnaire.current_question() else {
                return Err(EngineError::NoActiveSurvey.into());
            };
            let id = question.id().clone();
            let value = self.answer_for(&id)?;
            presented.push(id.clone());

            if let Advance::Completed(record) = questionnaire.submit_answer(id.as_str(), value)? {
                return Ok((presented, record));
            }
        }
    }

    fn answer_for(&self, id: &QuestionId) -> Result<ResponseValue, ScriptError> {
        self.answers
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| ScriptError::MissingAnswer(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalogue;

    #[test]
    fn runs_questionnaire_to_completion() {
        let mut questionnaire = Questionnaire::new(&Catalogue::builtin()).unwrap();

        let (presented, record) = ScriptedRespondent::new()
            .with_text("age", "17")
            .with_text("city", "Pune")
            .with_text("state", "Goa")
            .with_yes_no("relax_app", YesNo::Yes)
            .with_selections("which_app", ["X", "YouTube"])
            .run_questionnaire(&mut questionnaire, RespondentClass::Student)
            .unwrap();

        assert_eq!(presented, ["age", "city", "state", "relax_app", "which_app"]);
        assert_eq!(record.mode(), RespondentClass::Student);
        assert_eq!(
            record.selections("which_app"),
            Some(&["X".to_string(), "YouTube".to_string()][..])
        );
        assert!(!questionnaire.is_active());
    }

    #[test]
    fn run_questionnaire_reports_rejected_and_missing_answers() {
        let mut questionnaire = Questionnaire::new(&Catalogue::builtin()).unwrap();

        let result = ScriptedRespondent::new()
            .with_text("age", "40")
            .run_questionnaire(&mut questionnaire, RespondentClass::Parent);

        // "40" is not an age option, so the engine rejects it before "city" is reached.
        assert!(matches!(
            result,
            Err(ScriptError::Engine(EngineError::InvalidAnswer(_)))
        ));
        assert_eq!(questionnaire.current_question().unwrap().id(), "age");

        let result = ScriptedRespondent::new()
            .with_text("age", "30")
            .run_questionnaire(&mut questionnaire, RespondentClass::Parent);
        assert!(matches!(result, Err(ScriptError::MissingAnswer(id)) if id == "city"));
    }
}
