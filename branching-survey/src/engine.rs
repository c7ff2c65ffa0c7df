//! The branching questionnaire engine.
//!
//! Holds the question set of the active respondent class, the position of the
//! current question and the answers given so far. After each answer it scans
//! forward for the next question whose condition holds, and reports completion
//! when the scan runs off the end of the set.

use tracing::{debug, info};

use crate::{
    AnswerError, Catalogue, CatalogueError, QuestionId, QuestionSet, QuestionSpec,
    RespondentClass, ResponseRecord, ResponseValue,
};

/// Error type for engine operations.
///
/// A rejected call leaves the session exactly as it was.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// An answer arrived while no mode was selected.
    #[error("No survey is in progress")]
    NoActiveSurvey,

    /// The answer is for a question other than the one displayed.
    #[error("Answer for '{got}' does not match the current question '{expected}'")]
    NotCurrent { expected: QuestionId, got: QuestionId },

    #[error(transparent)]
    InvalidAnswer(#[from] AnswerError),
}

/// Pre-survey or mid-survey.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// No mode selected.
    #[default]
    Idle,

    Active(ActiveSurvey),
}

/// A survey in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSurvey {
    question_set: QuestionSet,
    /// Always the index of a question that was eligible when it became current.
    current: usize,
    record: ResponseRecord,
}

impl ActiveSurvey {
    fn start(mode: RespondentClass, question_set: QuestionSet) -> Self {
        Self {
            question_set,
            current: 0,
            record: ResponseRecord::new(mode),
        }
    }

    pub fn mode(&self) -> RespondentClass {
        self.record.mode()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn question_set(&self) -> &QuestionSet {
        &self.question_set
    }

    pub fn record(&self) -> &ResponseRecord {
        &self.record
    }

    pub fn current_question(&self) -> &QuestionSpec {
        &self.question_set.questions()[self.current]
    }
}

/// What happened after an accepted answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// The question at `index` is now current.
    Next { index: usize },

    /// No eligible question is left. The engine is idle again and hands back
    /// the finished record.
    Completed(ResponseRecord),
}

/// Owns the session state of one survey-taking station.
#[derive(Debug, Clone, PartialEq)]
pub struct Questionnaire {
    parent: QuestionSet,
    student: QuestionSet,
    state: SessionState,
}

impl Questionnaire {
    /// Create an idle engine, assembling and validating the question set of
    /// every respondent class up front.
    pub fn new(catalogue: &Catalogue) -> Result<Self, CatalogueError> {
        let assemble = |class| {
            catalogue
                .question_set(class)
                .map_err(|source| CatalogueError::InvalidSet { class, source })
        };

        Ok(Self {
            parent: assemble(RespondentClass::Parent)?,
            student: assemble(RespondentClass::Student)?,
            state: SessionState::Idle,
        })
    }

    /// The question set presented to `class`.
    pub fn question_set(&self, class: RespondentClass) -> &QuestionSet {
        match class {
            RespondentClass::Parent => &self.parent,
            RespondentClass::Student => &self.student,
        }
    }

    /// Start a survey for `mode`, discarding any survey in progress.
    ///
    /// The first question is presented unconditionally.
    pub fn select_mode(&mut self, mode: RespondentClass) {
        if let SessionState::Active(previous) = &self.state {
            debug!(
                "Discarding unfinished {} survey at question {}",
                previous.mode(),
                previous.current_question().id()
            );
        }

        let question_set = self.question_set(mode).clone();
        info!("Starting {} survey with {} questions", mode, question_set.len());
        self.state = SessionState::Active(ActiveSurvey::start(mode, question_set));
    }

    /// Record the answer to the current question and move on.
    ///
    /// Rejects answers when idle, answers for any question other than the
    /// current one, and values that do not fit the question.
    pub fn submit_answer(
        &mut self,
        id: &str,
        value: impl Into<ResponseValue>,
    ) -> Result<Advance, EngineError> {
        let value = value.into();
        let SessionState::Active(survey) = &mut self.state else {
            return Err(EngineError::NoActiveSurvey);
        };

        let current = survey.current_question();
        if current.id() != id {
            return Err(EngineError::NotCurrent {
                expected: current.id().clone(),
                got: id.into(),
            });
        }
        current.check_answer(&value)?;

        survey.record.insert(id, value);

        match next_eligible(&survey.question_set, survey.current, &survey.record) {
            Some(index) => {
                debug!(
                    "Advancing from '{}' to '{}'",
                    id,
                    survey.question_set.questions()[index].id()
                );
                survey.current = index;
                Ok(Advance::Next { index })
            }
            None => {
                let record = self.finish().ok_or(EngineError::NoActiveSurvey)?;
                info!(
                    "Completed {} survey with {} answers",
                    record.mode(),
                    record.responses().len()
                );
                Ok(Advance::Completed(record))
            }
        }
    }

    /// The question currently displayed, if a survey is in progress.
    pub fn current_question(&self) -> Option<&QuestionSpec> {
        self.active().map(ActiveSurvey::current_question)
    }

    /// The selected respondent class, if a survey is in progress.
    pub fn mode(&self) -> Option<RespondentClass> {
        self.active().map(ActiveSurvey::mode)
    }

    /// Index of the current question and the length of the active set.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.active()
            .map(|survey| (survey.current, survey.question_set.len()))
    }

    /// The answers collected in the survey in progress.
    pub fn record(&self) -> Option<&ResponseRecord> {
        self.active().map(ActiveSurvey::record)
    }

    pub fn is_active(&self) -> bool {
        self.active().is_some()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn active(&self) -> Option<&ActiveSurvey> {
        match &self.state {
            SessionState::Active(survey) => Some(survey),
            SessionState::Idle => None,
        }
    }

    fn finish(&mut self) -> Option<ResponseRecord> {
        match std::mem::take(&mut self.state) {
            SessionState::Active(survey) => Some(survey.record),
            SessionState::Idle => None,
        }
    }
}

/// First question after `after` whose condition holds against `record`.
///
/// Questions at or before `after` are never reconsidered.
fn next_eligible(set: &QuestionSet, after: usize, record: &ResponseRecord) -> Option<usize> {
    set.questions()
        .iter()
        .enumerate()
        .skip(after + 1)
        .find(|(_, question)| question.is_eligible(record))
        .map(|(index, _)| index)
}
