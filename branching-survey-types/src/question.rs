use serde::{Deserialize, Serialize};

use crate::{Condition, QuestionId, ResponseRecord, ResponseValue, YesNo};

/// A single question in a question set.
///
/// Immutable once built. In TOML the kind is flattened into the question:
///
/// ```toml
/// [[student]]
/// id = "which_app"
/// text = "Which app do you open first?"
/// type = "multi_select"
/// options = ["Instagram", "YouTube"]
/// condition = { op = "equals", question = "relax_app", value = "Yes" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    /// The key of this question's answer in the response record.
    id: QuestionId,

    /// The prompt text shown to the respondent.
    text: String,

    /// The kind of question (determines the input widget and answer shape).
    #[serde(flatten)]
    kind: QuestionKind,

    /// Gate evaluated against the current answers each time the engine
    /// looks for the next question. `None` means always eligible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    condition: Option<Condition>,
}

impl QuestionSpec {
    /// Create a new question.
    pub fn new(id: impl Into<QuestionId>, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            condition: None,
        }
    }

    /// Single choice from a list.
    pub fn dropdown<I, S>(id: impl Into<QuestionId>, text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            id,
            text,
            QuestionKind::Dropdown {
                options: options.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Free-text answer.
    pub fn text(id: impl Into<QuestionId>, text: impl Into<String>) -> Self {
        Self::new(id, text, QuestionKind::Text)
    }

    /// Yes/no answer.
    pub fn yes_no(id: impl Into<QuestionId>, text: impl Into<String>) -> Self {
        Self::new(id, text, QuestionKind::YesNo)
    }

    /// Any number of options from a list.
    pub fn multi_select<I, S>(
        id: impl Into<QuestionId>,
        text: impl Into<String>,
        options: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            id,
            text,
            QuestionKind::MultiSelect {
                options: options.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Attach a condition gating this question.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Get the prompt text.
    pub fn prompt(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// The selectable options, for dropdown and multi-select questions.
    pub fn options(&self) -> Option<&[String]> {
        self.kind.options()
    }

    /// Check whether this question may be presented given the current answers.
    pub fn is_eligible(&self, record: &ResponseRecord) -> bool {
        self.condition
            .as_ref()
            .is_none_or(|condition| condition.evaluate(record))
    }

    /// Check that `value` has the shape and content this question accepts.
    pub fn check_answer(&self, value: &ResponseValue) -> Result<(), AnswerError> {
        match (&self.kind, value) {
            (QuestionKind::Text, ResponseValue::Text(_)) => Ok(()),
            (QuestionKind::YesNo, ResponseValue::Text(token)) => match YesNo::from_token(token) {
                Some(_) => Ok(()),
                None => Err(AnswerError::InvalidYesNo {
                    question: self.id.clone(),
                    value: token.clone(),
                }),
            },
            (QuestionKind::Dropdown { options }, ResponseValue::Text(choice)) => {
                if options.contains(choice) {
                    Ok(())
                } else {
                    Err(AnswerError::UnknownOption {
                        question: self.id.clone(),
                        value: choice.clone(),
                    })
                }
            }
            (QuestionKind::MultiSelect { options }, ResponseValue::Selections(picked)) => {
                match picked.iter().find(|item| !options.contains(item)) {
                    Some(unknown) => Err(AnswerError::UnknownOption {
                        question: self.id.clone(),
                        value: unknown.clone(),
                    }),
                    None => Ok(()),
                }
            }
            (QuestionKind::MultiSelect { .. }, ResponseValue::Text(_)) => {
                Err(AnswerError::ShapeMismatch {
                    question: self.id.clone(),
                    expected: "Selections",
                    actual: value.type_name(),
                })
            }
            (_, ResponseValue::Selections(_)) => Err(AnswerError::ShapeMismatch {
                question: self.id.clone(),
                expected: "Text",
                actual: value.type_name(),
            }),
        }
    }
}

/// The kind of question, determining the input widget and the answer shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick exactly one option. Answer: `ResponseValue::Text`.
    Dropdown { options: Vec<String> },

    /// Free-form text, typed or dictated. Answer: `ResponseValue::Text`.
    Text,

    /// `"Yes"` or `"No"`. Answer: `ResponseValue::Text`.
    YesNo,

    /// Pick any number of options, including none. Answer: `ResponseValue::Selections`.
    MultiSelect { options: Vec<String> },
}

impl QuestionKind {
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::Dropdown { options } | Self::MultiSelect { options } => Some(options),
            Self::Text | Self::YesNo => None,
        }
    }
}

/// Why an answer does not fit the question it was given for.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnswerError {
    #[error("Question '{question}' expects {expected}, got {actual}")]
    ShapeMismatch {
        question: QuestionId,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("'{value}' is not an option of question '{question}'")]
    UnknownOption { question: QuestionId, value: String },

    #[error("Question '{question}' expects Yes or No, got '{value}'")]
    InvalidYesNo { question: QuestionId, value: String },
}
