use serde::{Deserialize, Serialize};

use crate::{QuestionId, ResponseRecord};

/// A predicate over the answers collected so far, deciding whether a
/// question may be presented.
///
/// Leaf predicates are false when the referenced question has no answer yet
/// or holds an answer of the other shape. A condition may reference a
/// question positioned later in the set; it stays false until that question
/// is answered, which in a forward-only survey means never.
///
/// The reserved `mode` key holds the respondent class, so
/// `Condition::equals("mode", "Parent")` gates a shared question on the class.
///
/// In TOML a condition is written with an `op` tag:
///
/// ```toml
/// condition = { op = "equals", question = "use_social", value = "Yes" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Condition {
    /// The scalar answer to `question` is exactly `value`.
    Equals { question: QuestionId, value: String },

    /// The multi-select answer to `question` contains `option`.
    Includes { question: QuestionId, option: String },

    /// `question` has been answered with anything.
    Answered { question: QuestionId },

    Not { condition: Box<Condition> },

    /// True when every condition holds. An empty list is true.
    All { conditions: Vec<Condition> },

    /// True when at least one condition holds. An empty list is false.
    Any { conditions: Vec<Condition> },
}

impl Condition {
    pub fn equals(question: impl Into<QuestionId>, value: impl Into<String>) -> Self {
        Self::Equals {
            question: question.into(),
            value: value.into(),
        }
    }

    pub fn includes(question: impl Into<QuestionId>, option: impl Into<String>) -> Self {
        Self::Includes {
            question: question.into(),
            option: option.into(),
        }
    }

    pub fn answered(question: impl Into<QuestionId>) -> Self {
        Self::Answered {
            question: question.into(),
        }
    }

    pub fn negate(condition: Condition) -> Self {
        Self::Not {
            condition: Box::new(condition),
        }
    }

    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::All {
            conditions: conditions.into_iter().collect(),
        }
    }

    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::Any {
            conditions: conditions.into_iter().collect(),
        }
    }

    /// Evaluate against the answers recorded so far.
    pub fn evaluate(&self, record: &ResponseRecord) -> bool {
        match self {
            Self::Equals { question, value } => record.text(question.as_str()) == Some(value.as_str()),
            Self::Includes { question, option } => record
                .selections(question.as_str())
                .is_some_and(|items| items.contains(option)),
            Self::Answered { question } => record.contains(question.as_str()),
            Self::Not { condition } => !condition.evaluate(record),
            Self::All { conditions } => conditions.iter().all(|c| c.evaluate(record)),
            Self::Any { conditions } => conditions.iter().any(|c| c.evaluate(record)),
        }
    }

    /// All question ids this condition reads.
    pub fn referenced_questions(&self) -> Vec<&QuestionId> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a QuestionId>) {
        match self {
            Self::Equals { question, .. }
            | Self::Includes { question, .. }
            | Self::Answered { question } => out.push(question),
            Self::Not { condition } => condition.collect_references(out),
            Self::All { conditions } | Self::Any { conditions } => {
                for c in conditions {
                    c.collect_references(out);
                }
            }
        }
    }
}
