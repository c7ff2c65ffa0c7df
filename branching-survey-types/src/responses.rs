use std::collections::HashMap;

use crate::{MODE_KEY, QuestionId, RespondentClass, ResponseValue};

/// Error type for response access operations.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("Missing answer for question: {0}")]
    MissingAnswer(QuestionId),

    #[error("Type mismatch at question '{id}': expected {expected}, got {actual}")]
    TypeMismatch {
        id: QuestionId,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Answers collected so far, keyed by question id.
///
/// A later answer for the same id replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Responses {
    values: HashMap<QuestionId, ResponseValue>,
}

impl Responses {
    /// Create a new empty responses collection.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Insert an answer, returning the value it replaced.
    pub fn insert(
        &mut self,
        id: impl Into<QuestionId>,
        value: impl Into<ResponseValue>,
    ) -> Option<ResponseValue> {
        self.values.insert(id.into(), value.into())
    }

    /// Get the answer for a question id.
    pub fn get(&self, id: &str) -> Option<&ResponseValue> {
        self.values.get(id)
    }

    /// Check if an answer exists for a question id.
    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// Get an iterator over all id-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &ResponseValue)> {
        self.values.iter()
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a scalar answer.
    pub fn get_text(&self, id: &str) -> Result<&str, ResponseError> {
        match self.get(id) {
            Some(ResponseValue::Text(s)) => Ok(s),
            Some(other) => Err(ResponseError::TypeMismatch {
                id: id.into(),
                expected: "Text",
                actual: other.type_name(),
            }),
            None => Err(ResponseError::MissingAnswer(id.into())),
        }
    }

    /// Get a multi-select answer.
    pub fn get_selections(&self, id: &str) -> Result<&[String], ResponseError> {
        match self.get(id) {
            Some(ResponseValue::Selections(items)) => Ok(items),
            Some(other) => Err(ResponseError::TypeMismatch {
                id: id.into(),
                expected: "Selections",
                actual: other.type_name(),
            }),
            None => Err(ResponseError::MissingAnswer(id.into())),
        }
    }
}

impl IntoIterator for Responses {
    type Item = (QuestionId, ResponseValue);
    type IntoIter = std::collections::hash_map::IntoIter<QuestionId, ResponseValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Responses {
    type Item = (&'a QuestionId, &'a ResponseValue);
    type IntoIter = std::collections::hash_map::Iter<'a, QuestionId, ResponseValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// The answers of one survey run, tagged with the respondent class that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRecord {
    mode: RespondentClass,
    responses: Responses,
}

impl ResponseRecord {
    /// Create an empty record for a respondent class.
    pub fn new(mode: RespondentClass) -> Self {
        Self {
            mode,
            responses: Responses::new(),
        }
    }

    pub fn mode(&self) -> RespondentClass {
        self.mode
    }

    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    /// Record an answer, overwriting any earlier answer for the same id.
    pub fn insert(
        &mut self,
        id: impl Into<QuestionId>,
        value: impl Into<ResponseValue>,
    ) -> Option<ResponseValue> {
        self.responses.insert(id, value)
    }

    /// The scalar value recorded under `key`. The `mode` key reads as the
    /// respondent class.
    pub fn text(&self, key: &str) -> Option<&str> {
        if key == MODE_KEY {
            return Some(self.mode.as_str());
        }
        self.responses.get(key).and_then(ResponseValue::as_text)
    }

    /// The multi-select value recorded under `key`.
    pub fn selections(&self, key: &str) -> Option<&[String]> {
        self.responses.get(key).and_then(ResponseValue::as_selections)
    }

    /// Whether anything is recorded under `key`. Always true for `mode`.
    pub fn contains(&self, key: &str) -> bool {
        key == MODE_KEY || self.responses.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut responses = Responses::new();
        responses.insert("city", "Pune");
        responses.insert("list_platforms", vec!["Facebook", "WhatsApp"]);

        assert_eq!(responses.get_text("city").unwrap(), "Pune");
        assert_eq!(
            responses.get_selections("list_platforms").unwrap(),
            &["Facebook".to_string(), "WhatsApp".to_string()]
        );
    }

    #[test]
    fn insert_overwrites() {
        let mut responses = Responses::new();
        responses.insert("age", "20");
        let previous = responses.insert("age", "21");

        assert_eq!(previous, Some(ResponseValue::from("20")));
        assert_eq!(responses.get_text("age").unwrap(), "21");
        assert_eq!(responses.len(), 1);
    }

    #[test]
    fn type_mismatch_error() {
        let mut responses = Responses::new();
        responses.insert("which_app", vec!["X"]);

        let result = responses.get_text("which_app");
        assert!(matches!(result, Err(ResponseError::TypeMismatch { .. })));
    }

    #[test]
    fn missing_answer_error() {
        let responses = Responses::new();
        assert!(matches!(
            responses.get_selections("which_app"),
            Err(ResponseError::MissingAnswer(_))
        ));
    }

    #[test]
    fn record_keeps_mode() {
        let mut record = ResponseRecord::new(RespondentClass::Student);
        record.insert("relax_app", "Yes");

        assert_eq!(record.mode(), RespondentClass::Student);
        assert_eq!(record.responses().get_text("relax_app").unwrap(), "Yes");
    }

    #[test]
    fn record_lookup_sees_mode() {
        let mut record = ResponseRecord::new(RespondentClass::Parent);
        record.insert("list_platforms", vec!["YouTube"]);

        assert_eq!(record.text("mode"), Some("Parent"));
        assert!(record.contains("mode"));
        assert!(!record.responses().contains("mode"));

        assert_eq!(record.text("list_platforms"), None);
        assert_eq!(
            record.selections("list_platforms"),
            Some(&["YouTube".to_string()][..])
        );
        assert_eq!(record.selections("mode"), None);
        assert!(!record.contains("city"));
    }
}
