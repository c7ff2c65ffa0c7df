use crate::{QuestionId, RespondentClass};

/// Error type for building a question set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuestionSetError {
    /// A respondent class with nothing to ask.
    #[error("Question set is empty")]
    Empty,

    #[error("Question id must not be empty")]
    EmptyId,

    /// Two questions share an id.
    #[error("Duplicate question id: {0}")]
    DuplicateId(QuestionId),

    /// The id would collide with the respondent class tag in stored documents.
    #[error("Question id '{0}' is reserved")]
    ReservedId(QuestionId),

    /// A condition reads an id that is neither in the set nor `mode`.
    #[error("Condition of question '{question}' refers to unknown question '{reference}'")]
    UnknownReference {
        question: QuestionId,
        reference: QuestionId,
    },

    /// A dropdown or multi-select question with nothing to choose from.
    #[error("Question '{0}' has no options")]
    NoOptions(QuestionId),
}

/// Error type for loading a question catalogue.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("Failed to parse catalogue: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid {class} question set: {source}")]
    InvalidSet {
        class: RespondentClass,
        #[source]
        source: QuestionSetError,
    },
}
