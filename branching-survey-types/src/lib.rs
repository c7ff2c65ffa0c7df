//! Core types for the branching-survey crate.
//!
//! This crate provides the presentation-agnostic data model:
//! - `QuestionSpec`, `QuestionKind` and `Condition` - Individual questions and their gates
//! - `QuestionSet` and `Catalogue` - Ordered question sets per respondent class
//! - `Responses`, `ResponseValue` and `ResponseRecord` - Collected answers
//! - `RespondentClass` - The Parent / Student survey variants

mod question_id;
pub use question_id::{MODE_KEY, QuestionId};

mod response_value;
pub use response_value::{ResponseValue, YesNo};

mod respondent;
pub use respondent::{ParseRespondentClassError, RespondentClass};

mod responses;
pub use responses::{ResponseError, ResponseRecord, Responses};

mod condition;
pub use condition::Condition;

mod question;
pub use question::{AnswerError, QuestionKind, QuestionSpec};

mod question_set;
pub use question_set::QuestionSet;

mod catalogue;
pub use catalogue::Catalogue;

mod error;
pub use error::{CatalogueError, QuestionSetError};
