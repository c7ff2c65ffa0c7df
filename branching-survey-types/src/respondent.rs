use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two survey variants. Each appends its own questions after the shared
/// demographic block and is stored in its own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RespondentClass {
    Parent,
    Student,
}

impl RespondentClass {
    pub const ALL: [RespondentClass; 2] = [RespondentClass::Parent, RespondentClass::Student];

    /// The token shown on the mode screen and stored under the `mode` key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "Parent",
            Self::Student => "Student",
        }
    }
}

impl fmt::Display for RespondentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown respondent class '{0}', expected Parent or Student")]
pub struct ParseRespondentClassError(String);

impl FromStr for RespondentClass {
    type Err = ParseRespondentClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseRespondentClassError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(
            "parent".parse::<RespondentClass>().unwrap(),
            RespondentClass::Parent
        );
        assert_eq!(
            " STUDENT ".parse::<RespondentClass>().unwrap(),
            RespondentClass::Student
        );
        assert!("teacher".parse::<RespondentClass>().is_err());
    }

    #[test]
    fn display_matches_token() {
        assert_eq!(RespondentClass::Parent.to_string(), "Parent");
        assert_eq!(RespondentClass::Student.to_string(), "Student");
    }
}
