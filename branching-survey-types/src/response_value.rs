use std::fmt;

use serde::{Deserialize, Serialize};

/// A single answer stored in `Responses`.
///
/// Dropdown, yes/no and free-text questions produce `Text`; multi-select
/// questions produce `Selections`. Serialized untagged, so a document holds
/// either a plain string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    /// A scalar answer (dropdown option, yes/no token or typed text).
    Text(String),

    /// The options picked in a multi-select question. May be empty.
    Selections(Vec<String>),
}

impl ResponseValue {
    /// Build a selection answer. Repeated options collapse into the first occurrence.
    pub fn selections<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut picked: Vec<String> = Vec::new();
        for item in items {
            let item = item.into();
            if !picked.contains(&item) {
                picked.push(item);
            }
        }
        Self::Selections(picked)
    }

    /// Try to get this value as a string reference.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Selections(_) => None,
        }
    }

    /// Try to get this value as a list of selected options.
    pub fn as_selections(&self) -> Option<&[String]> {
        match self {
            Self::Selections(items) => Some(items),
            Self::Text(_) => None,
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::Selections(_) => "Selections",
        }
    }
}

impl From<String> for ResponseValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for ResponseValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<String>> for ResponseValue {
    fn from(items: Vec<String>) -> Self {
        Self::selections(items)
    }
}

impl From<Vec<&str>> for ResponseValue {
    fn from(items: Vec<&str>) -> Self {
        Self::selections(items)
    }
}

impl From<YesNo> for ResponseValue {
    fn from(answer: YesNo) -> Self {
        Self::Text(answer.as_str().to_string())
    }
}

/// The two tokens a yes/no question accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub const ALL: [YesNo; 2] = [YesNo::Yes, YesNo::No];

    /// The token stored in responses: `"Yes"` or `"No"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    /// Parse an exact `"Yes"` / `"No"` token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Yes" => Some(Self::Yes),
            "No" => Some(Self::No),
            _ => None,
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for YesNo {
    fn from(b: bool) -> Self {
        if b { Self::Yes } else { Self::No }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selections_collapse_repeats() {
        let value = ResponseValue::selections(["YouTube", "Instagram", "YouTube"]);
        assert_eq!(
            value.as_selections().unwrap(),
            &["YouTube".to_string(), "Instagram".to_string()]
        );
    }

    #[test]
    fn yes_no_tokens() {
        assert_eq!(ResponseValue::from(YesNo::Yes), ResponseValue::from("Yes"));
        assert_eq!(YesNo::from_token("No"), Some(YesNo::No));
        assert_eq!(YesNo::from_token("no"), None);
    }

    #[test]
    fn serializes_untagged() {
        let text = serde_json::to_value(ResponseValue::from("Pune")).unwrap();
        assert_eq!(text, serde_json::json!("Pune"));

        let list = serde_json::to_value(ResponseValue::from(vec!["X", "LinkedIn"])).unwrap();
        assert_eq!(list, serde_json::json!(["X", "LinkedIn"]));
    }
}
