use serde::{Deserialize, Serialize};

use crate::{CatalogueError, Condition, QuestionSet, QuestionSetError, QuestionSpec, RespondentClass};

const STATES: [&str; 28] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
];

/// All question definitions: the shared demographic block and one block per
/// respondent class.
///
/// Question sets are assembled from it on demand, so the catalogue itself is
/// plain data and can be loaded from TOML:
///
/// ```toml
/// [[demographic]]
/// id = "city"
/// text = "Which city was the interview taken in?"
/// type = "text"
///
/// [[parent]]
/// id = "use_social"
/// text = "Do you use any social media platforms?"
/// type = "yes_no"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    #[serde(default)]
    demographic: Vec<QuestionSpec>,

    #[serde(default)]
    parent: Vec<QuestionSpec>,

    #[serde(default)]
    student: Vec<QuestionSpec>,
}

impl Catalogue {
    pub fn new(
        demographic: Vec<QuestionSpec>,
        parent: Vec<QuestionSpec>,
        student: Vec<QuestionSpec>,
    ) -> Self {
        Self {
            demographic,
            parent,
            student,
        }
    }

    /// The questionnaire used in the field.
    pub fn builtin() -> Self {
        let demographic = vec![
            QuestionSpec::dropdown(
                "age",
                "What is your age?",
                (16..=30).map(|age: u32| age.to_string()),
            ),
            QuestionSpec::text("city", "Which city was the interview taken in?"),
            QuestionSpec::dropdown("state", "Which state do you belong to?", STATES),
        ];

        let parent = vec![
            QuestionSpec::yes_no("use_social", "Do you use any social media platforms?"),
            QuestionSpec::multi_select(
                "list_platforms",
                "Which platforms are you most active on?",
                ["Facebook", "YouTube", "Instagram", "WhatsApp", "Pinterest"],
            )
            .with_condition(Condition::equals("use_social", "Yes")),
        ];

        let student = vec![
            QuestionSpec::yes_no(
                "relax_app",
                "When you want to relax or be entertained, do you open any app?",
            ),
            QuestionSpec::multi_select(
                "which_app",
                "Which app do you open first?",
                [
                    "Instagram",
                    "YouTube",
                    "X",
                    "Snapchat",
                    "Facebook",
                    "Pinterest",
                    "LinkedIn",
                ],
            )
            .with_condition(Condition::equals("relax_app", "Yes")),
        ];

        Self::new(demographic, parent, student)
    }

    /// Parse a catalogue from TOML and check that both question sets assemble.
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogueError> {
        let catalogue: Self = toml::from_str(source)?;
        catalogue.validate()?;
        Ok(catalogue)
    }

    /// Check that the question set of every respondent class is valid.
    pub fn validate(&self) -> Result<(), CatalogueError> {
        for class in RespondentClass::ALL {
            self.question_set(class)
                .map_err(|source| CatalogueError::InvalidSet { class, source })?;
        }
        Ok(())
    }

    pub fn demographic(&self) -> &[QuestionSpec] {
        &self.demographic
    }

    /// The questions specific to one respondent class.
    pub fn class_questions(&self, class: RespondentClass) -> &[QuestionSpec] {
        match class {
            RespondentClass::Parent => &self.parent,
            RespondentClass::Student => &self.student,
        }
    }

    /// Demographic questions followed by the questions for `class`.
    pub fn question_set(&self, class: RespondentClass) -> Result<QuestionSet, QuestionSetError> {
        QuestionSet::assemble(&self.demographic, self.class_questions(class))
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuestionKind;

    #[test]
    fn builtin_sets_start_with_demographics() {
        let catalogue = Catalogue::builtin();
        catalogue.validate().unwrap();

        for class in RespondentClass::ALL {
            let set = catalogue.question_set(class).unwrap();
            let ids: Vec<&str> = set.questions().iter().map(|q| q.id().as_str()).collect();
            assert_eq!(&ids[..3], &["age", "city", "state"]);
        }

        let parent = catalogue.question_set(RespondentClass::Parent).unwrap();
        assert_eq!(parent.position("list_platforms"), Some(4));
        let student = catalogue.question_set(RespondentClass::Student).unwrap();
        assert_eq!(student.position("which_app"), Some(4));
    }

    #[test]
    fn builtin_age_options() {
        let catalogue = Catalogue::builtin();
        let options = catalogue.demographic()[0].options().unwrap();
        assert_eq!(options.len(), 15);
        assert_eq!(options.first().map(String::as_str), Some("16"));
        assert_eq!(options.last().map(String::as_str), Some("30"));
    }

    #[test]
    fn builtin_states() {
        let catalogue = Catalogue::builtin();
        let options = catalogue.demographic()[2].options().unwrap();
        assert_eq!(options.len(), 28);
        assert!(options.iter().any(|s| s == "Maharashtra"));
    }

    #[test]
    fn parses_toml() {
        let source = r#"
            [[demographic]]
            id = "city"
            text = "Which city?"
            type = "text"

            [[parent]]
            id = "use_social"
            text = "Social media?"
            type = "yes_no"

            [[parent]]
            id = "list_platforms"
            text = "Which platforms?"
            type = "multi_select"
            options = ["Facebook", "YouTube"]
            condition = { op = "equals", question = "use_social", value = "Yes" }

            [[student]]
            id = "grade"
            text = "Which grade?"
            type = "dropdown"
            options = ["11", "12"]
        "#;

        let catalogue = Catalogue::from_toml_str(source).unwrap();
        let parent = catalogue.question_set(RespondentClass::Parent).unwrap();
        assert_eq!(parent.len(), 3);
        assert_eq!(
            parent.get(2).unwrap().condition(),
            Some(&Condition::equals("use_social", "Yes"))
        );

        let student = catalogue.question_set(RespondentClass::Student).unwrap();
        assert!(matches!(
            student.get(1).unwrap().kind(),
            QuestionKind::Dropdown { options } if options.len() == 2
        ));
    }

    #[test]
    fn rejects_invalid_class_set() {
        let source = r#"
            [[demographic]]
            id = "city"
            text = "Which city?"
            type = "text"

            [[student]]
            id = "city"
            text = "Which city again?"
            type = "text"
        "#;

        let err = Catalogue::from_toml_str(source).unwrap_err();
        assert!(matches!(
            err,
            CatalogueError::InvalidSet {
                class: RespondentClass::Student,
                source: QuestionSetError::DuplicateId(_),
            }
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = Catalogue::from_toml_str("[[parent]]\nid = 3").unwrap_err();
        assert!(matches!(err, CatalogueError::Parse(_)));
    }
}
