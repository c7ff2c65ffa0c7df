//! Kiosk configuration, read from a TOML file.
//!
//! ```toml
//! data_dir = "responses"
//! colorful = true
//! catalogue = "questions.toml"
//! log_file = "responses/survey-kiosk.log"
//!
//! [collections]
//! parent = "parent_responses"
//! student = "student_responses"
//! ```

use std::path::{Path, PathBuf};

use branching_survey::store::{Collections, StoreError};
use branching_survey::{Catalogue, CatalogueError};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error("Invalid [collections]: {0}")]
    Collections(#[from] StoreError),
}

/// Settings for one kiosk process. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    /// Directory the JSON-lines collections are written to.
    pub data_dir: PathBuf,

    pub colorful: bool,

    /// Question catalogue to load instead of the built-in one.
    pub catalogue: Option<PathBuf>,

    pub collections: Collections,

    /// Where log lines go. Defaults to `survey-kiosk.log` in `data_dir`.
    pub log_file: Option<PathBuf>,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("responses"),
            colorful: true,
            catalogue: None,
            collections: Collections::default(),
            log_file: None,
        }
    }
}

impl KioskConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.collections.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading config from {}", path.display());
        let source = read(path)?;
        Self::from_toml_str(&source)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("survey-kiosk.log"))
    }

    /// The configured catalogue, or the built-in questions when none is set.
    pub fn load_catalogue(&self) -> Result<Catalogue, ConfigError> {
        match &self.catalogue {
            Some(path) => {
                debug!("Loading catalogue from {}", path.display());
                let source = read(path)?;
                Ok(Catalogue::from_toml_str(&source)?)
            }
            None => Ok(Catalogue::builtin()),
        }
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use branching_survey::RespondentClass;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = KioskConfig::from_toml_str("").unwrap();
        assert_eq!(config, KioskConfig::default());
        assert_eq!(config.data_dir, PathBuf::from("responses"));
        assert!(config.colorful);
    }

    #[test]
    fn partial_collections_keep_other_default() {
        let config = KioskConfig::from_toml_str(
            r#"
            data_dir = "/var/lib/kiosk"
            colorful = false

            [collections]
            student = "students_2024"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/kiosk"));
        assert!(!config.colorful);
        assert_eq!(
            config.collections.for_class(RespondentClass::Student),
            "students_2024"
        );
        assert_eq!(
            config.collections.for_class(RespondentClass::Parent),
            "parent_responses"
        );
    }

    #[test]
    fn log_file_defaults_into_data_dir() {
        let config = KioskConfig::from_toml_str("data_dir = \"/srv/kiosk\"").unwrap();
        assert_eq!(config.log_path(), PathBuf::from("/srv/kiosk/survey-kiosk.log"));

        let config = KioskConfig::from_toml_str("log_file = \"/var/log/kiosk.log\"").unwrap();
        assert_eq!(config.log_path(), PathBuf::from("/var/log/kiosk.log"));
    }

    #[test]
    fn invalid_toml_is_rejected() {
        let err = KioskConfig::from_toml_str("colorful = \"maybe\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn path_like_collection_fails_at_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [collections]
            parent = "../parents"
            "#
        )
        .unwrap();

        let err = KioskConfig::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Collections(StoreError::InvalidCollection(ref name)) if name == "../parents"
        ));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = KioskConfig::load(Path::new("/nonexistent/kiosk.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/kiosk.toml"));
    }

    #[test]
    fn builtin_catalogue_without_path() {
        let config = KioskConfig::default();
        assert_eq!(config.load_catalogue().unwrap(), Catalogue::builtin());
    }

    #[test]
    fn catalogue_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [[demographic]]
            id = "age"
            text = "How old are you?"
            type = "text"

            [[parent]]
            id = "school_visits"
            text = "Do you visit the school?"
            type = "yes_no"

            [[student]]
            id = "grade"
            text = "Which grade are you in?"
            type = "dropdown"
            options = ["10", "11", "12"]
            "#
        )
        .unwrap();

        let config = KioskConfig {
            catalogue: Some(file.path().to_path_buf()),
            ..KioskConfig::default()
        };
        let catalogue = config.load_catalogue().unwrap();
        assert_eq!(catalogue.demographic().len(), 1);
        assert_eq!(
            catalogue.class_questions(RespondentClass::Student)[0].id(),
            "grade"
        );
    }

    #[test]
    fn invalid_catalogue_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [[parent]]
            id = "mode"
            text = "Which mode?"
            type = "text"
            "#
        )
        .unwrap();

        let config = KioskConfig {
            catalogue: Some(file.path().to_path_buf()),
            ..KioskConfig::default()
        };
        assert!(matches!(
            config.load_catalogue(),
            Err(ConfigError::Catalogue(_))
        ));
    }
}
