//! # branching-survey-dialoguer
//!
//! Terminal front end for `branching-survey`, built on `dialoguer`.
//!
//! The kiosk loop shows the respondent counter, asks for a respondent mode,
//! then presents each question with a widget matching its kind:
//!
//! - dropdown: a select list with a placeholder entry that cannot be submitted
//! - yes/no: a two-item select
//! - text: a line input, optionally with dictation
//! - multi-select: a checkbox list
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use branching_survey::{Catalogue, Kiosk, MemoryStore, NoVoiceCapture, Questionnaire};
//! use branching_survey_dialoguer::{DialoguerFrontend, run_kiosk};
//!
//! let questionnaire = Questionnaire::new(&Catalogue::builtin())?;
//! let mut kiosk = Kiosk::new(questionnaire, Arc::new(MemoryStore::new()));
//! let runtime = tokio::runtime::Handle::current();
//!
//! let completed = tokio::task::spawn_blocking(move || {
//!     run_kiosk(&mut kiosk, &DialoguerFrontend::new(), &NoVoiceCapture, &runtime)
//! })
//! .await??;
//! ```

mod frontend;
pub use frontend::{Answer, DialoguerFrontend, FrontendError, ModeChoice, Prompter, run_kiosk};

pub mod config;
pub use config::{ConfigError, KioskConfig};
