//! # branching-survey
//!
//! A branching questionnaire for two respondent classes, Parent and Student.
//!
//! Each class answers the shared demographic questions followed by its own
//! questions. A question may carry a [`Condition`] over the answers given so
//! far; after each answer the engine scans forward for the next question whose
//! condition holds, and the survey completes when none is left.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use branching_survey::{Catalogue, Kiosk, MemoryStore, Progress, Questionnaire, RespondentClass, YesNo};
//!
//! let questionnaire = Questionnaire::new(&Catalogue::builtin())?;
//! let mut kiosk = Kiosk::new(questionnaire, Arc::new(MemoryStore::new()));
//!
//! kiosk.select_mode(RespondentClass::Parent);
//! kiosk.submit_answer("age", "25")?;
//! kiosk.submit_answer("city", "Pune")?;
//! kiosk.submit_answer("state", "Maharashtra")?;
//!
//! // "No" skips the platform question, which finishes the parent survey.
//! let progress = kiosk.submit_answer("use_social", YesNo::No)?;
//! assert!(matches!(progress, Progress::Completed { completed: 1, .. }));
//! ```
//!
//! ## Collaborators
//!
//! - [`store::ResponseStore`] - receives each finished record as a flat document
//!   ([`store::JsonlStore`], [`store::MemoryStore`])
//! - [`voice::VoiceCapture`] - dictation for free-text questions

// Re-export all types from branching-survey-types
pub use branching_survey_types::*;

pub mod engine;
pub use engine::{Advance, EngineError, Questionnaire, SessionState};

mod kiosk;
pub use kiosk::{Kiosk, Progress};

pub mod store;
pub use store::{JsonlStore, MemoryStore, ResponseStore};

pub mod voice;
pub use voice::{NoVoiceCapture, VoiceCapture};

// Scripted respondent for running surveys without user interaction
mod scripted;
pub use scripted::{ScriptError, ScriptedRespondent};
